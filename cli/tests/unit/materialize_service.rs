//! Unit tests for `application::services::materialize`.

#![allow(clippy::expect_used)]

use starter_cli::application::services::materialize::materialize;
use starter_cli::domain::ProjectError;
use starter_cli::infra::{EmbeddedSkeleton, LocalFs};

use crate::helpers::{tool, weather_request};
use crate::mocks::{BrokenScaffolder, LeakyScaffolder, RecordingReporter, UnreachableScaffolder};

#[tokio::test]
async fn builds_complete_tree_with_rendered_agent() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let reporter = RecordingReporter::default();
    let project = materialize(
        &EmbeddedSkeleton,
        &LocalFs,
        &reporter,
        &weather_request(),
        tmp.path(),
    )
    .await
    .expect("materialize");

    assert_eq!(project.root, tmp.path().join("weather-agent"));
    assert_eq!(project.files, 10);

    let agent = std::fs::read_to_string(project.root.join("app/agent.py")).expect("agent.py");
    assert!(agent.contains("description=\"Weather assistant\""));
    assert!(agent.contains("instruction=\"Answer weather questions briefly.\""));
    assert!(agent.contains("tools=[get_weather, get_current_time]"));
    assert!(!reporter.steps().is_empty());
}

#[tokio::test]
async fn custom_tools_in_request_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut request = weather_request();
    request.tools = vec![
        tool("search_docs", "Search the docs"),
        tool("open_ticket", "Open a support ticket"),
        tool("close_ticket", "Close a support ticket"),
    ];
    let project = materialize(
        &EmbeddedSkeleton,
        &LocalFs,
        &RecordingReporter::default(),
        &request,
        tmp.path(),
    )
    .await
    .expect("materialize");

    let agent = std::fs::read_to_string(project.root.join("app/agent.py")).expect("agent.py");
    assert!(agent.contains("tools=[search_docs, open_ticket, close_ticket]"));
    assert!(agent.contains("def open_ticket(query: str) -> str:"));
    assert!(agent.contains("return f\"Result from open_ticket: {query}\""));
    assert!(!agent.contains("def get_weather"));
}

#[tokio::test]
async fn refuses_existing_project_directory() {
    let tmp = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(tmp.path().join("weather-agent")).expect("mkdir");
    let err = materialize(
        &UnreachableScaffolder,
        &LocalFs,
        &RecordingReporter::default(),
        &weather_request(),
        tmp.path(),
    )
    .await
    .expect_err("existing dir");
    assert!(matches!(
        err.downcast_ref::<ProjectError>(),
        Some(ProjectError::AlreadyExists(_))
    ));
}

#[tokio::test]
async fn scaffold_failure_carries_diagnostic() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let err = materialize(
        &BrokenScaffolder("template 'on_premise' not found"),
        &LocalFs,
        &RecordingReporter::default(),
        &weather_request(),
        tmp.path(),
    )
    .await
    .expect_err("scaffold failure");
    match err.downcast_ref::<ProjectError>() {
        Some(ProjectError::ScaffoldFailed(msg)) => {
            assert!(msg.contains("template 'on_premise' not found"), "{msg}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn leftover_placeholder_is_a_scaffold_failure() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let err = materialize(
        &LeakyScaffolder,
        &LocalFs,
        &RecordingReporter::default(),
        &weather_request(),
        tmp.path(),
    )
    .await
    .expect_err("unrendered placeholder");
    let msg = err.to_string();
    assert!(msg.contains("unrendered placeholder"), "{msg}");
    assert!(msg.contains("README.md"), "{msg}");
}

#[tokio::test]
async fn user_text_with_braces_is_not_a_placeholder_failure() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut request = weather_request();
    request.prompt = "Reply as JSON like {{ \"city\": name }}.".to_string();
    let project = materialize(
        &EmbeddedSkeleton,
        &LocalFs,
        &RecordingReporter::default(),
        &request,
        tmp.path(),
    )
    .await
    .expect("materialize");
    let agent = std::fs::read_to_string(project.root.join("app/agent.py")).expect("agent.py");
    assert!(agent.contains("{{ \\\"city\\\": name }}"));
}
