//! Unit tests for `application::services::publish` and the GitHub client.

#![allow(clippy::expect_used)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use starter_cli::application::ports::AccountLookup;
use starter_cli::application::services::publish::{
    RemoteTarget, publish_local, publish_to_remote_folder, random_folder_name,
};
use starter_cli::domain::{PublishError, RemoteHost};
use starter_cli::infra::{GithubClient, LocalFs};

use crate::mocks::{RecordingReporter, RecordingRunner, StubAccounts};

fn project(root: &Path) -> PathBuf {
    let dir = root.join("weather-agent");
    std::fs::create_dir_all(dir.join("app")).expect("mkdir");
    std::fs::create_dir_all(dir.join(".git")).expect("mkdir");
    std::fs::write(dir.join("README.md"), "# weather-agent\n").expect("write");
    std::fs::write(dir.join("app/agent.py"), "root_agent = None\n").expect("write");
    std::fs::write(dir.join(".git/HEAD"), "ref: refs/heads/main\n").expect("write");
    dir
}

fn target(token: Option<&str>, org: Option<&str>) -> RemoteTarget {
    RemoteTarget {
        agent_name: "weather-agent".to_string(),
        repo_name: "agents".to_string(),
        org: org.map(ToString::to_string),
        host: RemoteHost::new(None),
        branch: "main".to_string(),
        token: token.map(ToString::to_string),
    }
}

// ── Local-only publish ───────────────────────────────────────────────────────

#[tokio::test]
async fn local_publish_runs_git_sequence_and_returns_file_url() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = project(tmp.path());
    let repo = tmp.path().join("repos/weather-agent");
    let runner = RecordingRunner::ok();

    let url = publish_local(&runner, &LocalFs, &RecordingReporter::default(), &src, &repo)
        .await
        .expect("url");

    assert!(url.starts_with("file://"), "{url}");
    assert!(url.ends_with("repos/weather-agent"), "{url}");
    assert_eq!(
        runner.subcommands(),
        vec!["init", "config", "config", "add", "commit"]
    );
    let commit = runner.calls().last().cloned().expect("commit call");
    assert!(commit.contains(&"Initial commit - Generated by Agent Starter Pack API".to_string()));
    assert!(repo.join("app/agent.py").is_file());
    assert!(!repo.join(".git/HEAD").exists(), "source .git must not be copied");
}

#[tokio::test]
async fn local_publish_sets_fixed_identity() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = project(tmp.path());
    let runner = RecordingRunner::ok();
    publish_local(
        &runner,
        &LocalFs,
        &RecordingReporter::default(),
        &src,
        &tmp.path().join("repo"),
    )
    .await
    .expect("url");

    let calls = runner.calls();
    assert!(calls.iter().any(|c| c.ends_with(&[
        "user.name".to_string(),
        "Agent Starter Pack API".to_string()
    ])));
    assert!(calls.iter().any(|c| c.ends_with(&[
        "user.email".to_string(),
        "api@agent-starter-pack.local".to_string()
    ])));
}

#[tokio::test]
async fn local_publish_failure_is_swallowed() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = project(tmp.path());
    let runner = RecordingRunner::failing_on("commit", "nothing to commit");
    let reporter = RecordingReporter::default();

    let url = publish_local(&runner, &LocalFs, &reporter, &src, &tmp.path().join("repo")).await;

    assert_eq!(url, None);
    assert_eq!(reporter.warnings().len(), 1);
    assert!(reporter.warnings()[0].contains("commit"));
}

#[tokio::test]
async fn local_publish_replaces_previous_repository() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = project(tmp.path());
    let repo = tmp.path().join("repo");
    std::fs::create_dir_all(&repo).expect("mkdir");
    std::fs::write(repo.join("stale.txt"), "old").expect("write");

    publish_local(
        &RecordingRunner::ok(),
        &LocalFs,
        &RecordingReporter::default(),
        &src,
        &repo,
    )
    .await
    .expect("url");
    assert!(!repo.join("stale.txt").exists());
}

// ── Remote-folder publish ────────────────────────────────────────────────────

#[tokio::test]
async fn remote_publish_without_token_fails_before_any_command() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = project(tmp.path());
    let runner = RecordingRunner::ok();
    let accounts = StubAccounts::new("octocat");

    let err = publish_to_remote_folder(
        &runner,
        &accounts,
        &LocalFs,
        &RecordingReporter::default(),
        &src,
        &target(None, None),
    )
    .await
    .expect_err("missing token");

    assert!(matches!(
        err.downcast_ref::<PublishError>(),
        Some(PublishError::MissingToken)
    ));
    assert!(runner.calls().is_empty());
    assert!(accounts.calls().is_empty());
}

#[tokio::test]
async fn remote_publish_with_org_skips_account_lookup() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = project(tmp.path());
    let runner = RecordingRunner::ok();
    let accounts = StubAccounts::new("octocat");

    let result = publish_to_remote_folder(
        &runner,
        &accounts,
        &LocalFs,
        &RecordingReporter::default(),
        &src,
        &target(Some("tok123"), Some("acme")),
    )
    .await
    .expect("publish");

    assert!(accounts.calls().is_empty());
    assert!(result.folder_name.starts_with("weather-agent-"));
    assert_eq!(
        result.remote_url,
        format!(
            "https://github.com/acme/agents/tree/main/{}",
            result.folder_name
        )
    );
    assert_eq!(
        runner.subcommands(),
        vec!["clone", "config", "config", "add", "commit", "push"]
    );

    let calls = runner.calls();
    assert_eq!(calls[0][1], "https://tok123@github.com/acme/agents.git");
    assert!(calls[3].ends_with(std::slice::from_ref(&result.folder_name)));
    assert!(calls[4].contains(&format!("Add agent: {}", result.folder_name)));
    assert_eq!(
        calls[5][calls[5].len() - 2..],
        ["origin".to_string(), "HEAD:main".to_string()]
    );
}

#[tokio::test]
async fn remote_publish_resolves_owner_from_token() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = project(tmp.path());
    let runner = RecordingRunner::ok();
    let accounts = StubAccounts::new("octocat");
    let mut t = target(Some("tok123"), None);
    t.host = RemoteHost::new(Some("https://git.example.com/"));
    t.branch = "agents".to_string();

    let result = publish_to_remote_folder(
        &runner,
        &accounts,
        &LocalFs,
        &RecordingReporter::default(),
        &src,
        &t,
    )
    .await
    .expect("publish");

    assert_eq!(
        accounts.calls(),
        vec![(
            "https://git.example.com/api/v3".to_string(),
            "tok123".to_string()
        )]
    );
    assert!(
        result
            .remote_url
            .starts_with("https://git.example.com/octocat/agents/tree/agents/weather-agent-")
    );
}

#[tokio::test]
async fn remote_push_failure_names_step_and_hides_token() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = project(tmp.path());
    let runner = RecordingRunner::failing_on(
        "push",
        "remote: Permission denied to https://tok123@github.com/acme/agents.git",
    );

    let err = publish_to_remote_folder(
        &runner,
        &StubAccounts::new("octocat"),
        &LocalFs,
        &RecordingReporter::default(),
        &src,
        &target(Some("tok123"), Some("acme")),
    )
    .await
    .expect_err("push failure");

    match err.downcast_ref::<PublishError>() {
        Some(PublishError::GitFailed { step, stderr }) => {
            assert_eq!(*step, "push");
            assert!(stderr.contains("Permission denied"));
            assert!(!stderr.contains("tok123"), "{stderr}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!format!("{err:#}").contains("tok123"));
}

#[tokio::test]
async fn remote_clone_failure_stops_pipeline() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let src = project(tmp.path());
    let runner = RecordingRunner::failing_on("clone", "repository not found");

    let err = publish_to_remote_folder(
        &runner,
        &StubAccounts::new("octocat"),
        &LocalFs,
        &RecordingReporter::default(),
        &src,
        &target(Some("tok123"), Some("acme")),
    )
    .await
    .expect_err("clone failure");

    assert!(err.to_string().contains("clone"));
    assert_eq!(runner.subcommands(), vec!["clone"]);
}

#[test]
fn target_uses_fallback_token_only_when_request_has_none() {
    let mut request = starter_common::ProjectRequest::new("a", "d", "p");
    assert_eq!(
        RemoteTarget::from_request(&request, Some("env-token")).token.as_deref(),
        Some("env-token")
    );
    request.github_token = Some("req-token".to_string());
    assert_eq!(
        RemoteTarget::from_request(&request, Some("env-token")).token.as_deref(),
        Some("req-token")
    );
    assert_eq!(RemoteTarget::from_request(&request, None).repo_name, "a");
}

// ── Folder names ─────────────────────────────────────────────────────────────

#[test]
fn folder_name_has_four_digit_suffix() {
    for _ in 0..100 {
        let name = random_folder_name("weather-agent");
        let suffix = name.strip_prefix("weather-agent-").expect("prefix");
        assert_eq!(suffix.len(), 4, "{name}");
        assert!(suffix.chars().all(|c| c.is_ascii_digit()), "{name}");
    }
}

#[test]
fn folder_suffixes_are_spread_over_four_digits() {
    // 1000 draws over 10_000 suffixes: ~50 colliding pairs expected.
    let mut buckets: HashMap<String, usize> = HashMap::new();
    for _ in 0..1000 {
        *buckets.entry(random_folder_name("a")).or_default() += 1;
    }
    let pairs: usize = buckets.values().map(|c| c * (c - 1) / 2).sum();
    assert!((15..=110).contains(&pairs), "{pairs} colliding pairs");
}

fn mock_host(server: &mockito::Server) -> RemoteHost {
    RemoteHost {
        web_base: server.url(),
        api_base: server.url(),
    }
}

// ── GitHub client ────────────────────────────────────────────────────────────

#[tokio::test]
async fn github_client_reads_login_with_expected_headers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/user")
        .match_header("authorization", "Bearer tok123")
        .match_header("accept", "application/vnd.github+json")
        .match_header("x-github-api-version", "2022-11-28")
        .match_header("user-agent", mockito::Matcher::Regex("agent-starter".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"login":"octocat","id":1}"#)
        .create_async()
        .await;

    let login = GithubClient::default()
        .authenticated_login(&mock_host(&server), "tok123")
        .await
        .expect("login");

    assert_eq!(login, "octocat");
    mock.assert_async().await;
}

#[tokio::test]
async fn github_client_surfaces_status_and_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/user")
        .with_status(401)
        .with_body(r#"{"message":"Bad credentials"}"#)
        .create_async()
        .await;

    let err = GithubClient::default()
        .authenticated_login(&mock_host(&server), "bad")
        .await
        .expect_err("unauthorized");

    match err.downcast_ref::<PublishError>() {
        Some(PublishError::AccountLookup { status, body }) => {
            assert_eq!(*status, 401);
            assert!(body.contains("Bad credentials"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
