//! Publishing against a real `git` binary. Skipped when git is unavailable.

#![allow(clippy::expect_used)]

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use starter_cli::application::services::publish::{RemoteTarget, publish_to_remote_folder};
use starter_cli::domain::RemoteHost;
use starter_cli::infra::{GithubClient, LocalFs, TokioCommandRunner};
use starter_cli::output::TracingReporter;

fn git_available() -> bool {
    StdCommand::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

fn git(dir: &Path, args: &[&str]) -> String {
    let out = StdCommand::new("git")
        .arg("-C")
        .arg(dir)
        .args([
            "-c",
            "user.name=Seed",
            "-c",
            "user.email=seed@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .output()
        .expect("spawn git");
    assert!(
        out.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

/// Host whose clone URLs resolve to bare repositories under `root`.
fn local_host(root: &Path) -> RemoteHost {
    RemoteHost {
        web_base: format!("file://{}", root.display()),
        api_base: "http://127.0.0.1:9".to_string(),
    }
}

/// Bare repository at `<root>/owner/repo.git` with one commit on `main`.
fn seeded_bare_repo(root: &Path) -> std::path::PathBuf {
    let bare = root.join("owner/repo.git");
    std::fs::create_dir_all(&bare).expect("mkdir");
    git(&bare, &["init", "--bare"]);
    git(&bare, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    let seed = root.join("seed");
    std::fs::create_dir_all(&seed).expect("mkdir");
    git(&seed, &["init"]);
    std::fs::write(seed.join("README.md"), "# shared agents\n").expect("write");
    git(&seed, &["add", "README.md"]);
    git(&seed, &["commit", "-m", "seed"]);
    git(&seed, &["push", &bare.to_string_lossy(), "HEAD:refs/heads/main"]);
    bare
}

#[test]
fn local_publish_creates_single_commit_repo() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }
    let tmp = tempfile::tempdir().expect("tempdir");
    Command::new(assert_cmd::cargo::cargo_bin!("starter"))
        .env("NO_COLOR", "1")
        .env_remove("GITHUB_TOKEN")
        .args(["generate", "--name", "weather-agent", "--git", "--output"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("file://"));

    let repo = tmp.path().join("repos/weather-agent");
    assert!(repo.join("app/agent.py").is_file());
    assert_eq!(
        git(&repo, &["log", "--format=%s"]),
        "Initial commit - Generated by Agent Starter Pack API"
    );
    assert_eq!(
        git(&repo, &["log", "--format=%an <%ae>"]),
        "Agent Starter Pack API <api@agent-starter-pack.local>"
    );
}

#[tokio::test]
async fn remote_folder_publish_pushes_to_branch() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }
    let tmp = tempfile::tempdir().expect("tempdir");
    let bare = seeded_bare_repo(tmp.path());

    let project = tmp.path().join("weather-agent");
    std::fs::create_dir_all(project.join("app")).expect("mkdir");
    std::fs::write(project.join("app/agent.py"), "root_agent = None\n").expect("write");

    let target = RemoteTarget {
        agent_name: "weather-agent".to_string(),
        repo_name: "repo".to_string(),
        org: Some("owner".to_string()),
        host: local_host(tmp.path()),
        branch: "main".to_string(),
        token: Some("unused-token".to_string()),
    };
    let result = publish_to_remote_folder(
        &TokioCommandRunner::default(),
        &GithubClient::default(),
        &LocalFs,
        &TracingReporter::new("weather-agent"),
        &project,
        &target,
    )
    .await
    .expect("publish");

    assert_eq!(
        result.remote_url,
        format!(
            "file://{}/owner/repo/tree/main/{}",
            tmp.path().display(),
            result.folder_name
        )
    );
    let tree = git(&bare, &["ls-tree", "-r", "--name-only", "main"]);
    assert!(tree.lines().any(|l| l == "README.md"), "{tree}");
    assert!(
        tree.lines()
            .any(|l| l == format!("{}/app/agent.py", result.folder_name)),
        "{tree}"
    );
    assert_eq!(
        git(&bare, &["log", "-1", "--format=%s", "main"]),
        format!("Add agent: {}", result.folder_name)
    );
}

#[tokio::test]
async fn remote_folder_publish_accepts_leading_hyphen_names() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }
    let tmp = tempfile::tempdir().expect("tempdir");
    let bare = seeded_bare_repo(tmp.path());

    let project = tmp.path().join("-agent");
    std::fs::create_dir_all(project.join("app")).expect("mkdir");
    std::fs::write(project.join("app/agent.py"), "root_agent = None\n").expect("write");

    let target = RemoteTarget {
        agent_name: "-agent".to_string(),
        repo_name: "repo".to_string(),
        org: Some("owner".to_string()),
        host: local_host(tmp.path()),
        branch: "main".to_string(),
        token: Some("t".to_string()),
    };
    let result = publish_to_remote_folder(
        &TokioCommandRunner::default(),
        &GithubClient::default(),
        &LocalFs,
        &TracingReporter::new("-agent"),
        &project,
        &target,
    )
    .await
    .expect("publish");

    assert!(result.folder_name.starts_with("-agent-"), "{}", result.folder_name);
    let tree = git(&bare, &["ls-tree", "-r", "--name-only", "main"]);
    assert!(
        tree.lines()
            .any(|l| l == format!("{}/app/agent.py", result.folder_name)),
        "{tree}"
    );
}
