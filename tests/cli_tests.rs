mod common;

use assert_cmd::Command;
use common::{ORG_ID, collection, organization, team};
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Writes a config file pointing the CLI at `host`
fn write_config(dir: &Path, host: &str) -> PathBuf {
    let file = dir.join(".cma.toml");
    let content = format!(
        r#"
[auth]
access_token = "CFPAT-test"

[client]
host = "{host}"
retry_on_error = false

[defaults]
organization_id = "{ORG_ID}"
"#
    );
    fs::write(&file, content).unwrap();
    file
}

/// `cma` isolated from the user's environment and home directory
fn cma(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cma").unwrap();
    cmd.env("HOME", home)
        .env_remove("CMA_ACCESS_TOKEN")
        .env_remove("CMA_HOST")
        .current_dir(home);
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    cma(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("orgs"))
        .stdout(predicate::str::contains("assets"));
}

#[test]
fn test_missing_token_fails() {
    let home = TempDir::new().unwrap();
    cma(home.path())
        .args(["orgs", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No access token"));
}

#[test]
fn test_auth_status_without_token() {
    let home = TempDir::new().unwrap();
    cma(home.path())
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_orgs_list_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(vec![organization(ORG_ID, "Acme")])))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let config = write_config(home.path(), &server.uri());
    let home_path = home.path().to_path_buf();

    let output = tokio::task::spawn_blocking(move || {
        cma(&home_path)
            .arg("--config")
            .arg(&config)
            .args(["orgs", "list", "--json"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["name"], "Acme");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_teams_list_uses_default_org() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(vec![organization(ORG_ID, "Acme")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/organizations/org-1/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(vec![team("team-1", "Editors", 1)])))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    write_config(home.path(), &server.uri());
    let home_path = home.path().to_path_buf();

    // picks up ./.cma.toml from the working directory
    let output = tokio::task::spawn_blocking(move || {
        cma(&home_path).args(["teams", "list"]).output().unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("team-1"));
    assert!(stdout.contains("Editors"));
}
