//! End-to-end tests driving the `ygm` binary against a mock API.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Env {
    config_dir: TempDir,
    project: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            config_dir: TempDir::new().unwrap(),
            project: TempDir::new().unwrap(),
        }
    }

    fn ygm(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("ygm");
        cmd.env("YGM_CONFIG_DIR", self.config_dir.path())
            .env_remove("YGM_ORG")
            .env_remove("YGM_API_URL")
            .current_dir(self.project.path());
        cmd
    }

    fn config_file(&self) -> std::path::PathBuf {
        self.config_dir.path().join("config.yml")
    }

    /// Store with `acme` (default) and `globex`, pointed at `api_url`.
    fn write_accounts(&self, api_url: &str) {
        fs::write(
            self.config_file(),
            format!(
                "version: 1\n\
                 default_org: acme\n\
                 api_url: {api_url}\n\
                 accounts:\n  \
                   acme:\n    \
                     token: tok_acme\n    \
                     user_email: wile@acme.test\n    \
                     org_id: 1\n    \
                     org_name: Acme\n  \
                   globex:\n    \
                     token: tok_globex\n    \
                     user_email: hank@globex.test\n    \
                     org_id: 2\n    \
                     org_name: Globex\n"
            ),
        )
        .unwrap();
    }

    fn link(&self, dir: &Path, org: &str) {
        fs::write(dir.join(".ygm.yml"), format!("org: {org}\n")).unwrap();
    }
}

async fn tasks_server(token: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tasks": [{ "id": 11, "title": format!("task for {token}"), "status": "pending" }]
        })))
        .mount(&server)
        .await;
    server
}

#[test]
fn help_lists_commands() {
    cargo_bin_cmd!("ygm")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("tasks"))
        .stdout(predicate::str::contains("context"))
        .stdout(predicate::str::contains("--org"));
}

#[test]
fn version_subcommand() {
    cargo_bin_cmd!("ygm")
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ygm version "));
}

#[test]
fn commands_require_login() {
    let env = Env::new();
    env.ygm()
        .arg("tasks")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn json_mode_reports_errors_as_json() {
    let env = Env::new();
    let output = env.ygm().args(["--json", "brand"]).output().unwrap();

    assert!(!output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(body["error"].as_str().unwrap().contains("not logged in"));
}

#[tokio::test]
async fn default_org_used_without_link() {
    let server = tasks_server("tok_acme").await;
    let env = Env::new();
    env.write_accounts(&server.uri());

    env.ygm()
        .args(["tasks", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("task for tok_acme"));
}

#[tokio::test]
async fn link_in_ancestor_beats_default() {
    let server = tasks_server("tok_globex").await;
    let env = Env::new();
    env.write_accounts(&server.uri());
    env.link(env.project.path(), "globex");

    let nested = env.project.path().join("src").join("deep");
    fs::create_dir_all(&nested).unwrap();

    env.ygm()
        .current_dir(&nested)
        .args(["tasks", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("task for tok_globex"));
}

#[tokio::test]
async fn org_flag_beats_link() {
    let server = tasks_server("tok_acme").await;
    let env = Env::new();
    env.write_accounts(&server.uri());
    env.link(env.project.path(), "globex");

    env.ygm()
        .args(["--org", "acme", "tasks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[11] task for tok_acme"));
}

#[test]
fn unknown_org_flag_fails_without_fallback() {
    let env = Env::new();
    env.write_accounts("http://127.0.0.1:9");

    env.ygm()
        .args(["--org", "initech", "tasks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("'initech'"))
        .stderr(predicate::str::contains("not found"));
}

#[tokio::test]
async fn login_persists_account_and_links_directory() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/device/codes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_code": "dev-1",
            "user_code": "WXYZ-0000",
            "verification_uri": format!("{}/device", server.uri()),
            "expires_in": 30,
            "interval": 1
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/device/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok_new",
            "token_type": "Bearer",
            "scope": "cli",
            "organization": { "id": 5, "name": "Globex", "slug": "globex" },
            "user": { "email": "hank@globex.test" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let env = Env::new();
    env.ygm()
        .args(["login", "--api-url", &server.uri(), "--no-browser", "--name", "ci"])
        .assert()
        .success()
        .stdout(predicate::str::contains("WXYZ-0000"))
        .stdout(predicate::str::contains("Organization slug: globex"));

    let config = fs::read_to_string(env.config_file()).unwrap();
    assert!(config.contains("default_org: globex"), "{config}");
    assert!(config.contains("token: tok_new"), "{config}");

    let link = fs::read_to_string(env.project.path().join(".ygm.yml")).unwrap();
    assert_eq!(link.trim(), "org: globex");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(env.config_file()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[tokio::test]
async fn denied_login_changes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/device/codes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_code": "dev-2",
            "user_code": "DENY-0000",
            "verification_uri": "https://ygm.test/device",
            "expires_in": 30,
            "interval": 1
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/device/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "access_denied" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let env = Env::new();
    env.ygm()
        .args(["login", "--api-url", &server.uri(), "--no-browser"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("denied"));

    assert!(!env.config_file().exists());
    assert!(!env.project.path().join(".ygm.yml").exists());
}

#[test]
fn link_and_unlink_round_trip() {
    let env = Env::new();
    env.write_accounts("http://127.0.0.1:9");

    env.ygm()
        .args(["link", "globex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked to 'globex' (Globex)"));

    let link = fs::read_to_string(env.project.path().join(".ygm.yml")).unwrap();
    assert_eq!(link.trim(), "org: globex");
    assert!(
        env.project
            .path()
            .join(".agents/skills/youve-got-marketing/SKILL.md")
            .is_file()
    );

    env.ygm()
        .args(["link", "globex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already linked"));

    env.ygm()
        .args(["link", "initech"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("acme (Acme)"));

    env.ygm()
        .arg("unlink")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unlinking from 'globex'"));
    assert!(!env.project.path().join(".ygm.yml").exists());

    env.ygm()
        .arg("unlink")
        .assert()
        .success()
        .stdout(predicate::str::contains("not linked"));
}

#[test]
fn logout_moves_default() {
    let env = Env::new();
    env.write_accounts("http://127.0.0.1:9");

    env.ygm()
        .args(["logout", "acme"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Default organization: globex"));

    let config = fs::read_to_string(env.config_file()).unwrap();
    assert!(!config.contains("tok_acme"), "{config}");
    assert!(config.contains("default_org: globex"), "{config}");
}
