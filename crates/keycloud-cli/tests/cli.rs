use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn keycloud() -> Command {
    let mut cmd = Command::cargo_bin("keycloud").unwrap();
    cmd.env_remove("KEYCLOUD_URL")
        .env_remove("KEYCLOUD_SESSION_TOKEN");
    cmd
}

#[test]
fn help_describes_the_tool() {
    keycloud()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("keycloud password manager"))
        .stdout(predicate::str::contains("KEYCLOUD_SESSION_TOKEN"));
}

#[test]
fn config_set_then_show() {
    let dir = tempdir().unwrap();
    let config_dir = dir.path().to_str().unwrap();

    keycloud()
        .args(["--config-dir", config_dir, "config", "set"])
        .args(["--url", "http://localhost:8080", "--timeout-seconds", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration saved successfully."));

    let saved = std::fs::read_to_string(dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("http://localhost:8080"));

    keycloud()
        .args(["--config-dir", config_dir, "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Server URL: http://localhost:8080"))
        .stdout(predicate::str::contains("Timeout: 5s"))
        .stdout(predicate::str::contains("POST /deletePassword"));
}

#[test]
fn environment_url_overrides_config_file() {
    let dir = tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "url = \"http://from-file:8080\"\n",
    )
    .unwrap();

    keycloud()
        .env("KEYCLOUD_URL", "http://from-env:9090")
        .args(["--config-dir", dir.path().to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Server URL: http://from-env:9090"));
}

#[test]
fn config_set_rejects_zero_timeout() {
    let dir = tempdir().unwrap();

    keycloud()
        .args(["--config-dir", dir.path().to_str().unwrap()])
        .args(["config", "set", "--timeout-seconds", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value '0' for 'timeout_seconds'"));
}

#[test]
fn config_set_rejects_bad_url() {
    let dir = tempdir().unwrap();

    keycloud()
        .args(["--config-dir", dir.path().to_str().unwrap()])
        .args(["config", "set", "--url", "localhost:8080"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must start with http"));

    assert!(!dir.path().join("config.toml").exists());
}

#[test]
fn config_set_without_values_fails() {
    let dir = tempdir().unwrap();

    keycloud()
        .args(["--config-dir", dir.path().to_str().unwrap(), "config", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No configuration values provided"));
}

#[test]
fn list_without_server_url_fails_with_hint() {
    let dir = tempdir().unwrap();

    keycloud()
        .args(["--config-dir", dir.path().to_str().unwrap(), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing 'url'"))
        .stderr(predicate::str::contains("keycloud config set --url"));
}

#[test]
fn list_rejects_unknown_format() {
    let dir = tempdir().unwrap();

    keycloud()
        .args(["--config-dir", dir.path().to_str().unwrap()])
        .args(["--server", "http://127.0.0.1:9", "list", "--format", "csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown format 'csv'"));
}

#[test]
fn list_against_unreachable_server_reports_transport_failure() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "timeout_seconds = 2\n").unwrap();

    keycloud()
        .args(["--config-dir", dir.path().to_str().unwrap()])
        .args(["--server", "http://127.0.0.1:9", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Something went wrong!"));
}

#[test]
fn remove_requires_url() {
    keycloud()
        .args(["remove", "--username", "mark"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--url"));
}
