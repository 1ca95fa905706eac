use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn strata() -> Command {
    let mut cmd = Command::cargo_bin("strata").unwrap();
    cmd.env_remove("APP_PROJECT")
        .env_remove("APP_ENV")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_version() {
    strata()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("strata"));
}

#[test]
fn cli_help() {
    strata()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Layered configuration resolver"));
}

#[test]
fn cli_prefixes() {
    strata()
        .args(["-d", "tests/fixtures/layered", "prefixes"])
        .assert()
        .success()
        .stdout("app\ndatabase\n");
}

#[test]
fn cli_resolve_with_flags() {
    let output = strata()
        .args([
            "-d",
            "tests/fixtures/layered",
            "--project",
            "acme",
            "--env",
            "local",
            "resolve",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["app"]["test_string_replace"], "string schet config");
    assert_eq!(value["app"]["test_string1"], "string local config");
    assert_eq!(value["app"]["cache"]["ttl"], 5);
    assert_eq!(value["database"]["connections"]["primary"]["host"], "acme-db.internal");
}

#[test]
fn cli_resolve_reads_environment_variables() {
    let output = strata()
        .env("APP_PROJECT", "acme")
        .args(["-d", "tests/fixtures/layered", "resolve", "app"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["app"]["test_string_replace"], "string schet config");
    assert_eq!(value["app"]["debug"], false);
    assert!(value.get("database").is_none());
}

#[test]
fn cli_resolve_as_toml() {
    strata()
        .args(["-d", "tests/fixtures/layered", "resolve", "app", "--format", "toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("test_string_replace = \"string app config\""));
}

#[test]
fn cli_get_dotted_key() {
    strata()
        .args([
            "-d",
            "tests/fixtures/layered",
            "--project",
            "acme",
            "get",
            "app.cache.driver",
        ])
        .assert()
        .success()
        .stdout("\"redis\"\n");
}

#[test]
fn cli_get_missing_key() {
    strata()
        .args(["-d", "tests/fixtures/layered", "get", "app.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("key not found"));
}

#[test]
fn cli_layers() {
    strata()
        .args(["-d", "tests/fixtures/layered", "--project", "acme", "layers", "app"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"app.acme\""))
        .stdout(predicate::str::contains("\"project\""));
}

#[test]
fn cli_check_valid_config() {
    strata()
        .args(["-d", "tests/fixtures/layered", "--project", "acme", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn cli_check_mixed_keys_fails() {
    strata()
        .args(["-d", "tests/fixtures/mixed", "--project", "acme", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("keys mixing"));
}

#[test]
fn cli_resolve_mixed_keys_fails() {
    strata()
        .args(["-d", "tests/fixtures/mixed", "--project", "acme", "resolve"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("keys mixing"));
}

#[test]
fn cli_resolve_empty_directory() {
    let dir = TempDir::new().unwrap();
    strata()
        .args(["-d", dir.path().to_str().unwrap(), "resolve"])
        .assert()
        .success()
        .stdout("{}\n");
}

#[test]
fn cli_prefixes_warns_on_empty_directory() {
    let dir = TempDir::new().unwrap();
    strata()
        .args(["-d", dir.path().to_str().unwrap(), "prefixes"])
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("no configuration files found"));
}
