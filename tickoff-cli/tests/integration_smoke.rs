//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn tickoff() -> Command {
    Command::cargo_bin("tickoff").unwrap()
}

#[test]
fn test_top_level_help_lists_commands() {
    tickoff()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("user"));
}

#[test]
fn test_serve_help() {
    tickoff()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_user_set_help() {
    tickoff()
        .args(["user", "set", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stored as a bcrypt hash"));
}

#[test]
fn test_config_path_under_home() {
    let home = tempfile::tempdir().unwrap();

    tickoff()
        .args(["config", "path"])
        .env("HOME", home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".tickoff"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_masks_secret() {
    let home = tempfile::tempdir().unwrap();

    tickoff()
        .args(["config", "show"])
        .current_dir(home.path())
        .env("HOME", home.path())
        .env("TICKOFF_SESSION_SECRET", "x".repeat(64))
        .assert()
        .success()
        .stdout(predicate::str::contains("<redacted>"))
        .stdout(predicate::str::contains("xxxx").not());
}

#[test]
fn test_migrate_without_database_url_fails() {
    let home = tempfile::tempdir().unwrap();

    tickoff()
        .arg("migrate")
        .current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("DATABASE_URL")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_unknown_command_fails() {
    tickoff().arg("frobnicate").assert().failure();
}
