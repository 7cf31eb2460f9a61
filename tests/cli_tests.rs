//! Integration tests for the oathcode binary
//!
//! Each test points the binary at its own temporary configuration directory
//! and checks stdout, stderr and the exit code.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

fn oathcode(config_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_oathcode"))
        .args(args)
        .env("OATHCODE_CONFIG_DIR", config_dir)
        .env_remove("JOURNAL_STREAM")
        .output()
        .expect("Failed to run oathcode")
}

fn write_config(config_dir: &Path, contents: &str) {
    fs::write(config_dir.join("config.toml"), contents).expect("Failed to write config file");
}

#[test]
fn test_help_lists_commands() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = oathcode(temp_dir.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("list"));
    assert!(stdout.contains("code"));
    assert!(stdout.contains("add"));
}

#[test]
fn test_steam_code_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_config(
        temp_dir.path(),
        &format!(
            "[[credentials]]\nissuer = \"Steam\"\nname = \"alice\"\nsecret = \"{}\"\n",
            RFC_SECRET
        ),
    );

    let output = oathcode(temp_dir.path(), &["code", "alice", "--timestamp", "59000"]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "PV9M4");
}

#[test]
fn test_code_json_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_config(
        temp_dir.path(),
        &format!(
            "[[credentials]]\nname = \"rfc\"\nsecret = \"{}\"\ndigits = 8\n",
            RFC_SECRET
        ),
    );

    let output = oathcode(
        temp_dir.path(),
        &["code", "rfc", "--timestamp", "59000", "--json"],
    );
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["code"]["value"], "94287082");
    assert_eq!(value["code"]["valid_from"], 30_000);
    assert_eq!(value["code"]["valid_to"], 60_000);
    assert_eq!(value["credential"]["oath_type"], "TOTP");
}

#[test]
fn test_hotp_counter_persisted() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_config(
        temp_dir.path(),
        &format!(
            "[[credentials]]\nname = \"counter\"\nsecret = \"{}\"\n\
             oath_type = \"HOTP\"\ncounter = 0\n",
            RFC_SECRET
        ),
    );

    let first = oathcode(temp_dir.path(), &["code", "counter"]);
    assert!(first.status.success());
    assert_eq!(String::from_utf8_lossy(&first.stdout).trim(), "755224");

    let second = oathcode(temp_dir.path(), &["code", "counter"]);
    assert_eq!(String::from_utf8_lossy(&second.stdout).trim(), "287082");

    let saved = fs::read_to_string(temp_dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("counter = 2"));
}

#[test]
fn test_add_then_list_json() {
    let temp_dir = tempfile::tempdir().unwrap();

    let add = oathcode(
        temp_dir.path(),
        &["add", "--name", "alice", "--issuer", "Steam", "--secret", RFC_SECRET],
    );
    assert!(add.status.success(), "{}", String::from_utf8_lossy(&add.stderr));

    let list = oathcode(temp_dir.path(), &["list", "--json", "--timestamp", "59000"]);
    assert!(list.status.success());

    let value: serde_json::Value = serde_json::from_slice(&list.stdout).unwrap();
    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["credential"]["issuer"], "Steam");
    assert_eq!(entries[0]["code"]["value"], "PV9M4");
}

#[test]
fn test_touch_credential_skipped_by_list() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_config(
        temp_dir.path(),
        &format!(
            "[[credentials]]\nname = \"rfc\"\nsecret = \"{}\"\ntouch_required = true\n",
            RFC_SECRET
        ),
    );

    let list = oathcode(temp_dir.path(), &["list", "--json", "--timestamp", "59000"]);
    assert!(list.status.success());
    let value: serde_json::Value = serde_json::from_slice(&list.stdout).unwrap();
    assert_eq!(value[0]["credential"]["touch_required"], true);
    assert!(value[0]["code"].is_null());

    let code = oathcode(temp_dir.path(), &["code", "rfc", "--timestamp", "59000"]);
    assert!(code.status.success());
    assert_eq!(String::from_utf8_lossy(&code.stdout).trim(), "287082");
}

#[test]
fn test_colliding_ids_rejected_by_add() {
    let temp_dir = tempfile::tempdir().unwrap();
    let first = oathcode(
        temp_dir.path(),
        &["add", "--name", "alice", "--issuer", "Steam", "--secret", RFC_SECRET],
    );
    assert!(first.status.success());

    let second = oathcode(
        temp_dir.path(),
        &["add", "--name", "Steam:alice", "--secret", "JBSWY3DPEHPK3PXP"],
    );
    assert_eq!(second.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&second.stderr).contains("Duplicate credential"));
}

#[test]
fn test_add_rejects_bad_secret() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = oathcode(
        temp_dir.path(),
        &["add", "--name", "bob", "--secret", "not-base32!"],
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("not valid Base32"));
    assert!(!temp_dir.path().join("config.toml").exists());
}

#[test]
fn test_unknown_credential_exit_code() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_config(temp_dir.path(), "credentials = []\n");

    let output = oathcode(temp_dir.path(), &["code", "nobody"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No credential named nobody"));
}

#[test]
fn test_missing_config_exit_code() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = oathcode(temp_dir.path(), &["list"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load configuration file"));
}
