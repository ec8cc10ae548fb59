//! End-to-end tests for the `calbot` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const NOW: &str = "2026-10-21T10:15:00+08:00";

/// A `calbot` command isolated from the user's config directory.
fn calbot(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("calbot").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("CALBOT_CALENDAR_ID")
        .env_remove("CALBOT_DEFAULT_DURATION_HOURS")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_add_prints_event() {
    let home = TempDir::new().unwrap();
    let output = calbot(&home)
        .args(["add", "--when", "下周三下午5点0分", "--what", "Design review", "--now", NOW])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let record = stdout_json(&output);
    assert_eq!(record["calendar_id"], "primary");
    assert_eq!(record["event"]["summary"], "Design review");
    assert_eq!(record["event"]["start"], "2026-10-28T17:00:00+08:00");
    assert_eq!(record["event"]["end"], "2026-10-28T18:00:00+08:00");
}

#[test]
fn test_add_with_duration() {
    let home = TempDir::new().unwrap();
    let output = calbot(&home)
        .args(["add", "--when", "周一上午9点30分", "--what", "standup", "--dur", "2"])
        .args(["--now", NOW])
        .output()
        .unwrap();
    assert!(output.status.success());

    let record = stdout_json(&output);
    assert_eq!(record["event"]["start"], "2026-10-19T09:30:00+08:00");
    assert_eq!(record["event"]["end"], "2026-10-19T11:30:00+08:00");
}

#[test]
fn test_add_reads_config_file() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("calbot.toml");
    std::fs::write(&config, "calendar_id = \"team\"\ndefault_duration_hours = 3\n").unwrap();

    let output = calbot(&home)
        .arg("--config")
        .arg(&config)
        .args(["add", "--when", "周五14点0分", "--what", "demo", "--now", NOW])
        .output()
        .unwrap();
    assert!(output.status.success());

    let record = stdout_json(&output);
    assert_eq!(record["calendar_id"], "team");
    assert_eq!(record["event"]["end"], "2026-10-23T17:00:00+08:00");
}

#[test]
fn test_add_env_overrides_config() {
    let home = TempDir::new().unwrap();
    let output = calbot(&home)
        .env("CALBOT_CALENDAR_ID", "personal")
        .args(["add", "--when", "周五14点0分", "--what", "gym", "--now", NOW])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["calendar_id"], "personal");
}

#[test]
fn test_add_missing_hour_marker_fails() {
    let home = TempDir::new().unwrap();
    calbot(&home)
        .args(["add", "--when", "周一9", "--what", "x", "--now", NOW])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("parser: invalid hour"));
}

#[test]
fn test_add_unknown_character_fails() {
    let home = TempDir::new().unwrap();
    calbot(&home)
        .args(["add", "--when", "下周x三5点0分", "--what", "x", "--now", NOW])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("lexer: unknown token: 下周[x]三5点0分"));
}

#[test]
fn test_add_empty_title_fails() {
    let home = TempDir::new().unwrap();
    calbot(&home)
        .args(["add", "--when", "周一9点0分", "--what", "", "--now", NOW])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing argument `what`"));
}

#[test]
fn test_add_huge_duration_fails_cleanly() {
    let home = TempDir::new().unwrap();
    calbot(&home)
        .args(["add", "--when", "周一9点0分", "--what", "x", "--dur", "4294967295"])
        .args(["--now", NOW])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("out of range"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_add_without_now_uses_clock() {
    let home = TempDir::new().unwrap();
    let output = calbot(&home)
        .args(["add", "--when", "周三12点0分", "--what", "lunch"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let start = stdout_json(&output)["event"]["start"].as_str().unwrap().to_string();
    assert!(start.contains("T12:00:00"), "got {start}");
}

#[test]
fn test_parse_prints_report() {
    let home = TempDir::new().unwrap();
    let output = calbot(&home)
        .args(["parse", "下下周日 晚", "--now", NOW])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let output = calbot(&home)
        .args(["parse", "下下周日 20点 0分", "--now", NOW])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["parsed"]["next_count"], 2);
    assert_eq!(report["parsed"]["weekday"], 7);
    assert_eq!(report["resolved_local"], "2026-11-08T20:00:00+08:00");
    assert_eq!(report["resolved_utc"], "2026-11-08T12:00:00+00:00");
    assert_eq!(report["tokens"][0]["kind"], "next");
}
