//! Integration tests for the chatreel CLI

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use chatreel::DemoScript;

use crate::helpers::{chatreel, fixture, temp_script};

// ============================================================================
// Help and version
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chatreel replays a canned AI conversation"))
        .stdout(predicate::str::contains("transcript"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn short_help_shows_about() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Play scripted AI chat demos"));
}

#[test]
fn version_includes_package_version() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_subcommand_is_usage_error() {
    let config = TempDir::new().unwrap();
    chatreel(config.path()).assert().code(2);
}

// ============================================================================
// transcript
// ============================================================================

#[test]
fn transcript_of_builtin_demo() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .arg("transcript")
        .assert()
        .success()
        .stdout(predicate::str::contains("    500ms  user-message  User query"))
        .stdout(predicate::str::contains("   3600ms  streaming     Generating response…"))
        .stdout(predicate::str::contains("HumanEval⟨1⟩"))
        .stdout(predicate::str::contains("Sources:"))
        .stdout(predicate::str::contains("Artifact [document]"));
}

#[test]
fn transcript_json_is_parseable() {
    let config = TempDir::new().unwrap();
    let output = chatreel(config.path())
        .args(["transcript", "--json", "--at", "2000"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["frame"]["phase"], "thinking");
    assert_eq!(json["frame"]["elapsed_ms"], 2000);
    assert_eq!(json["frame"]["thinking_steps"][0]["completed"], true);
    assert_eq!(json["frame"]["thinking_steps"][1]["completed"], false);
}

#[test]
fn transcript_replay_restarts_timeline() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .args(["transcript", "--replay-at", "2000", "--at", "2600"])
        .assert()
        .success()
        .stdout(predicate::str::contains("   2000ms  idle"))
        .stdout(predicate::str::contains("   2500ms  user-message"))
        .stdout(predicate::str::contains("Frame @ 600ms"));
}

#[test]
fn transcript_rejects_replay_after_stop() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .args(["transcript", "--replay-at", "5000", "--at", "1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("later than"));
}

#[test]
fn transcript_reduced_motion_from_config() {
    let config = TempDir::new().unwrap();
    fs::write(
        config.path().join("config.toml"),
        "[playback]\nreduced_motion = true\n",
    )
    .unwrap();

    chatreel(config.path())
        .args(["transcript", "--script"])
        .arg(fixture("minimal.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("   2400ms  complete"))
        .stdout(predicate::str::contains("Frame @ 2400ms"));
}

#[test]
fn transcript_with_invalid_config_fails() {
    let config = TempDir::new().unwrap();
    fs::write(config.path().join("config.toml"), "[playback\n").unwrap();

    chatreel(config.path())
        .arg("transcript")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn transcript_with_missing_script_fails() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .args(["transcript", "--script", "does-not-exist.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Script not found"))
        .stderr(predicate::str::contains("does-not-exist.toml"));
}

// ============================================================================
// script
// ============================================================================

#[test]
fn script_show_prints_builtin_as_toml() {
    let config = TempDir::new().unwrap();
    let output = chatreel(config.path()).args(["script", "show"]).output().unwrap();
    assert!(output.status.success());

    let shown = DemoScript::from_toml_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(shown, DemoScript::builtin());
}

#[test]
fn script_check_valid_fixture() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .args(["script", "check"])
        .arg(fixture("minimal.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("OK"))
        .stdout(predicate::str::contains("1 thinking step(s)"))
        .stdout(predicate::str::contains("warning").not())
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn script_check_warns_about_orphan_markers() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .args(["script", "check"])
        .arg(fixture("sparse_citations.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("marker [2] has no citation"));
}

#[test]
fn script_check_rejects_duplicate_citations() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .args(["script", "check"])
        .arg(fixture("duplicate_citation.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate citation number 1"));
}

#[test]
fn script_check_rejects_empty_user_message() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .args(["script", "check"])
        .arg(fixture("empty_user_message.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty user message"));
}

#[test]
fn script_check_rejects_invalid_toml() {
    let (_dir, path) = temp_script("user_message = \"Q\"\nresponse = 42\n");
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .args(["script", "check"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid script"));

    chatreel(config.path())
        .args(["script", "check"])
        .arg(fixture("invalid.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid script"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn config_show_prints_defaults() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[playback]"))
        .stdout(predicate::str::contains("speed = 1.0"))
        .stdout(predicate::str::contains("theme = \"default\""));
}

#[test]
fn config_migrate_needs_yes_when_not_interactive() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .args(["config", "migrate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes made."));
    assert!(!config.path().join("config.toml").exists());
}

#[test]
fn config_migrate_yes_creates_then_is_noop() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Config file created successfully."));

    let written = fs::read_to_string(config.path().join("config.toml")).unwrap();
    assert!(written.contains("[display]"));

    chatreel(config.path())
        .args(["config", "migrate", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already up to date"));
}

#[test]
fn config_migrate_keeps_user_values() {
    let config = TempDir::new().unwrap();
    let path = config.path().join("config.toml");
    fs::write(&path, "# mine\n[playback]\nspeed = 2.5\n").unwrap();

    chatreel(config.path())
        .args(["config", "migrate", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+ reduced_motion = false"));

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("# mine"));
    assert!(written.contains("speed = 2.5"));
    assert!(written.contains("theme = \"default\""));
}

// ============================================================================
// completions
// ============================================================================

#[test]
fn completions_for_bash() {
    let config = TempDir::new().unwrap();
    chatreel(config.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("chatreel"));
}
