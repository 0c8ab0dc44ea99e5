//! Integration tests for the `strand` CLI binary.
#![allow(deprecated)] // Command::cargo_bin, until the macro replacement stabilizes

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn strand() -> Command {
    Command::cargo_bin("strand").unwrap()
}

#[test]
fn info_lists_situations_and_qualities() {
    strand()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("roadside"))
        .stdout(predicate::str::contains("wolf-den"))
        .stdout(predicate::str::contains("wild"))
        .stdout(predicate::str::contains("courage"))
        .stdout(predicate::str::contains("word scale"));
}

#[test]
fn play_renders_opening_and_quits() {
    strand()
        .arg("play")
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The Lantern Road"))
        .stdout(predicate::str::contains("Read the milestone"));
}

#[test]
fn play_picks_choice_by_number() {
    strand()
        .arg("play")
        .write_stdin("1\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("TWELVE MILES TO HARROWGATE"));
}

#[test]
fn play_follows_action_links() {
    strand()
        .arg("play")
        .write_stdin("./listen\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("might be howling"));
}

#[test]
fn play_reports_unknown_links() {
    strand()
        .arg("play")
        .write_stdin("atlantis\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("situation not found"));
}

#[test]
fn play_shows_stats() {
    strand()
        .arg("play")
        .write_stdin("stats\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Health: 10"))
        .stdout(predicate::str::contains("Courage: fair"));
}

#[test]
fn save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let save = dir.path().join("game.json");

    strand()
        .arg("play")
        .arg("--save")
        .arg(&save)
        .write_stdin("./steady\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved to"));

    assert!(save.exists());

    // The restored game remembers the courage gained before saving.
    strand()
        .arg("play")
        .arg("--load")
        .arg(&save)
        .write_stdin("stats\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Courage: good"));
}

#[test]
fn load_rejects_garbage() {
    let dir = TempDir::new().unwrap();
    let save = dir.path().join("bad.json");
    std::fs::write(&save, "not a save").unwrap();

    strand()
        .arg("play")
        .arg("--load")
        .arg(&save)
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
