//! End-to-end tests for the CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn rb(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("rb").unwrap();
    cmd.arg("--data-dir")
        .arg(dir.path())
        .arg("--seed")
        .arg("7")
        .env("NO_COLOR", "1");
    cmd
}

fn history_lines(dir: &TempDir) -> usize {
    fs::read_to_string(dir.path().join("history.jsonl"))
        .unwrap_or_default()
        .lines()
        .filter(|l| !l.trim().is_empty())
        .count()
}

// ---------------------------------------------------------------------------
// quick / roll
// ---------------------------------------------------------------------------

#[test]
fn quick_rolls_one_die_by_default() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["quick", "d20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1d20 = ").and(predicate::str::contains("D20: [")));
    assert_eq!(history_lines(&dir), 1);
}

#[test]
fn quick_with_count_and_negative_modifier() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["quick", "d6", "-n", "3", "-m", "-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3d6 - 2 = "));
}

#[test]
fn quick_rejects_unknown_die() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["quick", "d7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown die"));
}

#[test]
fn roll_combines_groups_in_die_order() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["roll", "1d8", "2d6", "d6", "-m", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3d6 + 1d8 + 3 = "));
}

#[test]
fn roll_flags_custom_dice() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["roll", "2d20", "1d4", "-m", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom roll"));
}

#[test]
fn roll_recognizes_catalog_dice() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["roll", "2d6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom roll").not());
}

#[test]
fn quick_rejects_counts_over_the_cap() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["quick", "d6", "-n", "4000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("0..=100"));
    assert_eq!(history_lines(&dir), 0);
}

#[test]
fn quick_accepts_the_cap() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["quick", "d4", "-n", "100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100d4 = "));
}

#[test]
fn roll_reports_capped_groups() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["roll", "4000000000d6"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100d6 = "))
        .stderr(predicate::str::contains("4000000000d6 capped at 100d6"));
}

#[test]
fn roll_caps_repeated_kinds_together() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["roll", "60d8", "60d8", "2d4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2d4 + 100d8 = "))
        .stderr(predicate::str::contains("120d8 capped at 100d8"));
}

#[test]
fn roll_within_cap_has_no_note() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["roll", "50d6", "50d6"])
        .assert()
        .success()
        .stderr(predicate::str::contains("capped").not());
}

#[test]
fn config_file_sets_history_snapshot_key() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("history.jsonl")).unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{ "historyKey": "table-rolls" }"#,
    )
    .unwrap();

    rb(&dir).args(["quick", "d20"]).assert().success();
    assert!(dir.path().join("local/table-rolls.json").exists());
    assert!(!dir.path().join("local/diceRollHistory.json").exists());
}

#[test]
fn broken_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), "{ not json").unwrap();
    rb(&dir)
        .args(["quick", "d8"])
        .assert()
        .success()
        .stderr(predicate::str::contains("invalid config"));
    assert_eq!(history_lines(&dir), 1);
}

#[test]
fn roll_needs_a_die() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["roll", "0d6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("select at least one die"));
}

// ---------------------------------------------------------------------------
// history / reroll / clear
// ---------------------------------------------------------------------------

#[test]
fn history_empty() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No rolls yet"));
}

#[test]
fn history_lists_newest_first() {
    let dir = TempDir::new().unwrap();
    rb(&dir).args(["quick", "d4"]).assert().success();
    rb(&dir).args(["quick", "d12"]).assert().success();

    let output = rb(&dir).arg("history").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let d12 = stdout.find("1d12").unwrap();
    let d4 = stdout.find("1d4").unwrap();
    assert!(d12 < d4, "newest roll should be listed first:\n{stdout}");
    assert!(stdout.contains("2 rolls"));
}

#[test]
fn history_limit() {
    let dir = TempDir::new().unwrap();
    for _ in 0..3 {
        rb(&dir).args(["quick", "d6"]).assert().success();
    }
    rb(&dir)
        .args(["history", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 of 3 rolls"));
}

#[test]
fn reroll_adds_a_new_entry() {
    let dir = TempDir::new().unwrap();
    rb(&dir).args(["roll", "2d8", "1d4", "-m", "1"]).assert().success();
    rb(&dir)
        .arg("reroll")
        .assert()
        .success()
        .stdout(predicate::str::contains("1d4 + 2d8 + 1 = "));
    assert_eq!(history_lines(&dir), 2);
}

#[test]
fn reroll_out_of_range() {
    let dir = TempDir::new().unwrap();
    rb(&dir).args(["quick", "d6"]).assert().success();
    rb(&dir)
        .args(["reroll", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no roll at position 5"));
}

#[test]
fn clear_empties_history() {
    let dir = TempDir::new().unwrap();
    rb(&dir).args(["quick", "d6"]).assert().success();
    rb(&dir).args(["quick", "d8"]).assert().success();
    rb(&dir)
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 2 rolls"));
    assert_eq!(history_lines(&dir), 0);
    rb(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No rolls yet"));
}

#[test]
fn broken_primary_falls_back_to_snapshot() {
    let dir = TempDir::new().unwrap();
    // A directory where the history file should be makes the primary unusable.
    fs::create_dir(dir.path().join("history.jsonl")).unwrap();

    rb(&dir).args(["quick", "d10"]).assert().success();
    rb(&dir).args(["quick", "d100"]).assert().success();

    assert!(dir.path().join("local/diceRollHistory.json").exists());
    rb(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("2 rolls")
                .and(predicate::str::contains("loaded from fallback storage")),
        );
}

// ---------------------------------------------------------------------------
// catalog / preset / save / delete
// ---------------------------------------------------------------------------

#[test]
fn catalog_lists_builtin_categories() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .arg("catalog")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Weapons")
                .and(predicate::str::contains("Monster Abilities"))
                .and(predicate::str::contains("Disintegrate (6th)"))
                .and(predicate::str::contains("10d6 + 40")),
        );
}

#[test]
fn catalog_filters_by_category() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["catalog", "healing spells"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Healing Word (1st)")
                .and(predicate::str::contains("Greataxe").not()),
        );
}

#[test]
fn catalog_unknown_category() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["catalog", "cantrips"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no category named"));
}

#[test]
fn preset_rolls_by_name() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["preset", "troll claw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Troll Claw: 1d6 + 4 = "));
}

#[test]
fn preset_unknown() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["preset", "Vorpal Sword"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("preset not found"));
}

#[test]
fn save_roll_then_use_and_delete_it() {
    let dir = TempDir::new().unwrap();
    rb(&dir).args(["roll", "2d20", "1d4", "-m", "5"]).assert().success();
    rb(&dir)
        .args(["save", "Smite Combo", "-d", "homebrew"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 'Smite Combo' (1d4 + 2d20 + 5)"));

    rb(&dir)
        .args(["catalog", "custom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Smite Combo").and(predicate::str::contains("homebrew")));

    rb(&dir)
        .args(["roll", "1d4", "2d20", "-m", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom roll").not());

    rb(&dir)
        .args(["preset", "Smite Combo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Smite Combo: 1d4 + 2d20 + 5 = "));

    rb(&dir)
        .args(["delete", "Smite Combo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 'Smite Combo'"));
    rb(&dir)
        .args(["delete", "Smite Combo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no saved roll named"));
}

#[test]
fn duplicate_saves_delete_together() {
    let dir = TempDir::new().unwrap();
    rb(&dir).args(["quick", "d12", "-n", "2"]).assert().success();
    rb(&dir).args(["save", "Twin"]).assert().success();
    rb(&dir)
        .args(["save", "Twin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already named 'Twin'"));
    rb(&dir)
        .args(["delete", "Twin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 saved rolls"));
}

#[test]
fn save_without_history_fails() {
    let dir = TempDir::new().unwrap();
    rb(&dir)
        .args(["save", "Nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no rolls in history"));
}
