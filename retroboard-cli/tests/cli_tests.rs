use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

const SEED: &str = r#"
columns:
  - id: todo
    title: To Do
    items:
      - type: card
        id: c1
        authorName: Ana
        content: first
      - type: card
        id: c2
        authorName: Ben
        content: second
  - id: done
    title: Done
"#;

const HOLD_SCRIPT: &str = r#"
- gesture: drag_start
  id: c1
- gesture: drag_over
  over: c2
- wait:
    ms: 700
- gesture: drag_end
  over: c2
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn retroboard() -> Command {
    let mut cmd = Command::cargo_bin("retroboard").unwrap();
    for var in [
        "RETROBOARD_STACK_DELAY_MS",
        "RETROBOARD_FRAME_INTERVAL_MS",
        "RETROBOARD_THROTTLE_PREVIEWS",
        "RETROBOARD_DROP_OUTSIDE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    retroboard()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("replay"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_replay_hold_creates_stack() {
    let dir = TempDir::new().unwrap();
    let seed = write(&dir, "board.yaml", SEED);
    let script = write(&dir, "script.yaml", HOLD_SCRIPT);

    let output = retroboard()
        .arg("replay")
        .arg(&seed)
        .arg(&script)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let board: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let items = board["columns"][0]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["type"], "stack");
    assert_eq!(items[0]["cards"][0]["id"], "c2");
    assert_eq!(items[0]["cards"][1]["id"], "c1");
}

#[test]
fn test_config_file_delays_stacking() {
    let dir = TempDir::new().unwrap();
    let seed = write(&dir, "board.yaml", SEED);
    let script = write(&dir, "script.yaml", HOLD_SCRIPT);
    let config = write(&dir, "retroboard.toml", "stack_delay_ms = 2000\n");

    retroboard()
        .arg("replay")
        .arg(&seed)
        .arg(&script)
        .arg("--config")
        .arg(&config)
        .arg("--format")
        .arg("yaml")
        .assert()
        .success()
        .stdout(predicate::str::contains("type: stack").not())
        .stdout(predicate::str::contains("id: c2"));
}

#[test]
fn test_env_overrides_stack_delay() {
    let dir = TempDir::new().unwrap();
    let seed = write(&dir, "board.yaml", SEED);
    let script = write(&dir, "script.yaml", HOLD_SCRIPT);

    retroboard()
        .env("RETROBOARD_STACK_DELAY_MS", "5000")
        .arg("replay")
        .arg(&seed)
        .arg(&script)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"stack\"").not());
}

#[test]
fn test_check_valid_seed() {
    let dir = TempDir::new().unwrap();
    let seed = write(&dir, "board.yaml", SEED);

    retroboard()
        .arg("check")
        .arg(&seed)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok (2 columns, 2 items, 0 stacks)"));
}

#[test]
fn test_check_rejects_unknown_extension() {
    let dir = TempDir::new().unwrap();
    let seed = write(&dir, "board.txt", SEED);

    retroboard()
        .arg("check")
        .arg(&seed)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_failing_step_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let seed = write(&dir, "board.yaml", SEED);
    let script = write(&dir, "script.yaml", "- unstack:\n    stack: c1\n");

    retroboard()
        .arg("replay")
        .arg(&seed)
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("step 1"));
}
