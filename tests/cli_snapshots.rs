use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

const QUERY_BUTTON: &str = r##"{
  "selector": "#query-btn",
  "tagName": "button",
  "text": "Button",
  "attributes": { "id": "query-btn", "class": "btn btn-primary", "name": null },
  "position": { "x": 10, "y": 20, "width": 100, "height": 30 },
  "timestamp": "2024-05-01T12:00:00Z"
}"##;

const SEARCH_BOX: &str = r##"{
  "selector": ".search",
  "tagName": "input",
  "attributes": { "class": "search", "type": "text" },
  "boundingBox": { "x": 5, "y": 5, "width": 200, "height": 24 },
  "capturedAt": "2024-05-01T12:00:01Z"
}"##;

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let storage = dir.path().join("healing-data");
    fs::create_dir_all(storage.join("elements")).unwrap();
    fs::write(storage.join("elements/_query_btn.json"), QUERY_BUTTON).unwrap();
    fs::write(storage.join("elements/_search.json"), SEARCH_BOX).unwrap();
    fs::write(
        dir.path().join("healing.yaml"),
        format!(
            "retryAttempts: 2\nhealingStrategies: [attribute, proximity, visual]\nstorageLocation: {}\n",
            storage.display()
        ),
    )
    .unwrap();
    dir
}

fn selfheal(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("selfheal").expect("binary built");
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(dir.join("healing.yaml"));
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 output");
    serde_json::from_str(&stdout).expect("valid json")
}

#[test]
fn key_command_prints_sanitized_key() {
    let dir = workspace();
    let assert = selfheal(dir.path())
        .args(["snapshots", "key", "#query-btn"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.trim(), "_query_btn");
}

#[test]
fn list_reads_legacy_and_current_field_names() {
    let dir = workspace();
    let value = stdout_json(selfheal(dir.path()).args(["--output", "json", "snapshots", "list"]));

    let rows = value.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["key"].as_str(), Some("_query_btn"));
    assert_eq!(rows[0]["tagName"].as_str(), Some("button"));
    assert_eq!(rows[0]["boundingBox"]["x"].as_f64(), Some(10.0));
    assert!(rows[0]["attributes"].get("name").is_none());
    assert_eq!(rows[1]["key"].as_str(), Some("_search"));
    assert_eq!(rows[1]["attributes"]["type"].as_str(), Some("text"));
    assert_eq!(rows[1]["text"].as_str(), Some(""));
}

#[test]
fn show_resolves_selector_to_its_snapshot() {
    let dir = workspace();
    let value = stdout_json(selfheal(dir.path()).args([
        "--output",
        "json",
        "snapshots",
        "show",
        "#query-btn",
    ]));
    assert_eq!(value["selector"].as_str(), Some("#query-btn"));
    assert_eq!(value["capturedAt"].as_str(), Some("2024-05-01T12:00:00Z"));
}

#[test]
fn show_unknown_selector_fails() {
    let dir = workspace();
    let assert = selfheal(dir.path())
        .args(["snapshots", "show", "#nope"])
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("No stored data found for selector: #nope"));
}

#[test]
fn remove_and_clear_delete_files() {
    let dir = workspace();
    let elements = dir.path().join("healing-data/elements");

    let removed = stdout_json(selfheal(dir.path()).args([
        "--output",
        "json",
        "snapshots",
        "remove",
        "#query-btn",
    ]));
    assert_eq!(removed["key"].as_str(), Some("_query_btn"));
    assert_eq!(removed["removed"].as_bool(), Some(true));
    assert!(!elements.join("_query_btn.json").exists());

    fs::write(elements.join("_broken.json"), "{not json").unwrap();
    let cleared = stdout_json(selfheal(dir.path()).args(["--output", "json", "snapshots", "clear"]));
    assert_eq!(cleared["removed"].as_u64(), Some(2));
    assert!(!elements.join("_search.json").exists());
    assert!(!elements.join("_broken.json").exists());
}

#[test]
fn config_show_reports_effective_values() {
    let dir = workspace();
    let value = stdout_json(selfheal(dir.path()).args(["--output", "json", "config", "show"]));
    assert_eq!(value["retryAttempts"].as_u64(), Some(2));
    assert_eq!(
        value["healingStrategies"],
        serde_json::json!(["attribute", "nearby", "visual"])
    );
    assert_eq!(value["screenshotOnFail"].as_bool(), Some(true));
}

#[test]
fn config_validate_reports_attempt_budget() {
    let dir = workspace();
    let value = stdout_json(selfheal(dir.path()).args(["--output", "json", "config", "validate"]));
    assert_eq!(value["valid"].as_bool(), Some(true));
    assert_eq!(value["attemptBudget"].as_u64(), Some(2));
}

#[test]
fn unknown_strategy_names_are_rejected() {
    let dir = workspace();
    fs::write(
        dir.path().join("healing.yaml"),
        "healingStrategies: [attribute, fuzzy]\n",
    )
    .unwrap();
    selfheal(dir.path())
        .args(["config", "validate"])
        .assert()
        .failure();
}
