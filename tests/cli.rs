use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quotebook(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("quotebook").unwrap();
    cmd.env("HOME", home)
        .env("QUOTEBOOK_SESSION", "cli-test")
        .env("QUOTEBOOK_ENDPOINT", "http://127.0.0.1:9/posts")
        .env("NO_COLOR", "1")
        .env_remove("QUOTEBOOK_LOG");
    cmd
}

fn json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

#[test]
fn test_show_is_default_command() {
    let home = TempDir::new().unwrap();

    quotebook(home.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Categories"))
        .stdout(predicate::str::contains("Education"))
        .stdout(predicate::str::contains("(3 quotes)"));

    assert!(home.path().join(".quotebook").join("quotebook.db").exists());
}

#[test]
fn test_random_is_remembered_by_show() {
    let home = TempDir::new().unwrap();

    let random = quotebook(home.path())
        .args(["random", "-o", "json"])
        .assert()
        .success();
    let picked = json(&random.get_output().stdout)["quote"].clone();

    let shown = quotebook(home.path())
        .args(["show", "--output", "json"])
        .assert()
        .success();
    assert_eq!(json(&shown.get_output().stdout)["display"]["quote"], picked);
}

#[test]
fn test_add_then_list() {
    let home = TempDir::new().unwrap();

    quotebook(home.path())
        .args(["add", "Stay hungry.", "--category", "Motivation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Quote added successfully!"));

    let listed = quotebook(home.path())
        .args(["list", "-c", "Motivation", "-o", "json"])
        .assert()
        .success();
    let value = json(&listed.get_output().stdout);
    assert_eq!(value["count"], 2);
    assert_eq!(value["items"][1]["text"], "Stay hungry.");
}

#[test]
fn test_add_blank_text_fails() {
    let home = TempDir::new().unwrap();

    quotebook(home.path())
        .args(["add", "   ", "--category", "X"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Please enter both quote text and category",
        ));

    let listed = quotebook(home.path())
        .args(["list", "-o", "json"])
        .assert()
        .success();
    assert_eq!(json(&listed.get_output().stdout)["count"], 3);
}

#[test]
fn test_filter_is_persisted() {
    let home = TempDir::new().unwrap();

    quotebook(home.path())
        .args(["filter", "Programming"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Talk is cheap. Show me the code."));

    let cats = quotebook(home.path())
        .args(["categories", "-o", "json"])
        .assert()
        .success();
    let value = json(&cats.get_output().stdout);
    assert_eq!(value["selected"], "Programming");
    assert_eq!(
        value["options"],
        serde_json::json!(["all", "Education", "Programming", "Motivation"])
    );

    let listed = quotebook(home.path())
        .args(["list", "-o", "json"])
        .assert()
        .success();
    assert_eq!(json(&listed.get_output().stdout)["count"], 1);
}

#[test]
fn test_export_then_import_appends() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    quotebook(home.path())
        .current_dir(out.path())
        .arg("export")
        .assert()
        .success();
    let exported = out.path().join("quotes.json");
    let text = std::fs::read_to_string(&exported).unwrap();
    assert!(text.starts_with("[\n  {"));

    quotebook(home.path())
        .args(["import", exported.to_str().unwrap(), "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"added\": 3"))
        .stdout(predicate::str::contains("\"total\": 6"));
}

#[test]
fn test_import_malformed_file_fails() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("bad.json");
    std::fs::write(&file, "{\"text\": \"not a list\"}").unwrap();

    quotebook(home.path())
        .args(["import", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import failed"));

    let listed = quotebook(home.path())
        .args(["list", "-o", "json"])
        .assert()
        .success();
    assert_eq!(json(&listed.get_output().stdout)["count"], 3);
}

#[test]
fn test_sync_unreachable_keeps_quotes() {
    let home = TempDir::new().unwrap();

    quotebook(home.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sync failed."))
        .stderr(predicate::str::contains("Network error"));

    let listed = quotebook(home.path())
        .args(["list", "-o", "json"])
        .assert()
        .success();
    assert_eq!(json(&listed.get_output().stdout)["count"], 3);
}

#[test]
fn test_session_end_forgets_random_pick() {
    let home = TempDir::new().unwrap();
    quotebook(home.path()).arg("random").assert().success();

    quotebook(home.path())
        .args(["session", "end", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"removed\": 1"));
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();

    quotebook(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("quotebook"));
}

#[test]
fn test_corrupt_storage_warns_and_recovers() {
    let home = TempDir::new().unwrap();
    quotebook(home.path()).arg("categories").assert().success();

    let db = home.path().join(".quotebook").join("quotebook.db");
    let conn = rusqlite::Connection::open(&db).unwrap();
    conn.execute(
        "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES ('quotes', 'not json', '2026-01-01T00:00:00Z')",
        [],
    )
    .unwrap();
    drop(conn);

    quotebook(home.path())
        .arg("categories")
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:"))
        .stdout(predicate::str::contains("Education"));
}
