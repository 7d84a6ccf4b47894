use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

fn bindery(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bindery-app").unwrap();
    cmd.env("BINDERY_STORE_PATH", dir.join("store.json"))
        .env("BINDERY_CONFIG_DIR", dir);
    cmd
}

fn stdout_of(output: std::process::Output) -> String {
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn list_shows_seeded_catalog() {
    let dir = TempDir::new().unwrap();
    let output = bindery(dir.path()).arg("list").output().unwrap();
    assert!(output.status.success());

    let stdout = stdout_of(output);
    assert!(stdout.contains("Unlocking Android"));
    assert!(stdout.contains("Yet to be Published"));
    assert!(dir.path().join("store.json").exists());
}

#[test]
fn added_books_persist_across_invocations() {
    let dir = TempDir::new().unwrap();

    let output = bindery(dir.path())
        .args([
            "add",
            "--title",
            "Systems Field Guide",
            "--authors",
            "Jane Doe, John Roe",
            "--page-count",
            "320",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = stdout_of(output);
    assert!(stdout.contains("Added book #7: Systems Field Guide"));

    let output = bindery(dir.path()).args(["show", "7"]).output().unwrap();
    assert!(output.status.success());
    let stdout = stdout_of(output);
    assert!(stdout.contains("Systems Field Guide"));
    assert!(stdout.contains("Jane Doe, John Roe"));
}

#[test]
fn add_without_authors_fails_validation() {
    let dir = TempDir::new().unwrap();
    let output = bindery(dir.path())
        .args(["add", "--title", "No Author", "--authors", " "])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("validation error"));
}

#[test]
fn show_unknown_id_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let output = bindery(dir.path()).args(["show", "999"]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Book not found"));
}

#[test]
fn rm_deletes_the_record() {
    let dir = TempDir::new().unwrap();

    let output = bindery(dir.path()).args(["rm", "1"]).output().unwrap();
    assert!(output.status.success());
    assert!(stdout_of(output).contains("Deleted book #1"));

    let output = bindery(dir.path()).args(["show", "1"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn edit_keeps_unset_fields() {
    let dir = TempDir::new().unwrap();

    let output = bindery(dir.path())
        .args(["edit", "1", "--title", "Unlocking Android, Revised"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let output = bindery(dir.path()).args(["show", "1"]).output().unwrap();
    let stdout = stdout_of(output);
    assert!(stdout.contains("Unlocking Android, Revised"));
    assert!(stdout.contains("1933988673"));
}

#[test]
fn find_filters_by_category() {
    let dir = TempDir::new().unwrap();
    let output = bindery(dir.path())
        .args(["find", "--category", "Java"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = stdout_of(output);
    assert!(stdout.contains("Griffon in Action"));
    assert!(stdout.contains("Android in Action, Second Edition"));
    assert!(!stdout.contains("Unlocking Android"));
}

#[test]
fn find_status_and_year_bounds() {
    let dir = TempDir::new().unwrap();
    let output = bindery(dir.path())
        .args(["find", "--status", "published", "--year-from", "2011"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = stdout_of(output);
    assert!(stdout.contains("Griffon in Action"));
    assert!(stdout.contains("Specification by Example"));
    assert!(!stdout.contains("Flex 3 in Action"));
    assert!(!stdout.contains("Windows Phone 7 in Action"));
}

#[test]
fn search_matches_across_fields() {
    let dir = TempDir::new().unwrap();
    let output = bindery(dir.path()).args(["search", "java"]).output().unwrap();
    assert!(output.status.success());

    let stdout = stdout_of(output);
    assert!(stdout.contains("Griffon in Action"));

    let output = bindery(dir.path())
        .args(["search", "zzz-no-such-book"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout_of(output).contains("No books found"));
}

#[test]
fn list_json_is_machine_readable() {
    let dir = TempDir::new().unwrap();
    let output = bindery(dir.path()).args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let books = value.as_array().unwrap();
    assert_eq!(books.len(), 6);
    assert!(books[0]["_id"].is_number());
    assert_eq!(books[0]["title"], "Griffon in Action");
}

#[test]
fn pagination_splits_the_list() {
    let dir = TempDir::new().unwrap();
    let output = bindery(dir.path())
        .args(["list", "--per-page", "4"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = stdout_of(output);
    assert!(stdout.contains("Page 1 of 2 (6 books)"));
    assert!(stdout.contains("[1] 2"));

    let output = bindery(dir.path())
        .args(["list", "--per-page", "4", "--page", "2"])
        .output()
        .unwrap();
    assert!(stdout_of(output).contains("Page 2 of 2"));
}

#[test]
fn facets_enumerate_distinct_values() {
    let dir = TempDir::new().unwrap();
    let output = bindery(dir.path()).arg("facets").output().unwrap();
    assert!(output.status.success());

    let stdout = stdout_of(output);
    assert!(stdout.contains("Categories:"));
    assert!(stdout.contains("Java"));
    assert!(stdout.contains("Statuses: Published, Yet to be Published"));
}
