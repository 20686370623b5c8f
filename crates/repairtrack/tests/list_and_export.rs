//! List filtering, advanced search, and CSV export through the controller.

mod common;

use assert_fs::prelude::*;

use common::{draft, TestEnv};
use repairtrack::{SearchFilter, TrackerError};

#[test]
fn list_filter_matches_barcode_or_person_name() {
    let mut env = TestEnv::new();
    env.controller.create(draft("BC100")).unwrap();

    let mut other = draft("XX200");
    other.person_name = "John Doe".to_string();
    env.controller.create(other).unwrap();

    assert_eq!(env.controller.list("").unwrap().len(), 2);
    assert_eq!(env.controller.list("BC1").unwrap().len(), 1);
    assert_eq!(env.controller.list("Doe").unwrap().len(), 1);
    assert!(env.controller.list("nobody").unwrap().is_empty());
}

#[test]
fn advanced_search_combines_predicates() {
    let mut env = TestEnv::new();
    env.controller.create(draft("BC100")).unwrap();

    let mut repaired = draft("BC100");
    repaired.status = "Repaired".to_string();
    env.controller.create(repaired).unwrap();

    let hits = env
        .controller
        .search(&SearchFilter {
            barcode: Some("BC100".to_string()),
            status: Some("Repaired".to_string()),
        })
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].fields.status, "Repaired");
}

#[test]
fn export_writes_displayed_rows() {
    let mut env = TestEnv::new();
    env.controller.create(draft("BC100")).unwrap();
    env.controller.create(draft("BC200")).unwrap();

    let export_dir = assert_fs::TempDir::new().unwrap();
    let rows = env.controller.list("").unwrap();
    let path = env.controller.export(&rows, export_dir.path()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.contains("BC100"));
    assert!(content.contains("BC200"));
}

#[test]
fn export_of_filtered_view_contains_only_visible_rows() {
    let mut env = TestEnv::new();
    env.controller.create(draft("BC100")).unwrap();
    env.controller.create(draft("XX200")).unwrap();

    let export_dir = assert_fs::TempDir::new().unwrap();
    let rows = env.controller.list("BC1").unwrap();
    let path = env.controller.export(&rows, export_dir.path()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("BC100"));
    assert!(!content.contains("XX200"));
}

#[test]
fn export_with_nothing_displayed_is_an_error() {
    let env = TestEnv::new();
    let export_dir = assert_fs::TempDir::new().unwrap();

    let err = env.controller.export(&[], export_dir.path()).unwrap_err();
    assert!(matches!(err, TrackerError::Export(_)));
}

#[test]
fn export_counts_attachments_per_row() {
    let mut env = TestEnv::new();

    let source_dir = assert_fs::TempDir::new().unwrap();
    source_dir.child("one.pdf").write_binary(b"1").unwrap();
    source_dir.child("two.pdf").write_binary(b"2").unwrap();

    env.controller.stage_attachments([
        source_dir.child("one.pdf").path().to_path_buf(),
        source_dir.child("two.pdf").path().to_path_buf(),
    ]);
    env.controller.create(draft("BC100")).unwrap();

    let export_dir = assert_fs::TempDir::new().unwrap();
    let rows = env.controller.list("").unwrap();
    let path = env.controller.export(&rows, export_dir.path()).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let data_line = content.lines().nth(1).unwrap();
    assert!(data_line.ends_with(",2"));
}
