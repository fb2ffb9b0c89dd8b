//! Tests for the segment catalog
//!
//! These tests verify:
//! - Missing catalog loads as empty
//! - Append format (one id per line, trailing newline)
//! - Load order (most recent first)
//! - Corruption detection

use std::fs;

use lsdb::storage::SegmentCatalog;
use lsdb::LsdbError;
use tempfile::TempDir;

fn setup_temp_catalog() -> (TempDir, SegmentCatalog) {
    let temp_dir = TempDir::new().unwrap();
    let catalog = SegmentCatalog::new(temp_dir.path().join("segments"));
    (temp_dir, catalog)
}

#[test]
fn test_load_missing_catalog_is_empty() {
    let (_temp, catalog) = setup_temp_catalog();

    assert!(catalog.load().unwrap().is_empty());
    assert!(!catalog.path().exists());
}

#[test]
fn test_append_creates_file_with_trailing_newline() {
    let (_temp, catalog) = setup_temp_catalog();

    catalog.append(0).unwrap();
    catalog.append(1).unwrap();
    catalog.append(2).unwrap();

    let contents = fs::read_to_string(catalog.path()).unwrap();
    assert_eq!(contents, "0\n1\n2\n");
}

#[test]
fn test_load_returns_most_recent_first() {
    let (_temp, catalog) = setup_temp_catalog();

    for id in [0, 1, 2] {
        catalog.append(id).unwrap();
    }

    assert_eq!(catalog.load().unwrap(), vec![2, 1, 0]);
}

#[test]
fn test_load_empty_file() {
    let (_temp, catalog) = setup_temp_catalog();
    fs::write(catalog.path(), "").unwrap();

    assert!(catalog.load().unwrap().is_empty());
}

#[test]
fn test_load_ignores_blank_lines() {
    let (_temp, catalog) = setup_temp_catalog();
    fs::write(catalog.path(), "0\n\n1\n").unwrap();

    assert_eq!(catalog.load().unwrap(), vec![1, 0]);
}

#[test]
fn test_load_large_ids() {
    let (_temp, catalog) = setup_temp_catalog();
    catalog.append(u64::MAX - 1).unwrap();

    assert_eq!(catalog.load().unwrap(), vec![u64::MAX - 1]);
}

#[test]
fn test_load_max_id_is_corrupt() {
    let (_temp, catalog) = setup_temp_catalog();
    fs::write(catalog.path(), format!("0\n{}\n", u64::MAX)).unwrap();

    match catalog.load() {
        Err(LsdbError::CatalogCorrupt { line, content }) => {
            assert_eq!(line, 2);
            assert_eq!(content, u64::MAX.to_string());
        }
        other => panic!("expected CatalogCorrupt, got {:?}", other),
    }
}

#[test]
fn test_load_rejects_non_decimal_forms() {
    for contents in [" 7 \n", "+7\n", "7\r\n", "0x7\n", "\t\n"] {
        let (_temp, catalog) = setup_temp_catalog();
        fs::write(catalog.path(), contents).unwrap();

        assert!(
            matches!(catalog.load(), Err(LsdbError::CatalogCorrupt { line: 1, .. })),
            "accepted {:?}",
            contents
        );
    }
}

#[test]
fn test_load_corrupt_line() {
    let (_temp, catalog) = setup_temp_catalog();
    fs::write(catalog.path(), "0\n1\nnot-a-number\n3\n").unwrap();

    match catalog.load() {
        Err(LsdbError::CatalogCorrupt { line, content }) => {
            assert_eq!(line, 3);
            assert_eq!(content, "not-a-number");
        }
        other => panic!("expected CatalogCorrupt, got {:?}", other),
    }
}

#[test]
fn test_load_negative_id_is_corrupt() {
    let (_temp, catalog) = setup_temp_catalog();
    fs::write(catalog.path(), "-1\n").unwrap();

    assert!(matches!(
        catalog.load(),
        Err(LsdbError::CatalogCorrupt { line: 1, .. })
    ));
}

#[test]
fn test_append_after_reload() {
    let (temp, catalog) = setup_temp_catalog();
    catalog.append(0).unwrap();

    let reopened = SegmentCatalog::new(temp.path().join("segments"));
    reopened.append(1).unwrap();

    assert_eq!(reopened.load().unwrap(), vec![1, 0]);
}
