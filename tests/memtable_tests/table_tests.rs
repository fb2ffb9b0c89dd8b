//! MemTable Tests
//!
//! Tests verify:
//! - Basic insert/get operations
//! - Exact size tracking, including overwrites
//! - Descending iteration and serialization
//! - Flush threshold

use lsdb::memtable::MemTable;
use lsdb::record::{self, RecordIter, HEADER_SIZE};

/// Sum of encoded lengths of the table's current contents
fn expected_size(memtable: &MemTable) -> usize {
    memtable
        .iter()
        .map(|(key, value)| record::encoded_len(key, value))
        .sum()
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_memtable_is_empty() {
    let memtable = MemTable::new();
    assert_eq!(memtable.len(), 0);
    assert_eq!(memtable.size(), 0);
    assert!(memtable.is_empty());
}

#[test]
fn test_insert_and_get() {
    let mut memtable = MemTable::new();

    memtable.insert(b"a".to_vec(), b"alphabet".to_vec());

    assert_eq!(memtable.get(b"a"), Some(&b"alphabet"[..]));
}

#[test]
fn test_get_nonexistent_key() {
    let mut memtable = MemTable::new();
    assert_eq!(memtable.get(b"nonexistent"), None);

    memtable.insert(b"other".to_vec(), b"value".to_vec());
    assert_eq!(memtable.get(b"nonexistent"), None);
}

#[test]
fn test_insert_overwrites_existing() {
    let mut memtable = MemTable::new();

    memtable.insert(b"a".to_vec(), b"alphabet".to_vec());
    memtable.insert(b"a".to_vec(), b"alpaca".to_vec());

    assert_eq!(memtable.len(), 1);
    assert_eq!(memtable.get(b"a"), Some(&b"alpaca"[..]));
}

// =============================================================================
// Size Tracking Tests
// =============================================================================

#[test]
fn test_size_counts_header_key_and_value() {
    let mut memtable = MemTable::new();

    let size = memtable.insert(b"key".to_vec(), b"value".to_vec());

    assert_eq!(size, HEADER_SIZE + 3 + 5);
    assert_eq!(memtable.size(), size);
}

#[test]
fn test_size_shrinks_on_smaller_overwrite() {
    let mut memtable = MemTable::new();

    memtable.insert(b"a".to_vec(), b"alphabet".to_vec());
    let size = memtable.insert(b"a".to_vec(), b"al".to_vec());

    assert_eq!(size, HEADER_SIZE + 1 + 2);
}

#[test]
fn test_size_grows_on_larger_overwrite() {
    let mut memtable = MemTable::new();

    memtable.insert(b"a".to_vec(), b"x".to_vec());
    let size = memtable.insert(b"a".to_vec(), b"xxxxxxxxxx".to_vec());

    assert_eq!(size, HEADER_SIZE + 1 + 10);
}

#[test]
fn test_size_invariant_after_mixed_inserts() {
    let mut memtable = MemTable::with_threshold(usize::MAX);

    for round in 0..5 {
        for i in 0..20 {
            let key = format!("key{:02}", (i * 7 + round) % 13);
            let value = "v".repeat((i + round) % 9);
            memtable.insert(key.into_bytes(), value.into_bytes());
        }
        assert_eq!(memtable.size(), expected_size(&memtable));
    }

    assert_eq!(memtable.len(), 13);
}

// =============================================================================
// Ordering / Serialization Tests
// =============================================================================

#[test]
fn test_iter_is_descending() {
    let mut memtable = MemTable::new();
    for key in ["b", "d", "a", "c"] {
        memtable.insert(key.as_bytes().to_vec(), b"v".to_vec());
    }

    let keys: Vec<&[u8]> = memtable.iter().map(|(k, _)| k).collect();

    assert_eq!(keys, vec![&b"d"[..], &b"c"[..], &b"b"[..], &b"a"[..]]);
}

#[test]
fn test_serialize_descending_decodes_strictly_decreasing() {
    let mut memtable = MemTable::with_threshold(usize::MAX);
    for i in [5, 3, 9, 1, 7, 3, 0] {
        let key = format!("k{}", i);
        memtable.insert(key.into_bytes(), format!("v{}", i).into_bytes());
    }

    let bytes = memtable.serialize_descending();
    assert_eq!(bytes.len(), memtable.size());

    let keys: Vec<Vec<u8>> = RecordIter::new(&bytes)
        .map(|r| r.unwrap().1.key.to_vec())
        .collect();

    assert_eq!(keys.len(), memtable.len());
    for pair in keys.windows(2) {
        assert!(pair[0] > pair[1], "keys not strictly descending: {:?}", pair);
    }
}

#[test]
fn test_serialize_empty() {
    let memtable = MemTable::new();
    assert!(memtable.serialize_descending().is_empty());
}

// =============================================================================
// Threshold Tests
// =============================================================================

#[test]
fn test_should_flush_at_threshold() {
    let mut memtable = MemTable::with_threshold(HEADER_SIZE + 2);
    assert_eq!(memtable.threshold(), HEADER_SIZE + 2);

    memtable.insert(b"a".to_vec(), Vec::new());
    assert!(!memtable.should_flush());

    memtable.insert(b"b".to_vec(), Vec::new());
    assert!(memtable.should_flush());
}
