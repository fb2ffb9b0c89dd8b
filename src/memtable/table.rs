//! MemTable implementation
//!
//! BTreeMap-based memtable with exact serialized-size accounting.

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::iter::Rev;

use crate::config::DEFAULT_FLUSH_THRESHOLD;
use crate::record;

/// In-memory table for recent writes
#[derive(Debug, Clone)]
pub struct MemTable {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    /// Sum of `record::encoded_len` over every entry
    size: usize,
    /// Size at which the owner should flush this table
    threshold: usize,
}

impl MemTable {
    /// Create a new empty MemTable with the default flush threshold
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_FLUSH_THRESHOLD)
    }

    /// Create a new empty MemTable that asks to be flushed at `threshold` bytes
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            data: BTreeMap::new(),
            size: 0,
            threshold,
        }
    }

    /// Insert or replace the value for `key`
    ///
    /// Returns the new serialized size of the table.
    pub fn insert(&mut self, key: Vec<u8>, value: Vec<u8>) -> usize {
        let added = record::encoded_len(&key, &value);

        match self.data.entry(key) {
            btree_map::Entry::Occupied(mut slot) => {
                let removed = record::encoded_len(slot.key(), slot.get());
                slot.insert(value);
                self.size = self.size - removed + added;
            }
            btree_map::Entry::Vacant(slot) => {
                slot.insert(value);
                self.size += added;
            }
        }

        self.size
    }

    /// Exact-match lookup
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.data.get(key).map(Vec::as_slice)
    }

    /// Concatenate every entry's encoding, largest key first
    ///
    /// This is the byte stream written to a segment file.
    pub fn serialize_descending(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.size);
        for (key, value) in self.iter() {
            record::encode_into(&mut buf, key, value);
        }
        buf
    }

    /// Iterate entries in descending key order
    pub fn iter(&self) -> MemTableIter<'_> {
        MemTableIter {
            inner: self.data.iter().rev(),
        }
    }

    /// Serialized size in bytes
    pub fn size(&self) -> usize {
        self.size
    }

    /// Flush threshold in bytes
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Whether the table has reached its flush threshold
    pub fn should_flush(&self) -> bool {
        self.size >= self.threshold
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for MemTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over MemTable entries, largest key first
pub struct MemTableIter<'a> {
    inner: Rev<btree_map::Iter<'a, Vec<u8>, Vec<u8>>>,
}

impl<'a> Iterator for MemTableIter<'a> {
    type Item = (&'a [u8], &'a [u8]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, value)| (key.as_slice(), value.as_slice()))
    }
}
