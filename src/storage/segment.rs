//! Segment Store
//!
//! Writes and reads immutable segment files, and performs the early-exit
//! point lookup within one segment's bytes.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::segment_path_in;
use crate::error::{LsdbError, Result};
use crate::record::{compare_key, RecordIter};

/// Owns the directory that segment files live in
#[derive(Debug, Clone)]
pub struct SegmentStore {
    dir: PathBuf,
}

impl SegmentStore {
    /// Create a store rooted at `dir` (the directory must already exist)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write `bytes` as the segment with the given id
    ///
    /// A leftover file with the same id (from a flush that never reached the
    /// catalog) is truncated first. Returns the number of bytes written.
    pub fn write(&self, id: u64, bytes: &[u8]) -> Result<usize> {
        let path = self.path(id);
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        file.write_all(bytes)?;

        Ok(bytes.len())
    }

    /// Read the full contents of a segment
    pub fn read(&self, id: u64) -> Result<Vec<u8>> {
        fs::read(self.path(id)).map_err(|source| LsdbError::SegmentUnavailable { id, source })
    }

    /// Whether a file exists for the given id
    pub fn exists(&self, id: u64) -> bool {
        self.path(id).is_file()
    }

    /// Path of the segment file with the given id
    pub fn path(&self, id: u64) -> PathBuf {
        segment_path_in(&self.dir, id)
    }

    /// Directory holding the segment files
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Look up `key` in a segment's bytes
///
/// Records are stored in strictly descending key order, so the scan stops as
/// soon as the lookup key is greater than the current record's key.
///
/// Returns:
/// - `Ok(Some(value))` — key found
/// - `Ok(None)` — key not in this segment
/// - `Err(MalformedRecord)` — the bytes are corrupt before a decision was reached
pub fn scan_for_key<'a>(bytes: &'a [u8], key: &[u8]) -> Result<Option<&'a [u8]>> {
    for item in RecordIter::new(bytes) {
        let (_, record) = item?;

        match compare_key(key, &record) {
            std::cmp::Ordering::Equal => return Ok(Some(record.value)),
            std::cmp::Ordering::Greater => return Ok(None),
            std::cmp::Ordering::Less => continue,
        }
    }

    Ok(None)
}
