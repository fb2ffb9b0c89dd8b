//! Segment Catalog
//!
//! Append-only list of committed segment ids, one decimal id per line in
//! creation order. A segment only becomes visible once its id is appended.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::{LsdbError, Result};

/// Handle to the catalog file
#[derive(Debug, Clone)]
pub struct SegmentCatalog {
    path: PathBuf,
}

impl SegmentCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load all committed ids, most recent first
    ///
    /// A missing catalog file means no segments have been committed yet.
    pub fn load(&self) -> Result<Vec<u64>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Self::parse(&contents)?;
        ids.reverse();
        Ok(ids)
    }

    /// Commit a segment id by appending it to the catalog
    pub fn append(&self, id: u64) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(format!("{}\n", id).as_bytes())?;

        Ok(())
    }

    /// Path of the catalog file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse catalog contents into ids in creation order
    ///
    /// Empty lines (including the one after the trailing newline) are skipped.
    /// Every other line must be plain ASCII digits: no sign, padding or `\r`.
    /// `u64::MAX` is rejected since no id could follow it.
    fn parse(contents: &str) -> Result<Vec<u64>> {
        contents
            .split('\n')
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(idx, line)| {
                let corrupt = || LsdbError::CatalogCorrupt {
                    line: idx + 1,
                    content: line.to_string(),
                };

                if !line.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(corrupt());
                }

                match line.parse::<u64>() {
                    Ok(id) if id < u64::MAX => Ok(id),
                    _ => Err(corrupt()),
                }
            })
            .collect()
    }
}
