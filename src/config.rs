//! Configuration for lsdb
//!
//! Centralized configuration with sensible defaults.

use std::path::{Path, PathBuf};

use crate::error::{LsdbError, Result};

/// Default memtable flush threshold in bytes
pub const DEFAULT_FLUSH_THRESHOLD: usize = 64;

/// Main configuration for an lsdb instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all data files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── segments     (catalog: one segment id per line)
    ///     ├── 0            (segment files, named by id)
    ///     └── 1 ...
    pub data_dir: PathBuf,

    // -------------------------------------------------------------------------
    // MemTable Configuration
    // -------------------------------------------------------------------------
    /// Serialized memtable size (in bytes) at which a flush is triggered
    pub flush_threshold: usize,

    /// When set, flushing an empty memtable is a no-op instead of writing
    /// an empty segment
    pub skip_empty_flush: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./lsdb_data"),
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            skip_empty_flush: false,
        }
    }
}

impl Config {
    /// Name of the catalog file inside the data directory
    pub const CATALOG_FILENAME: &'static str = "segments";

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the configuration can drive an engine
    pub fn validate(&self) -> Result<()> {
        if self.flush_threshold == 0 {
            return Err(LsdbError::Config(
                "flush_threshold must be at least 1 byte".to_string(),
            ));
        }
        Ok(())
    }

    /// Path of the segment catalog file
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(Self::CATALOG_FILENAME)
    }

    /// Path of the segment file with the given id
    pub fn segment_path(&self, id: u64) -> PathBuf {
        segment_path_in(&self.data_dir, id)
    }
}

/// Segment files are named by their decimal id
pub(crate) fn segment_path_in(dir: &Path, id: u64) -> PathBuf {
    dir.join(id.to_string())
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all storage)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the memtable flush threshold (in bytes)
    pub fn flush_threshold(mut self, bytes: usize) -> Self {
        self.config.flush_threshold = bytes;
        self
    }

    /// Skip writing a segment when flushing an empty memtable
    pub fn skip_empty_flush(mut self, skip: bool) -> Self {
        self.config.skip_empty_flush = skip;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
