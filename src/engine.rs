//! Engine Module
//!
//! The core storage engine that coordinates all components.
//!
//! ## Responsibilities
//! - Route writes into the MemTable
//! - Trigger flushes when the MemTable reaches its threshold
//! - Search MemTable, then segments newest → oldest, on reads
//! - Recover the segment set and next id from the catalog on startup

use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{LsdbError, Result};
use crate::memtable::MemTable;
use crate::storage::{scan_for_key, SegmentCatalog, SegmentStore};

/// The main storage engine
///
/// ## Concurrency Model
///
/// None. Every operation runs to completion on the calling thread and the
/// engine assumes exclusive ownership of its data directory. Writes take
/// `&mut self`; wrap the engine in [`crate::SharedEngine`] to share it.
#[derive(Debug)]
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// In-memory table for recent writes
    memtable: MemTable,

    /// Segment files under the data directory
    store: SegmentStore,

    /// Persisted list of committed segment ids
    catalog: SegmentCatalog,

    /// Committed segment ids, newest first
    segments: VecDeque<u64>,

    /// Id the next flush will be written under
    head: u64,
}

impl Engine {
    /// Open or create an engine with the given config
    ///
    /// On startup:
    /// 1. Create data directory if it doesn't exist
    /// 2. Load the segment catalog (segment contents are not read)
    /// 3. Derive the next segment id from the largest committed id
    /// 4. Start with an empty MemTable
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;

        // Step 1: Create data directory if it doesn't exist
        fs::create_dir_all(&config.data_dir)?;

        // Step 2: Recover committed segments, newest first
        let catalog = SegmentCatalog::new(config.catalog_path());
        let segments: VecDeque<u64> = catalog.load()?.into();

        // Step 3: Next id = max + 1, or 0 if nothing was committed
        let head = match segments.iter().max() {
            Some(&last) => last
                .checked_add(1)
                .ok_or(LsdbError::SegmentIdsExhausted { last })?,
            None => 0,
        };

        info!(
            data_dir = %config.data_dir.display(),
            ?segments,
            head,
            "Recovered segments"
        );

        Ok(Self {
            store: SegmentStore::new(&config.data_dir),
            memtable: MemTable::with_threshold(config.flush_threshold),
            catalog,
            segments,
            head,
            config,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Everything except the data directory comes from `Config::default()`,
    /// including the `DEFAULT_FLUSH_THRESHOLD` of 64 bytes, so nearly every `add` flushes.
    /// Use [`Engine::open`] with a larger `flush_threshold` for real workloads.
    pub fn open_path(path: &Path) -> Result<Self> {
        let config = Config::builder().data_dir(path).build();
        Self::open(config)
    }

    /// Put a key-value pair
    ///
    /// Flushes the MemTable to a new segment once its size reaches the
    /// configured threshold.
    pub fn add(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.memtable.insert(key.to_vec(), value.to_vec());

        if self.memtable.should_flush() {
            self.flush_internal()?;
        }

        Ok(())
    }

    /// Get a value by key
    ///
    /// Search order:
    /// 1. MemTable (most recent writes)
    /// 2. Segments (newest to oldest), first hit wins
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        if let Some(value) = self.memtable.get(key) {
            return Ok(Some(value.to_vec()));
        }

        for &id in &self.segments {
            debug!(segment = id, key = %String::from_utf8_lossy(key), "Searching segment");

            let bytes = self.store.read(id).map_err(|e| {
                error!(segment = id, error = %e, "Catalog lists a segment that cannot be read");
                e
            })?;

            if let Some(value) = scan_for_key(&bytes, key)? {
                return Ok(Some(value.to_vec()));
            }
        }

        Ok(None)
    }

    /// Flush memtable to disk (public API)
    ///
    /// Forces a flush regardless of memtable size. Returns the id of the new
    /// segment, or `None` if the MemTable was empty and `skip_empty_flush`
    /// is set.
    pub fn flush(&mut self) -> Result<Option<u64>> {
        self.flush_internal()
    }

    /// Close the engine, flushing whatever the MemTable holds
    pub fn close(mut self) -> Result<()> {
        self.flush_internal()?;
        info!(head = self.head, "Engine closed");
        Ok(())
    }

    /// Serialize MemTable → write segment → commit to catalog → swap MemTable
    fn flush_internal(&mut self) -> Result<Option<u64>> {
        if self.memtable.is_empty() && self.config.skip_empty_flush {
            return Ok(None);
        }

        let id = self.head;
        // Refuse before writing: committing the last id would leave no head
        let next = id
            .checked_add(1)
            .ok_or(LsdbError::SegmentIdsExhausted { last: id })?;

        info!(
            segment = id,
            size = self.memtable.size(),
            threshold = self.memtable.threshold(),
            "Flushing memtable"
        );

        // Step 1: Write the segment file
        let data = self.memtable.serialize_descending();
        let written = self.store.write(id, &data)?;

        // Step 2: Commit it; only now is the segment visible to recovery
        self.catalog.append(id)?;

        // Step 3: Advance in-memory state
        self.head = next;
        self.memtable = MemTable::with_threshold(self.config.flush_threshold);
        self.segments.push_front(id);

        info!(
            segment = id,
            bytes = written,
            path = %self.store.path(id).display(),
            "Wrote segment"
        );

        Ok(Some(id))
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Id the next flush will use
    pub fn head(&self) -> u64 {
        self.head
    }

    /// Committed segment ids, newest first
    pub fn segment_ids(&self) -> Vec<u64> {
        self.segments.iter().copied().collect()
    }

    /// Get the number of committed segments
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Get the current memtable size
    pub fn memtable_size(&self) -> usize {
        self.memtable.size()
    }

    /// Get the memtable entry count
    pub fn memtable_len(&self) -> usize {
        self.memtable.len()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
