//! Shared Engine
//!
//! Thread-safe handle around an [`Engine`].
//!
//! ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
//!
//! - **Writes** (add/flush/close): exclusive write lock. The MemTable insert
//!   and any flush it triggers (segment write, catalog append, MemTable swap)
//!   complete as one unit before another thread observes the engine.
//! - **Reads** (get): shared read lock, many concurrent readers.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::Result;

/// Cloneable, thread-safe engine handle
#[derive(Debug, Clone)]
pub struct SharedEngine {
    inner: Arc<RwLock<Engine>>,
}

impl SharedEngine {
    /// Open an engine and wrap it for sharing
    pub fn open(config: Config) -> Result<Self> {
        Ok(Self::new(Engine::open(config)?))
    }

    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(engine)),
        }
    }

    pub fn add(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.inner.write().add(key, value)
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.inner.read().get(key)
    }

    pub fn flush(&self) -> Result<Option<u64>> {
        self.inner.write().flush()
    }

    /// Flush pending writes
    ///
    /// Other handles stay usable; later writes land in a fresh MemTable.
    pub fn close(&self) -> Result<()> {
        self.inner.write().flush().map(|_| ())
    }

    /// Number of committed segments
    pub fn segment_count(&self) -> usize {
        self.inner.read().segment_count()
    }

    /// Id the next flush will use
    pub fn head(&self) -> u64 {
        self.inner.read().head()
    }
}
