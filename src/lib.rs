//! # lsdb
//!
//! A minimal log-structured key-value store with:
//! - A sorted in-memory MemTable with exact size accounting
//! - Size-triggered flushes to immutable, append-only segment files
//! - A persisted segment catalog for crash-safe recovery
//! - Early-exit point lookups across segments, newest first
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    REPL / SharedEngine                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ add / get / close
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Engine                                │
//! │           (flush policy, recovery, point lookup)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────────────────┐
//!   │  MemTable   │  flush   │  Storage                │
//!   │ (BTreeMap)  │ ───────▶ │  SegmentStore (0, 1, …) │
//!   └─────────────┘          │  SegmentCatalog         │
//!                            └─────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod record;
pub mod memtable;
pub mod storage;
pub mod engine;
pub mod shared;
pub mod repl;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LsdbError, Result};
pub use config::Config;
pub use engine::Engine;
pub use shared::SharedEngine;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of lsdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
