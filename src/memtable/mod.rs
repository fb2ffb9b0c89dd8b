//! MemTable Module
//!
//! In-memory data structure for recent writes.
//!
//! ## Responsibilities
//! - Fast reads and writes in memory
//! - Track serialized size for flush triggers
//! - Descending-order serialization for segment creation
//!
//! ## Data Structure Choice
//! Using BTreeMap:
//! - Ordered keys (segments are written in descending key order)
//! - O(log n) insert and lookup on the write path
//! - Owned exclusively by the engine, so no interior locking

mod table;

pub use table::{MemTable, MemTableIter};
