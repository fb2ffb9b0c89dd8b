//! Storage Module
//!
//! Persistent storage layer: immutable segment files plus the catalog that
//! commits them.
//!
//! ## Responsibilities
//! - Write a serialized memtable as a new segment
//! - Read segments back and scan them for a key
//! - Track which segments exist, in creation order
//!
//! ## Directory Layout
//! ```text
//! {data_dir}/
//!   ├── segments      catalog: "0\n1\n2\n" (creation order, trailing newline)
//!   ├── 0             segment files, named by decimal id
//!   ├── 1
//!   └── 2
//! ```
//!
//! ## Segment Format
//! ```text
//! ┌────────────────────────────────────────┐
//! │ Record (largest key)                   │
//! │ ┌────────┬────────┬─────┬───────────┐  │
//! │ │KeyLen 8│ValLen 8│ Key │   Value   │  │
//! │ └────────┴────────┴─────┴───────────┘  │
//! ├────────────────────────────────────────┤
//! │ ... (strictly descending keys)         │
//! ├────────────────────────────────────────┤
//! │ Record (smallest key)                  │
//! └────────────────────────────────────────┘
//! ```
//! No header, index, footer or checksum.

mod catalog;
mod segment;

pub use catalog::SegmentCatalog;
pub use segment::{scan_for_key, SegmentStore};
