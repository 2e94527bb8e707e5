//! Snapshot persistence and selection
//!
//! A snapshot is one full capture of the DeFiLlama protocol list, stored as
//! a timestamped JSON file in the data directory. This module owns the file
//! naming/parsing, the newest-first listing, the "about a week ago" pick,
//! and the cached file store. Snapshots are immutable once written.

pub mod cache;
pub mod date_parse;
pub mod selector;
pub mod store;
pub mod types;

pub use date_parse::parse_snapshot_date;
pub use selector::pick_near_days_ago;
pub use store::SnapshotStore;
pub use types::{ProtocolRecord, SnapshotMeta};
