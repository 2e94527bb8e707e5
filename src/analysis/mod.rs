//! Snapshot comparison and reporting engine
//!
//! Pure, synchronous functions over already-loaded protocol lists: no I/O,
//! no shared state, deterministic output for a given input. The webserver
//! and the sync scheduler both call in here.

pub mod compare;
pub mod format;
pub mod markdown;
pub mod report;
pub mod stats;

pub use compare::{compare_snapshots, ComparisonResult, FilterCriteria, ProtocolEntry};
pub use format::{format_percentage, pretty_usd};
pub use markdown::create_markdown_report;
pub use report::{build_report, ReportMetadata, TvlReport};
pub use stats::{global_stats, GlobalStats};
