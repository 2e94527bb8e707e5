//! Structured logging for llamawatch
//!
//! Provides a small logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via --debug-<module> flags
//! - Dual output: colored console + file persistence under logs/
//!
//! ## Usage
//!
//! ```rust,ignore
//! use llamawatch::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "Request failed");
//! logger::warning(LogTag::Snapshots, "Skipping unparseable file");
//! logger::info(LogTag::Sync, "Snapshot saved");
//! logger::debug(LogTag::Webserver, "Request details: ..."); // Only if --debug-webserver
//! ```
//!
//! Call `logger::init()` once at startup, after the logs directory exists.

mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{get_logger_config, LoggerConfig};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// Parses command-line arguments for debug flags and opens the log file.
/// Call once in main.rs before starting services.
pub fn init() {
    config::init_from_args();
    file::init_file_logging();
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (default operational messages)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (gated by --debug-<module>)
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (gated by --verbose)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}
