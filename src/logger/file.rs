//! File persistence for log output
//!
//! Appends every log line to a daily log file under the logs directory.
//! File I/O failures are swallowed: logging must never take the service down.

use crate::paths;
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

/// Shared handle to the current log file (None until init or on open failure)
static LOG_FILE: Lazy<Mutex<Option<std::fs::File>>> = Lazy::new(|| Mutex::new(None));

/// Open the daily log file for appending
pub fn init_file_logging() {
    let filename = format!("llamawatch_{}.log", Local::now().format("%Y-%m-%d"));
    let path = paths::get_logs_directory().join(filename);

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            if let Ok(mut guard) = LOG_FILE.lock() {
                *guard = Some(file);
            }
        }
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
        }
    }
}

/// Append one line to the log file (no-op when file logging is unavailable)
pub fn write_to_file(line: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(file) = guard.as_mut() {
            let _ = writeln!(file, "{}", line);
        }
    }
}
