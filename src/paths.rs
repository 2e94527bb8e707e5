//! Centralized path resolution for llamawatch
//!
//! All file and directory paths are resolved through this module to ensure
//! consistent behavior across platforms.
//!
//! ## Path Strategy
//!
//! - **macOS**: `~/Library/Application Support/llamawatch/`
//! - **Windows**: `%LOCALAPPDATA%\llamawatch\`
//! - **Linux**: `$XDG_DATA_HOME/llamawatch/` (fallback `~/.local/share/llamawatch/`)
//!
//! The `LLAMAWATCH_DATA_DIR` environment variable overrides the snapshot
//! data directory, which keeps tests and ad-hoc runs away from real data.
//!
//! ## Directory Structure
//!
//! ```text
//! llamawatch/
//! ├── data/
//! │ ├── config.toml
//! │ └── *.json (timestamped snapshots)
//! └── logs/
//! └── llamawatch_*.log
//! ```

use once_cell::sync::Lazy;
use std::path::PathBuf;

// =============================================================================
// BASE DIRECTORY RESOLUTION
// =============================================================================

/// Lazy-initialized base directory (thread-safe)
static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

/// Resolves the base directory for all llamawatch data
fn resolve_base_directory() -> PathBuf {
  const APP_DIR: &str = "llamawatch";

  if let Some(dir) = dirs::data_local_dir() {
    return dir.join(APP_DIR);
  }

  if let Some(dir) = dirs::data_dir() {
    return dir.join(APP_DIR);
  }

  if let Some(home) = dirs::home_dir() {
    return home.join(APP_DIR);
  }

  PathBuf::from(APP_DIR)
}

// =============================================================================
// PRIMARY DIRECTORY ACCESSORS
// =============================================================================

/// Returns the base directory for all llamawatch data
pub fn get_base_directory() -> PathBuf {
  BASE_DIRECTORY.clone()
}

/// Returns the snapshot data directory path
///
/// Contains the config file and the timestamped snapshot JSON files.
/// Honors the `LLAMAWATCH_DATA_DIR` environment override.
pub fn get_data_directory() -> PathBuf {
  if let Ok(dir) = std::env::var("LLAMAWATCH_DATA_DIR") {
    if !dir.is_empty() {
      return PathBuf::from(dir);
    }
  }
  BASE_DIRECTORY.join("data")
}

/// Returns the logs directory path
pub fn get_logs_directory() -> PathBuf {
  BASE_DIRECTORY.join("logs")
}

// =============================================================================
// CONFIGURATION FILE PATHS
// =============================================================================

/// Returns the main configuration file path
pub fn get_config_path() -> PathBuf {
  get_data_directory().join("config.toml")
}

// =============================================================================
// DIRECTORY CREATION
// =============================================================================

/// Creates all required directories if they do not exist
///
/// Must run before logger initialization (file logging needs the logs dir).
pub fn ensure_all_directories() -> Result<(), String> {
  let dirs = [get_data_directory(), get_logs_directory()];

  for dir in &dirs {
    std::fs::create_dir_all(dir)
      .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))?;
  }

  Ok(())
}
