/// Logger configuration derived from command-line arguments
///
/// Scans CMD_ARGS once at init for --verbose and --debug-<module> flags.
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level threshold (Info by default, Verbose with --verbose)
    pub min_level: LogLevel,
    /// Modules with --debug-<module> enabled
    pub debug_modules: HashSet<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_modules: HashSet::new(),
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Initialize configuration from command-line arguments
pub fn init_from_args() {
    let mut config = LoggerConfig::default();

    if arguments::is_verbose_enabled() {
        config.min_level = LogLevel::Verbose;
    }

    for arg in arguments::get_cmd_args() {
        if let Some(module) = arg.strip_prefix("--debug-") {
            config.debug_modules.insert(module.to_string());
        }
    }

    if let Ok(mut guard) = LOGGER_CONFIG.write() {
        *guard = config;
    }
}

/// Get a copy of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    LOGGER_CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_default()
}

/// Check whether debug output is enabled for a tag
pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let config = get_logger_config();
    config.min_level >= LogLevel::Debug || config.debug_modules.contains(tag.to_debug_key())
}
