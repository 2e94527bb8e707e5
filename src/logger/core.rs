/// Core logging implementation with automatic filtering
///
/// Checks if a log should be displayed based on level and tag, then
/// delegates formatting and writing to the format module.
use super::config::{get_logger_config, is_debug_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Check against minimum log level threshold
/// 3. Debug level requires --debug-<module> flag for that tag
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    let config = get_logger_config();

    if level == LogLevel::Error {
        return true;
    }

    if level == LogLevel::Debug {
        return is_debug_enabled_for_tag(tag);
    }

    level <= config.min_level
}

/// Internal logging function with automatic filtering
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_always_logged() {
        assert!(should_log(&LogTag::System, LogLevel::Error));
        assert!(should_log(&LogTag::Api, LogLevel::Error));
    }

    #[test]
    fn test_debug_gated_by_flag() {
        // No --debug-webserver flag set in tests
        assert!(!should_log(&LogTag::Webserver, LogLevel::Debug));
    }

    #[test]
    fn test_info_logged_by_default() {
        assert!(should_log(&LogTag::Sync, LogLevel::Info));
    }
}
