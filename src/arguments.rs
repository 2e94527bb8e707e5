/// Centralized argument handling system for llamawatch
///
/// Consolidates all command-line argument parsing and debug flag checking.
///
/// Features:
/// - Centralized CMD_ARGS storage with thread-safe access
/// - Debug flag checking functions for all modules
/// - Webserver host/port override flags
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
/// Thread-safe singleton that stores arguments for access throughout the application
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
/// Returns a vector clone to avoid holding the mutex lock
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => {
            // Fallback to env::args if mutex is poisoned
            env::args().collect()
        }
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// =============================================================================

/// Webserver module debug mode
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver")
}

/// Snapshot sync debug mode
pub fn is_debug_sync_enabled() -> bool {
    has_arg("--debug-sync")
}

/// Snapshot store / date parsing debug mode
pub fn is_debug_snapshots_enabled() -> bool {
    has_arg("--debug-snapshots")
}

/// Telegram notifier debug mode
pub fn is_debug_telegram_enabled() -> bool {
    has_arg("--debug-telegram")
}

/// Global verbose mode
pub fn is_verbose_enabled() -> bool {
    has_arg("--verbose")
}

// =============================================================================
// WEBSERVER OVERRIDES
// =============================================================================

/// Webserver port override (--port <n>)
pub fn get_port_override() -> Option<u16> {
    get_arg_value("--port").and_then(|v| v.parse().ok())
}

/// Webserver host override (--host <addr>)
pub fn get_host_override() -> Option<String> {
    get_arg_value("--host")
}

/// Validate the --port argument if present
///
/// A present-but-unparseable value is an error; an absent flag is fine.
pub fn validate_port_argument() -> Result<(), String> {
    match get_arg_value("--port") {
        None => Ok(()),
        Some(raw) => match raw.parse::<u16>() {
            Ok(0) => Err("Invalid --port value: 0".to_string()),
            Ok(_) => Ok(()),
            Err(_) => Err(format!("Invalid --port value: '{}'", raw)),
        },
    }
}

// =============================================================================
// HELP
// =============================================================================

/// Check if help was requested
pub fn is_help_requested() -> bool {
    has_arg("--help") || has_arg("-h")
}

/// Print usage information
pub fn print_help() {
    println!("llamawatch - DeFi TVL snapshot tracker");
    println!();
    println!("USAGE:");
    println!("    llamawatch [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --host <addr>         Webserver bind address (default 127.0.0.1)");
    println!("    --port <n>            Webserver port (default 8080)");
    println!("    --sync-now            Fetch one snapshot and exit");
    println!("    --verbose             Enable verbose logging");
    println!("    --debug-webserver     Webserver debug logging");
    println!("    --debug-sync          Sync scheduler debug logging");
    println!("    --debug-snapshots     Snapshot store debug logging");
    println!("    --debug-telegram      Telegram notifier debug logging");
    println!("    -h, --help            Show this help");
}

/// One-shot sync mode (--sync-now): fetch, save, exit
pub fn is_sync_now_enabled() -> bool {
    has_arg("--sync-now")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_value_lookup() {
        set_cmd_args(vec![
            "llamawatch".to_string(),
            "--port".to_string(),
            "9090".to_string(),
        ]);
        assert_eq!(get_arg_value("--port"), Some("9090".to_string()));
        assert_eq!(get_port_override(), Some(9090));
        assert!(get_arg_value("--host").is_none());
        set_cmd_args(vec!["llamawatch".to_string()]);
    }
}
