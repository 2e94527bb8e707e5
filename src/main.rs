use llamawatch::{
    arguments::{is_help_requested, print_help, set_cmd_args},
    logger::{self, LogTag},
};

/// Main entry point for llamawatch
///
/// Runs the sync scheduler and (unless disabled in config) the HTTP API
/// server until a shutdown signal arrives. `--sync-now` fetches a single
/// snapshot and exits.
#[tokio::main]
async fn main() {
    set_cmd_args(std::env::args().collect());

    // Ensure all directories exist BEFORE logger initialization
    // (Logger needs logs directory to create log files)
    if let Err(e) = llamawatch::paths::ensure_all_directories() {
        eprintln!("❌ Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    // Initialize logger system (now safe to create log files)
    logger::init();

    // Check for help request first (before any other processing)
    if is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    logger::info(
        LogTag::System,
        &format!("🚀 llamawatch {} starting up...", env!("CARGO_PKG_VERSION")),
    );

    match llamawatch::run::run_bot().await {
        Ok(()) => {
            logger::info(LogTag::System, "✅ Shutdown complete");
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ Fatal error: {}", e));
            std::process::exit(1);
        }
    }
}
