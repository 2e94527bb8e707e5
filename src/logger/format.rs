//! Log formatting and output with ANSI colors
//!
//! Handles:
//! - Colorized console output with aligned tag and level columns
//! - Dual output (console + file)
//! - Broken pipe handling for piped commands

use super::file::write_to_file;
use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

/// Column width for tag alignment
const TAG_WIDTH: usize = 10;

/// Format and output a log message
pub fn format_and_log(tag: LogTag, level: LogLevel, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();

    let console_line = format!(
        "{} [{}] [{}] {}",
        time.dimmed(),
        format_tag(&tag),
        format_level(level),
        message
    );
    print_stdout_safe(&console_line);

    let file_line = format!(
        "{} [{}] [{}] {}",
        now.format("%Y-%m-%d %H:%M:%S"),
        tag.to_plain_string(),
        level.as_str(),
        message
    );
    write_to_file(&file_line);
}

/// Format a tag with appropriate color
fn format_tag(tag: &LogTag) -> ColoredString {
    let padded = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => padded.bright_yellow().bold(),
        LogTag::Webserver => padded.bright_blue().bold(),
        LogTag::Sync => padded.bright_green().bold(),
        LogTag::Snapshots => padded.bright_cyan().bold(),
        LogTag::Report => padded.bright_magenta().bold(),
        LogTag::Telegram => padded.cyan().bold(),
        LogTag::Api => padded.magenta().bold(),
    }
}

/// Format a level with appropriate color
fn format_level(level: LogLevel) -> ColoredString {
    match level {
        LogLevel::Error => level.as_str().bright_red().bold(),
        LogLevel::Warning => level.as_str().yellow().bold(),
        LogLevel::Info => level.as_str().normal(),
        LogLevel::Debug => level.as_str().dimmed(),
        LogLevel::Verbose => level.as_str().dimmed(),
    }
}

/// Print to stdout, swallowing broken pipe errors (e.g. `llamawatch | head`)
fn print_stdout_safe(line: &str) {
    let mut out = stdout();
    if let Err(e) = writeln!(out, "{}", line) {
        if e.kind() != ErrorKind::BrokenPipe {
            eprintln!("{}", line);
        }
    }
    let _ = out.flush();
}
