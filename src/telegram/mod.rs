//! Telegram notification support
//!
//! One-way notifier: the weekly summary goes out as a single HTML message
//! to the configured chat. No bot commands, no polling.

pub mod formatters;
pub mod notifier;

pub use notifier::TelegramNotifier;
