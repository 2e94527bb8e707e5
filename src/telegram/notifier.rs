//! Telegram notifier for sending messages
//!
//! Provides the core message sending functionality.

use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};

use crate::config::with_config;
use crate::logger::{self, LogTag};

/// Telegram notifier for sending messages
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    /// Create a new Telegram notifier
    ///
    /// # Arguments
    /// * `bot_token` - Telegram bot token from @BotFather
    /// * `chat_id` - Chat ID to send notifications to
    pub fn new(bot_token: &str, chat_id: &str) -> Result<Self, String> {
        if bot_token.is_empty() {
            return Err("Bot token is empty".to_string());
        }

        if chat_id.is_empty() {
            return Err("Chat ID is empty".to_string());
        }

        let chat_id_parsed: i64 = chat_id
            .parse()
            .map_err(|e| format!("Invalid chat ID '{}': {}", chat_id, e))?;

        let bot = Bot::new(bot_token);

        Ok(Self {
            bot,
            chat_id: ChatId(chat_id_parsed),
        })
    }

    /// Create a notifier from config
    pub fn from_config() -> Result<Self, String> {
        let config = with_config(|c| c.telegram.clone());
        Self::new(&config.bot_token, &config.chat_id)
    }

    /// Send a plain text message (HTML parse mode)
    pub async fn send_message(&self, message: &str) -> Result<(), String> {
        self.bot
            .send_message(self.chat_id, message)
            .parse_mode(ParseMode::Html)
            .send()
            .await
            .map_err(|e| format!("Failed to send Telegram message: {}", e))?;

        logger::debug(
            LogTag::Telegram,
            &format!("Sent Telegram notification (length={})", message.len()),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_credentials_rejected() {
        assert!(TelegramNotifier::new("", "123").is_err());
        assert!(TelegramNotifier::new("token", "").is_err());
    }

    #[test]
    fn test_non_numeric_chat_id_rejected() {
        assert!(TelegramNotifier::new("token", "@channel").is_err());
    }

    #[test]
    fn test_valid_credentials_accepted() {
        assert!(TelegramNotifier::new("123:abc", "-1001234").is_ok());
    }
}
