//! Outbound Telegram notifier.

use async_trait::async_trait;
use teloxide::requests::Requester;
use teloxide::types::ChatId;
use teloxide::Bot;

use crate::domain::UserId;
use crate::error::Result;
use crate::port::Notifier;

/// Sends plain-text notifications to individual chats.
pub struct TelegramNotifier {
    bot: Bot,
}

impl TelegramNotifier {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, user: UserId, text: &str) -> Result<()> {
        self.bot.send_message(ChatId(user.0), text).await?;
        Ok(())
    }
}
