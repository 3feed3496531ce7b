//! Notification transport port.

use async_trait::async_trait;

use crate::domain::UserId;
use crate::error::Result;

/// Delivers one rendered message to one subscriber.
///
/// Delivery is best-effort and attempted independently per recipient;
/// the caller logs failures (blocked bot, dead chat) and moves on to
/// the remaining recipients.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, user: UserId, text: &str) -> Result<()>;
}
