//! Telegram transport: inbound command surface and outbound notifier.

mod bot;
mod command;
mod notifier;

pub use bot::run_command_worker;
pub use command::{parse_command, Command, CommandParseError};
pub use notifier::TelegramNotifier;
