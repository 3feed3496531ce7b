//! Inbound command worker.
//!
//! Long-polls Telegram for messages and turns recognized commands into
//! subscription store operations. Validation problems come back to the
//! user as plain corrective text; store failures are logged and the
//! user sees a generic retry message, never internal error text.

use std::sync::Arc;

use teloxide::requests::{Requester, ResponseResult};
use teloxide::respond;
use teloxide::types::{BotCommand, Message};
use teloxide::Bot;
use tracing::{error, info, warn};

use super::command::{bot_commands, command_help, parse_command, Command, CommandParseError};
use crate::domain::UserId;
use crate::port::SubscriptionStore;

/// Run the Telegram command loop. Blocks until the process shuts down.
pub async fn run_command_worker(bot: Bot, store: Arc<dyn SubscriptionStore>) {
    // Register commands with Telegram so they appear in the "/" menu.
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "failed to register bot commands with Telegram");
    }

    info!("Telegram command listener started");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let store = store.clone();
        async move {
            handle_message(&bot, &msg, store.as_ref()).await
        }
    })
    .await;
}

async fn handle_message(
    bot: &Bot,
    msg: &Message,
    store: &dyn SubscriptionStore,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return respond(());
    };

    let user = UserId(msg.chat.id.0);
    if let Some(reply) = command_reply(text, user, store) {
        if let Err(e) = bot.send_message(msg.chat.id, reply).await {
            error!(error = %e, chat = user.0, "failed to send command response");
        }
    }

    respond(())
}

/// Produce the reply for one inbound message, or `None` for messages
/// the bot silently ignores (plain text, unknown commands).
fn command_reply(text: &str, user: UserId, store: &dyn SubscriptionStore) -> Option<String> {
    match parse_command(text) {
        Ok(Command::Start) => {
            if let Err(e) = store.ensure_user(user) {
                error!(error = %e, user = user.0, "failed to record user");
            }
            Some(command_help().to_string())
        }
        Ok(Command::Add { address, network }) => {
            Some(match store.add_subscription(user, &address, network) {
                Ok(true) => format!("✅ Tracking {address} on {network}."),
                Ok(false) => {
                    format!("ℹ️ {address} is already tracked on {network} for you.")
                }
                Err(e) => {
                    error!(error = %e, user = user.0, "add subscription failed");
                    "Something went wrong saving that address. Please try again.".to_string()
                }
            })
        }
        Ok(Command::Remove { address, network }) => {
            Some(match store.remove_subscription(user, &address, network) {
                Ok(true) => format!("✅ Removed {address} from {network}."),
                Ok(false) => "That address wasn't in your list.".to_string(),
                Err(e) => {
                    error!(error = %e, user = user.0, "remove subscription failed");
                    "Something went wrong removing that address. Please try again.".to_string()
                }
            })
        }
        Ok(Command::List) => Some(match store.subscriptions_for(user) {
            Ok(rows) if rows.is_empty() => {
                "You have no tracked addresses. Use /add to start.".to_string()
            }
            Ok(rows) => {
                let lines: Vec<String> = rows
                    .iter()
                    .map(|(address, network)| format!("{address} - {network}"))
                    .collect();
                format!("Your tracked addresses:\n{}", lines.join("\n"))
            }
            Err(e) => {
                error!(error = %e, user = user.0, "list subscriptions failed");
                "Something went wrong reading your list. Please try again.".to_string()
            }
        }),
        Err(CommandParseError::MissingArgument { command, .. }) => {
            Some(format!("Usage: /{command} <0xaddress> [mainnet|sepolia]"))
        }
        Err(CommandParseError::InvalidAddress(_)) => Some(
            "Not a valid Ethereum address. It should be 0x followed by 40 hex characters."
                .to_string(),
        ),
        Err(CommandParseError::NotACommand | CommandParseError::UnknownCommand(_)) => None,
    }
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();
    bot.set_my_commands(commands).await?;
    Ok(())
}
