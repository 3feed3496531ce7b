//! Telegram command parsing.

use crate::domain::{Address, Network};

/// Supported bot commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Add { address: Address, network: Network },
    Remove { address: Address, network: Network },
    List,
}

/// Parse error for Telegram command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
    MissingArgument {
        command: &'static str,
        name: &'static str,
    },
    InvalidAddress(String),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "unknown command `{cmd}`"),
            Self::MissingArgument { command, name } => {
                write!(f, "missing argument `{name}` for /{command}")
            }
            Self::InvalidAddress(raw) => write!(f, "invalid address `{raw}`"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a Telegram message into a bot command.
pub fn parse_command(text: &str) -> Result<Command, CommandParseError> {
    let mut parts = text.split_whitespace();
    let Some(raw_command) = parts.next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    // Accept `/add@some_bot` in group chats.
    let command = raw_command
        .split_once('@')
        .map_or(raw_command, |(head, _)| head);

    match command {
        "/start" => Ok(Command::Start),
        "/list" => Ok(Command::List),
        "/add" => {
            let (address, network) = parse_pair_args("add", &mut parts)?;
            Ok(Command::Add { address, network })
        }
        "/remove" => {
            let (address, network) = parse_pair_args("remove", &mut parts)?;
            Ok(Command::Remove { address, network })
        }
        other => Err(CommandParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_pair_args<'a>(
    command: &'static str,
    parts: &mut impl Iterator<Item = &'a str>,
) -> Result<(Address, Network), CommandParseError> {
    let raw_address = parts.next().ok_or(CommandParseError::MissingArgument {
        command,
        name: "address",
    })?;
    let address = Address::parse(raw_address)
        .map_err(|_| CommandParseError::InvalidAddress(raw_address.to_string()))?;
    let network = parts.next().map_or(Network::Mainnet, Network::parse_lenient);
    Ok((address, network))
}

/// Help text returned by `/start`.
#[must_use]
pub const fn command_help() -> &'static str {
    "Hi - Dobby Tracker Bot here.\n\n\
    Commands:\n\
    /add <address> [mainnet|sepolia] - track address (default mainnet)\n\
    /remove <address> [mainnet|sepolia] - stop tracking\n\
    /list - show your tracked addresses\n"
}

/// Bot commands for Telegram menu registration.
///
/// Returns tuples of (command, description) for `set_my_commands`.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("start", "Show help"),
        ("add", "Track an address"),
        ("remove", "Stop tracking an address"),
        ("list", "Show your tracked addresses"),
    ]
}
