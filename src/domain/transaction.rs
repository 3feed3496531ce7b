//! Transaction records as reported by the block explorer.
//!
//! These are ephemeral: fetched fresh each poll and never persisted
//! beyond the watermark.

use std::fmt;

use chrono::DateTime;

use super::Address;

/// Discriminates the two explorer feeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxKind {
    /// Direct transfer of the chain's base asset.
    Native,
    /// ERC-20 transfer, with the token's own display metadata.
    Token {
        symbol: String,
        name: String,
        decimals: u32,
    },
}

/// Direction of a transaction relative to a tracked address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Incoming,
    Outgoing,
    Other,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Incoming => "INCOMING",
            Self::Outgoing => "OUTGOING",
            Self::Other => "OTHER",
        })
    }
}

/// One transaction touching a tracked address.
///
/// `value`, `gas_used` and `gas_price` are kept as the raw decimal
/// strings Etherscan returns; wei amounts overflow u64 routinely and are
/// only ever formatted, never computed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    pub to: String,
    /// Unix seconds.
    pub timestamp: i64,
    /// Raw integer amount in base units (wei for native transfers).
    pub value: String,
    pub gas_used: String,
    pub gas_price: String,
    pub kind: TxKind,
}

impl Transaction {
    /// Direction relative to the tracked address, case-insensitive.
    #[must_use]
    pub fn direction(&self, address: &Address) -> Direction {
        if address.matches(&self.from) {
            Direction::Outgoing
        } else if address.matches(&self.to) {
            Direction::Incoming
        } else {
            Direction::Other
        }
    }

    /// Human-readable amount, e.g. `"0.150000 ETH"` or `"USDC 12.5"`.
    #[must_use]
    pub fn amount_line(&self) -> String {
        match &self.kind {
            TxKind::Native => format!("{} ETH", format_units_fixed(&self.value, 18, 6)),
            TxKind::Token { symbol, decimals, .. } => {
                format!("{symbol} {}", format_units(&self.value, *decimals))
            }
        }
    }

    /// Timestamp rendered as `YYYY-MM-DD HH:MM:SS UTC`.
    #[must_use]
    pub fn time_utc(&self) -> String {
        DateTime::from_timestamp(self.timestamp, 0)
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| self.timestamp.to_string())
    }
}

/// Split a raw base-unit integer into whole and fractional digit strings.
///
/// Pure digit-string arithmetic: exact for any magnitude and any number
/// of decimals. Returns `None` when `raw` is not a plain decimal integer.
fn split_units(raw: &str, decimals: usize) -> Option<(String, String)> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = raw.trim_start_matches('0');
    let (whole, frac) = if digits.len() > decimals {
        let (w, f) = digits.split_at(digits.len() - decimals);
        (w.to_string(), f.to_string())
    } else {
        ("0".to_string(), format!("{digits:0>decimals$}"))
    };
    Some((whole, frac))
}

/// Format a raw base-unit amount scaled by `10^decimals`, trailing
/// zeros trimmed. Non-numeric input is passed through unchanged.
#[must_use]
pub fn format_units(raw: &str, decimals: u32) -> String {
    let Some((whole, frac)) = split_units(raw, decimals as usize) else {
        return raw.to_string();
    };
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole
    } else {
        format!("{whole}.{frac}")
    }
}

/// Format a raw base-unit amount with a fixed number of fractional
/// places (truncating, not rounding).
#[must_use]
pub fn format_units_fixed(raw: &str, decimals: u32, places: usize) -> String {
    let Some((whole, mut frac)) = split_units(raw, decimals as usize) else {
        return raw.to_string();
    };
    frac.truncate(places);
    if frac.len() < places {
        frac = format!("{frac:0<places$}");
    }
    if places == 0 {
        whole
    } else {
        format!("{whole}.{frac}")
    }
}
