//! Per-(address, network) delivery watermark.

use super::Transaction;

/// The most recently notified transaction for one (address, network)
/// pair, shared by every subscriber of that pair.
///
/// `last_hash` breaks ties when several transactions carry the
/// watermark's exact timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Watermark {
    /// Unix seconds of the last notified transaction; 0 when unset.
    pub last_time: i64,
    /// Hash of the last notified transaction; empty when unset.
    pub last_hash: String,
}

impl Watermark {
    #[must_use]
    pub fn new(last_time: i64, last_hash: impl Into<String>) -> Self {
        Self {
            last_time,
            last_hash: last_hash.into(),
        }
    }

    /// The watermark that marks `tx` as delivered.
    #[must_use]
    pub fn of(tx: &Transaction) -> Self {
        Self::new(tx.timestamp, tx.hash.clone())
    }
}
