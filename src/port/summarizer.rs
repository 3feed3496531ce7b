//! Summarization port.

use async_trait::async_trait;

use crate::domain::{Direction, Network, Transaction};

/// Optional natural-language summarization of one transaction.
///
/// Best-effort by contract: any upstream failure (missing credential,
/// network error, unusable response) yields `None` and the caller falls
/// back to the structured message alone. Implementations never error
/// past this boundary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        tx: &Transaction,
        direction: Direction,
        network: Network,
    ) -> Option<String>;
}

/// Summarizer used when no backend is configured.
pub struct NullSummarizer;

#[async_trait]
impl Summarizer for NullSummarizer {
    async fn summarize(
        &self,
        _tx: &Transaction,
        _direction: Direction,
        _network: Network,
    ) -> Option<String> {
        None
    }
}
