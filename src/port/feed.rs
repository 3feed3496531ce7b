//! Block-explorer feed port.

use async_trait::async_trait;

use crate::domain::{Address, Network, Transaction};

/// Recent-transaction feeds for one address on one network.
///
/// Both feeds return up to the configured fetch limit, newest first, as
/// sorted by the upstream API. Upstream failure of any kind (network
/// error, non-success status, malformed payload) degrades to an empty
/// list — logged by the implementation, never propagated — so a flaky
/// explorer reads as "no updates this cycle" to the poll loop.
#[async_trait]
pub trait TransactionFeed: Send + Sync {
    /// Most recent native-asset transfers.
    async fn native_transfers(&self, address: &Address, network: Network) -> Vec<Transaction>;

    /// Most recent token transfers.
    async fn token_transfers(&self, address: &Address, network: Network) -> Vec<Transaction>;
}
