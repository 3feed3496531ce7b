//! Etherscan feed client.
//!
//! Implements [`TransactionFeed`] against the Etherscan account API
//! (`txlist` for native transfers, `tokentx` for token transfers).
//! Every failure mode — transport error, non-2xx, non-success status,
//! malformed payload — degrades to an empty feed with a warning; a
//! fetch failure must never crash the poll loop.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::domain::{Address, Network, Transaction, TxKind};
use crate::error::Result;
use crate::port::TransactionFeed;

const MAINNET_BASE: &str = "https://api.etherscan.io/api";
const SEPOLIA_BASE: &str = "https://api-sepolia.etherscan.io/api";

/// Hard cap on one explorer call; bounds the poll tick duration.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const fn base_url(network: Network) -> &'static str {
    match network {
        Network::Mainnet => MAINNET_BASE,
        Network::Sepolia => SEPOLIA_BASE,
    }
}

#[derive(Debug, Clone, Copy)]
enum Feed {
    Native,
    Token,
}

impl Feed {
    const fn action(self) -> &'static str {
        match self {
            Self::Native => "txlist",
            Self::Token => "tokentx",
        }
    }
}

/// Etherscan-backed transaction feeds.
pub struct EtherscanClient {
    client: Client,
    api_key: Option<String>,
    fetch_limit: usize,
}

impl EtherscanClient {
    /// Create a client. A missing API key is tolerated: feeds stay
    /// empty and a warning is emitted once here.
    #[must_use]
    pub fn new(api_key: Option<String>, fetch_limit: usize) -> Self {
        if api_key.is_none() {
            warn!("ETHERSCAN_API_KEY not set; transaction feeds will stay empty");
        }
        Self {
            client: Client::new(),
            api_key,
            fetch_limit,
        }
    }

    async fn fetch(&self, feed: Feed, address: &Address, network: Network) -> Vec<Transaction> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Vec::new();
        };

        match self.request(feed, address, network, api_key).await {
            Ok(response) => parse_feed(response, feed),
            Err(e) => {
                warn!(
                    error = %e,
                    address = %address,
                    network = %network,
                    action = feed.action(),
                    "explorer request failed"
                );
                Vec::new()
            }
        }
    }

    async fn request(
        &self,
        feed: Feed,
        address: &Address,
        network: Network,
        api_key: &str,
    ) -> Result<ExplorerResponse> {
        let limit = self.fetch_limit.to_string();
        let params = [
            ("module", "account"),
            ("action", feed.action()),
            ("address", address.as_str()),
            ("startblock", "0"),
            ("endblock", "99999999"),
            ("page", "1"),
            ("offset", limit.as_str()),
            ("sort", "desc"),
            ("apikey", api_key),
        ];

        let response = self
            .client
            .get(base_url(network))
            .query(&params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json::<ExplorerResponse>()
            .await?;

        Ok(response)
    }
}

#[async_trait]
impl TransactionFeed for EtherscanClient {
    async fn native_transfers(&self, address: &Address, network: Network) -> Vec<Transaction> {
        self.fetch(Feed::Native, address, network).await
    }

    async fn token_transfers(&self, address: &Address, network: Network) -> Vec<Transaction> {
        self.fetch(Feed::Token, address, network).await
    }
}

/// Raw Etherscan envelope. `status` is `"1"` on success; `result` is a
/// record list on success but a bare message string on errors like rate
/// limiting, hence the untyped value.
#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    result: serde_json::Value,
}

/// One raw transaction record. Etherscan omits fields freely between
/// the two feeds, so everything defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawTx {
    hash: String,
    from: String,
    to: String,
    #[serde(rename = "timeStamp")]
    time_stamp: String,
    value: String,
    #[serde(rename = "gasUsed")]
    gas_used: String,
    #[serde(rename = "gasPrice")]
    gas_price: String,
    #[serde(rename = "tokenSymbol")]
    token_symbol: String,
    #[serde(rename = "tokenName")]
    token_name: String,
    #[serde(rename = "tokenDecimal")]
    token_decimal: String,
}

impl RawTx {
    fn into_transaction(self, feed: Feed) -> Transaction {
        let kind = match feed {
            Feed::Native => TxKind::Native,
            Feed::Token => TxKind::Token {
                symbol: non_empty_or(self.token_symbol, "?"),
                name: non_empty_or(self.token_name, "?"),
                decimals: self.token_decimal.parse().unwrap_or(18),
            },
        };

        Transaction {
            hash: self.hash,
            from: self.from,
            to: self.to,
            timestamp: self.time_stamp.parse().unwrap_or(0),
            value: self.value,
            gas_used: self.gas_used,
            gas_price: self.gas_price,
            kind,
        }
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

/// A response counts as data iff `status == "1"` and `result` is a
/// list; anything else (including "No transactions found") is an empty
/// feed, not an error.
fn parse_feed(response: ExplorerResponse, feed: Feed) -> Vec<Transaction> {
    if response.status.as_deref() != Some("1") {
        return Vec::new();
    }
    match serde_json::from_value::<Vec<RawTx>>(response.result) {
        Ok(records) => records
            .into_iter()
            .map(|raw| raw.into_transaction(feed))
            .collect(),
        Err(e) => {
            warn!(error = %e, "explorer result was not a transaction list");
            Vec::new()
        }
    }
}
