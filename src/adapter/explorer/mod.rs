//! Block-explorer adapters.

mod etherscan;

pub use etherscan::EtherscanClient;
