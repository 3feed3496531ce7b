//! Chain-agnostic core types and logic. No IO here.

mod address;
mod detector;
mod id;
mod transaction;
mod watermark;

pub use address::{Address, Network};
pub use detector::fresh_transactions;
pub use id::UserId;
pub use transaction::{format_units, format_units_fixed, Direction, Transaction, TxKind};
pub use watermark::Watermark;
