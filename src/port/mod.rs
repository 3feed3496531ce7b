//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the polling core and the outside world:
//! the subscription store, the block-explorer feeds, the summarization
//! backend, and the message transport. Adapters implement them; the
//! scheduler and command surface consume them, which keeps both
//! testable against in-memory or scripted implementations.

mod feed;
mod notifier;
mod store;
mod summarizer;

pub use feed::TransactionFeed;
pub use notifier::Notifier;
pub use store::SubscriptionStore;
pub use summarizer::{NullSummarizer, Summarizer};
