//! Store port for subscriptions and watermarks.

use crate::domain::{Address, Network, UserId, Watermark};
use crate::error::Result;

/// Persistent subscription and watermark storage.
///
/// The store exclusively owns both record kinds; every operation is
/// individually consistent, so the command surface and the poll
/// scheduler can call it concurrently without extra locking.
///
/// Watermarks are keyed by (address, network) — not by user — because
/// all subscribers of a pair share deduplication state.
pub trait SubscriptionStore: Send + Sync {
    /// Record a user, implicitly on first interaction. Idempotent.
    fn ensure_user(&self, user: UserId) -> Result<()>;

    /// Insert a subscription if absent. Returns `false` (not an error)
    /// when the (user, address, network) triple already exists.
    fn add_subscription(&self, user: UserId, address: &Address, network: Network)
        -> Result<bool>;

    /// Delete a subscription. Returns `false` when it wasn't tracked.
    fn remove_subscription(
        &self,
        user: UserId,
        address: &Address,
        network: Network,
    ) -> Result<bool>;

    /// One user's subscriptions, ordered by network then address for
    /// deterministic display.
    fn subscriptions_for(&self, user: UserId) -> Result<Vec<(Address, Network)>>;

    /// Every distinct (address, network) pair across all users; the
    /// scheduler's unit of polling.
    fn tracked_pairs(&self) -> Result<Vec<(Address, Network)>>;

    /// All users subscribed to one pair.
    fn subscribers(&self, address: &Address, network: Network) -> Result<Vec<UserId>>;

    /// Current watermark for a pair; `(0, "")` when never set.
    fn watermark(&self, address: &Address, network: Network) -> Result<Watermark>;

    /// Upsert the watermark for a pair. Unconditional overwrite: the
    /// change detector guarantees monotonicity by construction.
    fn set_watermark(
        &self,
        address: &Address,
        network: Network,
        watermark: &Watermark,
    ) -> Result<()>;
}
