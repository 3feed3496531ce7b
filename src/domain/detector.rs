//! Change detection: which fetched transactions are new since the
//! last notified watermark, ordered for delivery.

use super::{Transaction, Watermark};

/// Merge the native and token feeds and return the transactions not yet
/// covered by `watermark`, oldest first.
///
/// The merged feeds are sorted by timestamp descending (stable, so
/// same-second entries keep their upstream order); everything strictly
/// newer than `last_time` is fresh. When nothing is newer but the
/// newest merged transaction's hash differs from `last_hash`, that
/// single transaction is surfaced — a best-effort fallback for batches
/// sharing the watermark's exact timestamp. Known limitation: if
/// several transactions share that timestamp, only one surfaces per
/// poll.
#[must_use]
pub fn fresh_transactions(
    native: Vec<Transaction>,
    token: Vec<Transaction>,
    watermark: &Watermark,
) -> Vec<Transaction> {
    let mut combined: Vec<Transaction> = native.into_iter().chain(token).collect();
    combined.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let cut = combined
        .iter()
        .position(|tx| tx.timestamp <= watermark.last_time)
        .unwrap_or(combined.len());
    let mut fresh: Vec<Transaction> = combined.drain(..cut).collect();

    if fresh.is_empty() && !combined.is_empty() && combined[0].hash != watermark.last_hash {
        fresh.push(combined.remove(0));
    }

    // Notifications go out in chronological order, not API order.
    fresh.reverse();
    fresh
}
