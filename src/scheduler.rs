//! Poll scheduler: the long-lived loop driving fetch, change
//! detection, summarization, and delivery for every tracked pair.
//!
//! The loop re-reads the distinct (address, network) set each tick, so
//! subscriptions added mid-flight are picked up without a restart. A
//! single pair's failure is caught at the pair boundary and logged; the
//! scheduler itself never exits.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::domain::{fresh_transactions, Address, Direction, Network, Transaction, Watermark};
use crate::error::Result;
use crate::port::{Notifier, SubscriptionStore, Summarizer, TransactionFeed};

/// Pause between pairs within one tick, to smooth the outbound
/// explorer request rate.
const INTER_PAIR_DELAY: Duration = Duration::from_millis(300);

/// Pause between consecutive deliveries, to respect Telegram's
/// per-bot rate limits.
const INTER_SEND_DELAY: Duration = Duration::from_millis(150);

/// Drives the poll cycle over all tracked (address, network) pairs.
pub struct Scheduler {
    store: Arc<dyn SubscriptionStore>,
    feed: Arc<dyn TransactionFeed>,
    summarizer: Arc<dyn Summarizer>,
    notifier: Arc<dyn Notifier>,
    poll_interval: Duration,
    pair_delay: Duration,
    send_delay: Duration,
}

impl Scheduler {
    #[must_use]
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        feed: Arc<dyn TransactionFeed>,
        summarizer: Arc<dyn Summarizer>,
        notifier: Arc<dyn Notifier>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            store,
            feed,
            summarizer,
            notifier,
            poll_interval,
            pair_delay: INTER_PAIR_DELAY,
            send_delay: INTER_SEND_DELAY,
        }
    }

    /// Override the rate-limiting delays (tests run with zero).
    #[must_use]
    pub fn with_delays(mut self, pair_delay: Duration, send_delay: Duration) -> Self {
        self.pair_delay = pair_delay;
        self.send_delay = send_delay;
        self
    }

    /// Run forever. Only process shutdown ends the loop.
    pub async fn run(self) {
        info!(
            interval_secs = self.poll_interval.as_secs(),
            "poller started"
        );
        loop {
            self.tick().await;
            sleep(self.poll_interval).await;
        }
    }

    /// One full poll cycle over the current tracked set.
    pub async fn tick(&self) {
        let pairs = match self.store.tracked_pairs() {
            Ok(pairs) => pairs,
            Err(e) => {
                error!(error = %e, "failed to read tracked pairs");
                return;
            }
        };

        if pairs.is_empty() {
            debug!("no addresses tracked, poller idle");
            return;
        }

        for (address, network) in pairs {
            if let Err(e) = self.process_pair(&address, network).await {
                error!(
                    error = %e,
                    address = %address,
                    network = %network,
                    "pair processing failed"
                );
            }
            sleep(self.pair_delay).await;
        }
    }

    /// Fetch both feeds for one pair, detect fresh transactions, and
    /// deliver them oldest first, advancing the watermark after each.
    async fn process_pair(&self, address: &Address, network: Network) -> Result<()> {
        let native = self.feed.native_transfers(address, network).await;
        let token = self.feed.token_transfers(address, network).await;

        let watermark = self.store.watermark(address, network)?;
        let fresh = fresh_transactions(native, token, &watermark);
        if fresh.is_empty() {
            return Ok(());
        }

        let subscribers = self.store.subscribers(address, network)?;
        info!(
            count = fresh.len(),
            address = %address,
            network = %network,
            "fresh transactions detected"
        );

        for tx in fresh {
            let direction = tx.direction(address);
            let mut text = render_notification(&tx, direction, address, network);

            if let Some(summary) = self.summarizer.summarize(&tx, direction, network).await {
                text.push_str("\n\nDobby: ");
                text.push_str(&summary);
            }

            for user in &subscribers {
                if let Err(e) = self.notifier.send(*user, &text).await {
                    warn!(error = %e, user = %user, "failed to deliver notification");
                }
                sleep(self.send_delay).await;
            }

            // Advance per transaction, not per batch: a crash mid-batch
            // must not re-deliver what already went out.
            self.store
                .set_watermark(address, network, &Watermark::of(&tx))?;
        }

        Ok(())
    }
}

/// The structured notification body; a summary line may be appended.
fn render_notification(
    tx: &Transaction,
    direction: Direction,
    address: &Address,
    network: Network,
) -> String {
    format!(
        "🔔 New {network} tx for {address} - {direction}\n\
        Hash: {hash}\nFrom: {from}\nTo: {to}\nAmount: {amount}\nTime: {time}",
        hash = tx.hash,
        from = tx.from,
        to = tx.to,
        amount = tx.amount_line(),
        time = tx.time_utc(),
    )
}
