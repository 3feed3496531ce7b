//! App orchestration module.
//!
//! Wires the store, explorer, summarizer, and Telegram adapters
//! together, spawns the background poller, and runs the command
//! listener on the current task.

use std::sync::Arc;

use teloxide::Bot;
use tracing::{info, warn};

use crate::adapter::explorer::EtherscanClient;
use crate::adapter::store::{db, SqliteSubscriptionStore};
use crate::adapter::summarizer::FireworksSummarizer;
use crate::adapter::telegram::{run_command_worker, TelegramNotifier};
use crate::config::Config;
use crate::error::Result;
use crate::port::{NullSummarizer, Summarizer};
use crate::scheduler::Scheduler;

/// Main application struct.
pub struct App;

impl App {
    /// Run the bot until the process is shut down.
    ///
    /// The poller runs as a detached background task, communicating
    /// with the command surface only through the shared store, so
    /// neither activity can block the other.
    pub async fn run(config: Config) -> Result<()> {
        let pool = db::create_pool(&config.db_path)?;
        db::run_migrations(&pool)?;
        info!(db_path = %config.db_path, "database ready");

        let store = Arc::new(SqliteSubscriptionStore::new(pool));
        let feed = Arc::new(EtherscanClient::new(
            config.etherscan_api_key.clone(),
            config.max_tx_fetch,
        ));
        let summarizer: Arc<dyn Summarizer> = match &config.fireworks_api_key {
            Some(key) => Arc::new(FireworksSummarizer::new(key.clone())),
            None => {
                warn!("FIREWORKS_API_KEY not set; transaction summaries disabled");
                Arc::new(NullSummarizer)
            }
        };

        let bot = Bot::new(&config.telegram_token);
        let notifier = Arc::new(TelegramNotifier::new(bot.clone()));

        let scheduler = Scheduler::new(
            store.clone(),
            feed,
            summarizer,
            notifier,
            config.poll_interval,
        );
        tokio::spawn(scheduler.run());

        run_command_worker(bot, store).await;

        Ok(())
    }
}
