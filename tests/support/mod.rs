//! Shared test support: temp database, scripted feed, recording
//! notifier, fixed summarizer.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use dobby_tracker::adapter::store::db::{create_pool, run_migrations, DbPool};
use dobby_tracker::domain::{Address, Direction, Network, Transaction, TxKind, UserId};
use dobby_tracker::error::{Error, Result};
use dobby_tracker::port::{Notifier, Summarizer, TransactionFeed};

/// Temporary SQLite database for integration tests.
pub struct TempDb {
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        path.push(format!("dobby-tracker-{name}-{nanos}.db"));

        let pool = create_pool(&path.display().to_string()).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self { path, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// An address made of one repeated hex digit, e.g. `addr('a')`.
pub fn addr(fill: char) -> Address {
    Address::parse(&format!("0x{}", fill.to_string().repeat(40))).expect("valid test address")
}

/// A native transaction addressed to `addr('a')` by default.
pub fn tx(hash: &str, timestamp: i64) -> Transaction {
    Transaction {
        hash: hash.into(),
        from: format!("0x{}", "f".repeat(40)),
        to: addr('a').as_str().to_string(),
        timestamp,
        value: "1000000000000000000".into(),
        gas_used: "21000".into(),
        gas_price: "20000000000".into(),
        kind: TxKind::Native,
    }
}

/// Feed that replays scripted responses, one per call, then goes quiet.
/// An exhausted script models an upstream failure degraded to empty.
#[derive(Default)]
pub struct ScriptedFeed {
    native: Mutex<VecDeque<Vec<Transaction>>>,
    token: Mutex<VecDeque<Vec<Transaction>>>,
}

impl ScriptedFeed {
    pub fn push_native(&self, txs: Vec<Transaction>) {
        self.native.lock().unwrap().push_back(txs);
    }

    pub fn push_token(&self, txs: Vec<Transaction>) {
        self.token.lock().unwrap().push_back(txs);
    }
}

#[async_trait]
impl TransactionFeed for ScriptedFeed {
    async fn native_transfers(&self, _address: &Address, _network: Network) -> Vec<Transaction> {
        self.native.lock().unwrap().pop_front().unwrap_or_default()
    }

    async fn token_transfers(&self, _address: &Address, _network: Network) -> Vec<Transaction> {
        self.token.lock().unwrap().pop_front().unwrap_or_default()
    }
}

/// Notifier that records deliveries and can refuse specific users.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(i64, String)>>,
    refuse: Mutex<HashSet<i64>>,
}

impl RecordingNotifier {
    /// Make deliveries to `user` fail, like a chat that blocked the bot.
    pub fn refuse(&self, user: UserId) {
        self.refuse.lock().unwrap().insert(user.0);
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, user: UserId, text: &str) -> Result<()> {
        if self.refuse.lock().unwrap().contains(&user.0) {
            return Err(Error::Connection("chat refused delivery".into()));
        }
        self.sent.lock().unwrap().push((user.0, text.to_string()));
        Ok(())
    }
}

/// Summarizer returning a fixed response.
pub struct FixedSummarizer(pub Option<String>);

#[async_trait]
impl Summarizer for FixedSummarizer {
    async fn summarize(
        &self,
        _tx: &Transaction,
        _direction: Direction,
        _network: Network,
    ) -> Option<String> {
        self.0.clone()
    }
}
