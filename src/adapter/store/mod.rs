//! Persistence adapters.

pub mod db;
mod sqlite;

pub use sqlite::SqliteSubscriptionStore;
