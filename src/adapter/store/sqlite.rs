//! SQLite subscription store implementation.

use diesel::prelude::*;

use super::db::model::{NewSubscriptionRow, NewUserRow, WatermarkRow};
use super::db::schema::{addresses, last_seen, users};
use super::db::DbPool;
use crate::domain::{Address, Network, UserId, Watermark};
use crate::error::{Error, Result};
use crate::port::SubscriptionStore;

/// SQLite-backed store for subscriptions and watermarks.
///
/// Implements the [`SubscriptionStore`] trait on top of a shared
/// connection pool. Each operation runs as a single statement, so the
/// command surface and the poll scheduler get operation-level isolation
/// from SQLite itself.
pub struct SqliteSubscriptionStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteSubscriptionStore {
    /// Create a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool.get().map_err(|e| Error::Connection(e.to_string()))
    }
}

fn parse_pair(address: String, network: String) -> Result<(Address, Network)> {
    Ok((Address::parse(&address)?, network.parse()?))
}

impl SubscriptionStore for SqliteSubscriptionStore {
    fn ensure_user(&self, user: UserId) -> Result<()> {
        let mut conn = self.conn()?;

        diesel::insert_or_ignore_into(users::table)
            .values(&NewUserRow { id: user.0 })
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    fn add_subscription(
        &self,
        user: UserId,
        address: &Address,
        network: Network,
    ) -> Result<bool> {
        self.ensure_user(user)?;
        let mut conn = self.conn()?;

        let inserted = diesel::insert_or_ignore_into(addresses::table)
            .values(&NewSubscriptionRow {
                user_id: user.0,
                address: address.as_str(),
                network: network.as_str(),
            })
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(inserted > 0)
    }

    fn remove_subscription(
        &self,
        user: UserId,
        address: &Address,
        network: Network,
    ) -> Result<bool> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(
            addresses::table
                .filter(addresses::user_id.eq(user.0))
                .filter(addresses::address.eq(address.as_str()))
                .filter(addresses::network.eq(network.as_str())),
        )
        .execute(&mut conn)
        .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted > 0)
    }

    fn subscriptions_for(&self, user: UserId) -> Result<Vec<(Address, Network)>> {
        let mut conn = self.conn()?;

        let rows: Vec<(String, String)> = addresses::table
            .filter(addresses::user_id.eq(user.0))
            .order((addresses::network.asc(), addresses::address.asc()))
            .select((addresses::address, addresses::network))
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(|(a, n)| parse_pair(a, n)).collect()
    }

    fn tracked_pairs(&self) -> Result<Vec<(Address, Network)>> {
        let mut conn = self.conn()?;

        let rows: Vec<(String, String)> = addresses::table
            .select((addresses::address, addresses::network))
            .distinct()
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(|(a, n)| parse_pair(a, n)).collect()
    }

    fn subscribers(&self, address: &Address, network: Network) -> Result<Vec<UserId>> {
        let mut conn = self.conn()?;

        let ids: Vec<i64> = addresses::table
            .filter(addresses::address.eq(address.as_str()))
            .filter(addresses::network.eq(network.as_str()))
            .order(addresses::user_id.asc())
            .select(addresses::user_id)
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(ids.into_iter().map(UserId).collect())
    }

    fn watermark(&self, address: &Address, network: Network) -> Result<Watermark> {
        let mut conn = self.conn()?;

        let row: Option<WatermarkRow> = last_seen::table
            .find((address.as_str(), network.as_str()))
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row
            .map(|r| Watermark::new(r.last_time, r.last_hash))
            .unwrap_or_default())
    }

    fn set_watermark(
        &self,
        address: &Address,
        network: Network,
        watermark: &Watermark,
    ) -> Result<()> {
        let mut conn = self.conn()?;

        // REPLACE INTO: a single-statement upsert, never read-modify-write.
        diesel::replace_into(last_seen::table)
            .values(&WatermarkRow {
                address: address.as_str().to_string(),
                network: network.as_str().to_string(),
                last_time: watermark.last_time,
                last_hash: watermark.last_hash.clone(),
            })
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }
}
