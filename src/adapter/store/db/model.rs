//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{addresses, last_seen, users};

/// Database row for a user (insertable; `created_at` defaults in SQL).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub id: i64,
}

/// Database row for a subscription (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = addresses)]
pub struct NewSubscriptionRow<'a> {
    pub user_id: i64,
    pub address: &'a str,
    pub network: &'a str,
}

/// Database row for a per-pair watermark.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = last_seen)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WatermarkRow {
    pub address: String,
    pub network: String,
    pub last_time: i64,
    pub last_hash: String,
}
