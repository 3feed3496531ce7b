//! Dobby Tracker - a Telegram bot that watches Ethereum addresses.
//!
//! Users register addresses with `/add`; a background poller queries
//! Etherscan for new native and token transfers touching each tracked
//! address, deduplicates against a persisted per-(address, network)
//! watermark, and pushes a plain-text notification (optionally with an
//! AI-generated summary) to every subscriber, oldest transaction first.
//!
//! # Architecture
//!
//! Hexagonal: the domain and the poll loop know nothing about SQLite,
//! Etherscan, Fireworks, or Telegram beyond the `port` traits.
//!
//! - [`domain`] - addresses, networks, transactions, watermarks, and
//!   the change detector (pure logic, no IO)
//! - [`port`] - trait seams: store, feeds, summarizer, notifier
//! - [`adapter`] - Diesel/SQLite store, Etherscan client, Fireworks
//!   summarizer, Telegram command surface and notifier
//! - [`scheduler`] - the polling loop tying the ports together
//! - [`config`] - environment configuration
//! - [`error`] - error types for the crate
//! - [`app`] - application wiring

pub mod adapter;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod scheduler;
