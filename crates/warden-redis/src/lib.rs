//! Warden Redis Data Layer
//!
//! Async Redis persistence for the global war records and the
//! per-corporation war ledgers. Rows are stored as JSON documents in
//! hashes, with sets acting as indexes.

pub mod client;
pub mod queries;

pub use client::{RedisError, RedisPool, RedisResult, init_pool};
pub use queries::ledger;
pub use queries::wars;
