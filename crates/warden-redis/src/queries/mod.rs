//! Query modules for the war documents stored in Redis.

pub mod ledger;
pub mod wars;
