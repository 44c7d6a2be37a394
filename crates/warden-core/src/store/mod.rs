//! Store implementations for [`WarRecordStore`](crate::ports::WarRecordStore)
//! and [`WarLedger`](crate::ports::WarLedger).

pub mod memory;
pub mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;
