//! Warden Core Library
//!
//! Domain model and the war synchronization pipeline: involvement
//! classification, change detection, notification compilation and the
//! sync cycle that ties them to the upstream API, storage and transport.

pub mod change;
pub mod config;
pub mod corporations;
pub mod error;
pub mod involvement;
pub mod links;
pub mod maintenance;
pub mod model;
pub mod notification;
pub mod ports;
pub mod store;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{TrackedCorporation, WardenConfig};
pub use error::{WardenError, WardenResult};
pub use maintenance::WipeReport;
pub use model::{AllianceId, Channel, Corporation, CorporationId, LedgerEntry, Party, War, WarId};
pub use notification::{MessageKind, NotificationPayload};
pub use sync::{run_cycle, SyncContext, SyncGate, SyncReport};
