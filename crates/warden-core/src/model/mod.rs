//! Domain models.

pub mod corporation;
pub mod ledger;
pub mod war;

pub use corporation::{Channel, Corporation};
pub use ledger::LedgerEntry;
pub use war::{AllianceId, CorporationId, Party, War, WarId};
