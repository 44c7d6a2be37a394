//! Per-corporation ledger entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use warden_redis::ledger::LedgerRow;

use super::war::{parse_timestamp, CorporationId, War};
use crate::error::WardenResult;

/// The last snapshot of a war a corporation was told about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub corporation_id: CorporationId,
    pub war: War,
    pub observed_at: DateTime<Utc>,
}

impl LedgerEntry {
    pub fn from_row(row: LedgerRow) -> WardenResult<Self> {
        Ok(Self {
            corporation_id: CorporationId(row.corporation_id),
            observed_at: parse_timestamp(&row.observed_at)?,
            war: War::from_row(row.war)?,
        })
    }

    pub fn to_row(&self) -> LedgerRow {
        LedgerRow {
            corporation_id: self.corporation_id.0,
            war: self.war.to_row(),
            observed_at: self.observed_at.to_rfc3339(),
        }
    }
}
