//! Collaborator interfaces consumed by the sync pipeline.
//!
//! Implementations live in sibling crates (ESI client, Discord transport)
//! and in [`crate::store`].

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::WardenResult;
use crate::model::{AllianceId, Channel, Corporation, CorporationId, LedgerEntry, War, WarId};
use crate::notification::NotificationPayload;

/// Read access to the upstream game API. The implementation owns the
/// credential it authenticates with.
#[async_trait]
pub trait WarApi: Send + Sync {
    /// War ids currently visible to the credential.
    async fn war_ids(&self) -> WardenResult<Vec<WarId>>;

    async fn war(&self, war_id: WarId) -> WardenResult<War>;

    async fn alliance_name(&self, alliance_id: AllianceId) -> WardenResult<String>;

    async fn corporation_name(&self, corporation_id: CorporationId) -> WardenResult<String>;

    /// Public corporation sheet (name, alliance, war eligibility).
    async fn corporation(&self, corporation_id: CorporationId) -> WardenResult<Corporation>;
}

/// Global war records: which war ids have ever been fetched in detail.
#[async_trait]
pub trait WarRecordStore: Send + Sync {
    async fn has_record(&self, war_id: WarId) -> WardenResult<bool>;

    async fn save_record(&self, war: &War) -> WardenResult<()>;

    async fn remove_record(&self, war_id: WarId) -> WardenResult<()>;

    /// Drop every record whose id is not in `keep`; returns how many went.
    async fn prune_records(&self, keep: &HashSet<WarId>) -> WardenResult<usize>;

    async fn record_ids(&self) -> WardenResult<Vec<WarId>>;

    async fn clear(&self) -> WardenResult<usize>;
}

/// Per-corporation ledger of last-notified war snapshots.
#[async_trait]
pub trait WarLedger: Send + Sync {
    async fn entry(
        &self,
        corporation_id: CorporationId,
        war_id: WarId,
    ) -> WardenResult<Option<LedgerEntry>>;

    async fn entries(&self, corporation_id: CorporationId) -> WardenResult<Vec<LedgerEntry>>;

    async fn upsert(
        &self,
        corporation_id: CorporationId,
        war: &War,
        observed_at: DateTime<Utc>,
    ) -> WardenResult<()>;

    async fn wipe(&self, corporation_id: CorporationId) -> WardenResult<usize>;
}

/// Notification fan-out. Delivery failures are the transport's to log;
/// the pipeline never sees them.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn dispatch(&self, channels: &[Channel], payload: &NotificationPayload);
}
