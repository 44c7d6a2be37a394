//! Redis-backed stores.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;
use warden_redis::ledger::LedgerRow;
use warden_redis::{ledger, wars, RedisPool};

use crate::error::WardenResult;
use crate::model::{CorporationId, LedgerEntry, War, WarId};
use crate::ports::{WarLedger, WarRecordStore};

/// Global records and ledgers over one Redis connection manager.
#[derive(Clone)]
pub struct RedisStore {
    pool: RedisPool,
}

impl RedisStore {
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WarRecordStore for RedisStore {
    async fn has_record(&self, war_id: WarId) -> WardenResult<bool> {
        Ok(wars::war_exists(&self.pool, war_id.0).await?)
    }

    async fn save_record(&self, war: &War) -> WardenResult<()> {
        wars::save_war(&self.pool, &war.to_row()).await?;
        Ok(())
    }

    async fn remove_record(&self, war_id: WarId) -> WardenResult<()> {
        wars::remove_war(&self.pool, war_id.0).await?;
        Ok(())
    }

    async fn prune_records(&self, keep: &HashSet<WarId>) -> WardenResult<usize> {
        let keep: HashSet<i32> = keep.iter().map(|id| id.0).collect();
        Ok(wars::remove_old_wars(&self.pool, &keep).await?)
    }

    async fn record_ids(&self) -> WardenResult<Vec<WarId>> {
        let ids = wars::list_war_ids(&self.pool).await?;
        Ok(ids.into_iter().map(WarId).collect())
    }

    async fn clear(&self) -> WardenResult<usize> {
        Ok(wars::delete_all_wars(&self.pool).await?)
    }
}

/// Convert stored rows, skipping any that no longer form a valid entry.
fn readable_entries(corporation_id: CorporationId, rows: Vec<LedgerRow>) -> Vec<LedgerEntry> {
    rows.into_iter()
        .filter_map(|row| {
            let war_id = row.war.id;
            match LedgerEntry::from_row(row) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(%corporation_id, war_id, error = %e, "Skipping unreadable ledger entry");
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl WarLedger for RedisStore {
    async fn entry(
        &self,
        corporation_id: CorporationId,
        war_id: WarId,
    ) -> WardenResult<Option<LedgerEntry>> {
        let row = ledger::get_corp_war(&self.pool, corporation_id.0, war_id.0).await?;
        row.map(LedgerEntry::from_row).transpose()
    }

    async fn entries(&self, corporation_id: CorporationId) -> WardenResult<Vec<LedgerEntry>> {
        let rows = ledger::list_corp_wars(&self.pool, corporation_id.0).await?;
        Ok(readable_entries(corporation_id, rows))
    }

    async fn upsert(
        &self,
        corporation_id: CorporationId,
        war: &War,
        observed_at: DateTime<Utc>,
    ) -> WardenResult<()> {
        let entry = LedgerEntry { corporation_id, war: war.clone(), observed_at };
        ledger::save_corp_war(&self.pool, &entry.to_row(), war.declared.timestamp()).await?;
        Ok(())
    }

    async fn wipe(&self, corporation_id: CorporationId) -> WardenResult<usize> {
        Ok(ledger::delete_all_corp_wars(&self.pool, corporation_id.0).await?)
    }
}
