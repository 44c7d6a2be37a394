//! In-process stores. Nothing survives a restart; used by tests and for
//! dry runs against a live API.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::WardenResult;
use crate::model::{CorporationId, LedgerEntry, War, WarId};
use crate::ports::{WarLedger, WarRecordStore};

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<BTreeMap<WarId, War>>,
    ledgers: Mutex<HashMap<CorporationId, BTreeMap<WarId, LedgerEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, BTreeMap<WarId, War>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ledgers(&self) -> MutexGuard<'_, HashMap<CorporationId, BTreeMap<WarId, LedgerEntry>>> {
        self.ledgers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl WarRecordStore for MemoryStore {
    async fn has_record(&self, war_id: WarId) -> WardenResult<bool> {
        Ok(self.records().contains_key(&war_id))
    }

    async fn save_record(&self, war: &War) -> WardenResult<()> {
        self.records().insert(war.id, war.clone());
        Ok(())
    }

    async fn remove_record(&self, war_id: WarId) -> WardenResult<()> {
        self.records().remove(&war_id);
        Ok(())
    }

    async fn prune_records(&self, keep: &HashSet<WarId>) -> WardenResult<usize> {
        let mut records = self.records();
        let before = records.len();
        records.retain(|id, _| keep.contains(id));
        Ok(before - records.len())
    }

    async fn record_ids(&self) -> WardenResult<Vec<WarId>> {
        Ok(self.records().keys().copied().collect())
    }

    async fn clear(&self) -> WardenResult<usize> {
        let mut records = self.records();
        let count = records.len();
        records.clear();
        Ok(count)
    }
}

#[async_trait]
impl WarLedger for MemoryStore {
    async fn entry(
        &self,
        corporation_id: CorporationId,
        war_id: WarId,
    ) -> WardenResult<Option<LedgerEntry>> {
        Ok(self
            .ledgers()
            .get(&corporation_id)
            .and_then(|ledger| ledger.get(&war_id))
            .cloned())
    }

    async fn entries(&self, corporation_id: CorporationId) -> WardenResult<Vec<LedgerEntry>> {
        Ok(self
            .ledgers()
            .get(&corporation_id)
            .map(|ledger| ledger.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn upsert(
        &self,
        corporation_id: CorporationId,
        war: &War,
        observed_at: DateTime<Utc>,
    ) -> WardenResult<()> {
        let entry = LedgerEntry { corporation_id, war: war.clone(), observed_at };
        self.ledgers().entry(corporation_id).or_default().insert(war.id, entry);
        Ok(())
    }

    async fn wipe(&self, corporation_id: CorporationId) -> WardenResult<usize> {
        Ok(self.ledgers().remove(&corporation_id).map_or(0, |ledger| ledger.len()))
    }
}
