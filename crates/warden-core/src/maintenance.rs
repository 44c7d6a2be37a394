//! Destructive housekeeping.

use serde::Serialize;
use tracing::info;

use crate::error::WardenResult;
use crate::sync::SyncContext;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WipeReport {
    pub wars: usize,
    pub ledger_entries: usize,
}

/// Forget every global war record and every tracked corporation's ledger.
///
/// The next cycle treats every listed war as new. Must not overlap a cycle.
pub async fn wipe(ctx: &SyncContext) -> WardenResult<WipeReport> {
    let wars = ctx.records.clear().await?;

    let mut ledger_entries = 0;
    for corporation in &ctx.corporations {
        ledger_entries += ctx.ledger.wipe(corporation.corporation_id).await?;
    }

    info!(wars, ledger_entries, "Wiped war state");
    Ok(WipeReport { wars, ledger_entries })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::model::CorporationId;
    use crate::ports::{WarLedger, WarRecordStore};
    use crate::store::MemoryStore;
    use crate::sync::run_cycle;
    use crate::testing::{corp, corporation, war, FakeApi, RecordingNotifier};

    #[tokio::test]
    async fn test_wipe_resets_state_and_rearms_notifications() {
        let api = Arc::new(FakeApi::new());
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let ctx = SyncContext {
            api: api.clone(),
            records: store.clone(),
            ledger: store.clone(),
            notifier: notifier.clone(),
            corporations: vec![corporation(10, None, true), corporation(20, None, false)],
            channels: Vec::new(),
            pacing: Duration::ZERO,
        };
        api.publish(&[war(1, corp(10), corp(30)), war(2, corp(40), corp(10)), war(3, corp(50), corp(60))]);
        run_cycle(&ctx).await.unwrap();
        assert_eq!(notifier.count(), 2);

        let report = wipe(&ctx).await.unwrap();

        assert_eq!(report, WipeReport { wars: 3, ledger_entries: 2 });
        assert!(store.record_ids().await.unwrap().is_empty());
        assert!(store.entries(CorporationId(10)).await.unwrap().is_empty());

        run_cycle(&ctx).await.unwrap();
        assert_eq!(notifier.count(), 4);
    }

    #[tokio::test]
    async fn test_wipe_on_empty_state() {
        let store = Arc::new(MemoryStore::new());
        let ctx = SyncContext {
            api: Arc::new(FakeApi::new()),
            records: store.clone(),
            ledger: store,
            notifier: Arc::new(RecordingNotifier::default()),
            corporations: vec![corporation(10, None, true)],
            channels: Vec::new(),
            pacing: Duration::ZERO,
        };

        assert_eq!(wipe(&ctx).await.unwrap(), WipeReport::default());
    }
}
