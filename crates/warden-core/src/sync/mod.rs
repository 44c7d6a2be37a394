//! War synchronization cycle.
//!
//! One cycle walks `FetchCandidates → PruneStale → ReconcileNew →
//! ReconcileExisting` sequentially. Only the candidate fetch can fail the
//! cycle; every other failure is logged against its war and/or
//! corporation, counted, and the cycle moves on.
//!
//! Callers must not run two cycles (or a cycle and a wipe) over the same
//! stores at once. [`SyncGate`] is the lock the serving layers share for
//! that. A cycle writes the ledger before it dispatches, so it must not be
//! dropped half way: serving layers run it through [`detached`].

mod reconcile;

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::OwnedMutexGuard;
use tracing::{error, info};

use crate::error::{WardenError, WardenResult};
use crate::model::{Channel, Corporation, WarId};
use crate::ports::{Notifier, WarApi, WarLedger, WarRecordStore};

/// Mutual exclusion between cycles and wipes.
pub type SyncGate = Arc<tokio::sync::Mutex<()>>;

pub fn new_gate() -> SyncGate {
    Arc::new(tokio::sync::Mutex::new(()))
}

/// Run `work` on its own task while holding `guard`.
///
/// The work finishes even if the returned future is dropped, and the gate
/// stays locked until it does, so a shutdown that takes the gate waits for
/// it.
pub async fn detached<F, T>(guard: OwnedMutexGuard<()>, work: F) -> WardenResult<T>
where
    F: Future<Output = WardenResult<T>> + Send + 'static,
    T: Send + 'static,
{
    let handle = tokio::spawn(async move {
        let result = work.await;
        drop(guard);
        result
    });
    handle.await.map_err(|e| WardenError::Task(e.to_string()))?
}

/// Everything a cycle needs, passed in explicitly.
#[derive(Clone)]
pub struct SyncContext {
    pub api: Arc<dyn WarApi>,
    pub records: Arc<dyn WarRecordStore>,
    pub ledger: Arc<dyn WarLedger>,
    pub notifier: Arc<dyn Notifier>,
    /// Tracked corporations in priority order.
    pub corporations: Vec<Corporation>,
    pub channels: Vec<Channel>,
    pub pacing: Duration,
}

impl SyncContext {
    fn eligible(&self) -> impl Iterator<Item = &Corporation> {
        self.corporations.iter().filter(|c| c.war_eligible)
    }
}

/// What a cycle did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub candidates: usize,
    pub pruned: usize,
    pub new_wars: usize,
    pub rechecked: usize,
    pub notifications: usize,
    pub failures: usize,
}

/// Run one full reconciliation pass.
pub async fn run_cycle(ctx: &SyncContext) -> WardenResult<SyncReport> {
    info!(
        corporations = ctx.corporations.len(),
        channels = ctx.channels.len(),
        "Starting war sync"
    );

    let candidates = ctx
        .api
        .war_ids()
        .await
        .map_err(|e| WardenError::CandidateFetch(Box::new(e)))?;

    let mut report = SyncReport { candidates: candidates.len(), ..Default::default() };

    prune_stale(ctx, &candidates, &mut report).await;
    reconcile::reconcile_new(ctx, &candidates, &mut report).await;
    reconcile::reconcile_existing(ctx, &mut report).await;

    info!(
        candidates = report.candidates,
        pruned = report.pruned,
        new_wars = report.new_wars,
        rechecked = report.rechecked,
        notifications = report.notifications,
        failures = report.failures,
        "War sync complete"
    );
    Ok(report)
}

/// Forget global records the upstream no longer lists. Ledgers stay.
async fn prune_stale(ctx: &SyncContext, candidates: &[WarId], report: &mut SyncReport) {
    let keep: HashSet<WarId> = candidates.iter().copied().collect();
    match ctx.records.prune_records(&keep).await {
        Ok(pruned) => report.pruned = pruned,
        Err(e) => {
            error!(error = %e, "Failed to prune stale war records");
            report.failures += 1;
        }
    }
}
