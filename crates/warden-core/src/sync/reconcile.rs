//! The two reconciliation passes of a cycle.

use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::{SyncContext, SyncReport};
use crate::change;
use crate::error::WardenResult;
use crate::involvement;
use crate::model::{Corporation, LedgerEntry, War, WarId};
use crate::notification::{self, MessageKind};

/// What handling one (corporation, war) pair amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Untouched,
    Notified,
}

impl Outcome {
    fn tally(self, report: &mut SyncReport) {
        match self {
            Self::Untouched => {}
            Self::Notified => report.notifications += 1,
        }
    }
}

/// Fetch and fan out every candidate war without a global record.
///
/// If any corporation's handling of a new war fails, the war's global
/// record is dropped again so the next cycle retries it. Corporations that
/// succeeded already hold a ledger entry and are not notified twice.
pub(super) async fn reconcile_new(ctx: &SyncContext, candidates: &[WarId], report: &mut SyncReport) {
    for &war_id in candidates {
        match ctx.records.has_record(war_id).await {
            Ok(true) => continue,
            Ok(false) => {}
            Err(e) => {
                error!(%war_id, error = %e, "Failed to look up war record");
                report.failures += 1;
                continue;
            }
        }

        if !ctx.pacing.is_zero() {
            tokio::time::sleep(ctx.pacing).await;
        }

        let war = match ctx.api.war(war_id).await {
            Ok(war) => war,
            Err(e) => {
                error!(%war_id, error = %e, "Failed to fetch war details");
                report.failures += 1;
                continue;
            }
        };

        if let Err(e) = ctx.records.save_record(&war).await {
            error!(%war_id, error = %e, "Failed to save war record");
            report.failures += 1;
            continue;
        }
        report.new_wars += 1;
        debug!(%war_id, "New war recorded");

        let mut failed = false;
        for corporation in ctx.eligible() {
            match introduce_war(ctx, corporation, &war).await {
                Ok(outcome) => outcome.tally(report),
                Err(e) => {
                    error!(
                        %war_id,
                        corporation_id = %corporation.corporation_id,
                        error = %e,
                        "Failed to handle new war for corporation"
                    );
                    report.failures += 1;
                    failed = true;
                }
            }
        }

        if failed {
            if let Err(e) = ctx.records.remove_record(war_id).await {
                warn!(%war_id, error = %e, "Failed to drop war record for retry");
            }
        }
    }
}

/// Notify a corporation about a war it has not seen yet, and record it.
/// A war the corporation already holds only has its snapshot refreshed.
async fn introduce_war(ctx: &SyncContext, corporation: &Corporation, war: &War) -> WardenResult<Outcome> {
    if !involvement::is_involved(war, corporation) {
        return Ok(Outcome::Untouched);
    }

    let now = Utc::now();

    // Already known (the global record was pruned and came back): take the
    // fresh snapshot without announcing it again.
    if ctx.ledger.entry(corporation.corporation_id, war.id).await?.is_some() {
        ctx.ledger.upsert(corporation.corporation_id, war, now).await?;
        debug!(war_id = %war.id, corporation_id = %corporation.corporation_id, "Ledger entry refreshed");
        return Ok(Outcome::Untouched);
    }

    let kind = if war.is_finished_at(now) { MessageKind::Finished } else { MessageKind::New };
    let payload = notification::compile(ctx.api.as_ref(), war, corporation, kind).await?;
    // Record before sending: a failed write must not lead to a repeat.
    ctx.ledger.upsert(corporation.corporation_id, war, now).await?;
    ctx.notifier.dispatch(&ctx.channels, &payload).await;

    info!(
        war_id = %war.id,
        corporation_id = %corporation.corporation_id,
        title = %payload.title,
        "War notification sent"
    );
    Ok(Outcome::Notified)
}

/// Re-fetch every war already in an eligible corporation's ledger and
/// notify on changes.
pub(super) async fn reconcile_existing(ctx: &SyncContext, report: &mut SyncReport) {
    for corporation in ctx.eligible() {
        let entries = match ctx.ledger.entries(corporation.corporation_id).await {
            Ok(entries) => entries,
            Err(e) => {
                error!(
                    corporation_id = %corporation.corporation_id,
                    error = %e,
                    "Failed to list ledger"
                );
                report.failures += 1;
                continue;
            }
        };

        for entry in entries {
            report.rechecked += 1;
            match recheck_war(ctx, corporation, &entry).await {
                Ok(outcome) => outcome.tally(report),
                Err(e) => {
                    error!(
                        war_id = %entry.war.id,
                        corporation_id = %corporation.corporation_id,
                        error = %e,
                        "Failed to recheck war"
                    );
                    report.failures += 1;
                }
            }
        }
    }
}

async fn recheck_war(ctx: &SyncContext, corporation: &Corporation, entry: &LedgerEntry) -> WardenResult<Outcome> {
    let war = ctx.api.war(entry.war.id).await?;
    let now = Utc::now();

    if !change::has_changed(&entry.war, &war) && !change::finished_transition(entry, &war, now) {
        return Ok(Outcome::Untouched);
    }

    let kind = if war.is_finished_at(now) {
        MessageKind::Finished
    } else {
        MessageKind::Updated { previous: &entry.war }
    };
    let payload = notification::compile(ctx.api.as_ref(), &war, corporation, kind).await?;
    ctx.ledger.upsert(corporation.corporation_id, &war, now).await?;
    ctx.notifier.dispatch(&ctx.channels, &payload).await;

    info!(
        war_id = %war.id,
        corporation_id = %corporation.corporation_id,
        title = %payload.title,
        "War change notification sent"
    );
    Ok(Outcome::Notified)
}
