//! Scheduler loop.

use std::time::Duration;

use anyhow::Result;
use colored::Colorize;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use warden_core::config::{TrackedCorporation, WardenConfig};
use warden_core::corporations::resolve_tracked;
use warden_core::sync::{detached, new_gate, run_cycle};
use warden_core::{SyncContext, SyncGate, SyncReport, WardenResult};

use super::Services;

/// Runs a cycle every `interval`, each one awaited before the next tick.
/// Cycles run detached, so dropping the scheduler never cuts one short.
pub struct Scheduler {
    pub ctx: SyncContext,
    pub tracked: Vec<TrackedCorporation>,
    pub interval: Duration,
    pub gate: SyncGate,
}

impl Scheduler {
    pub async fn run(self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.tick().await;
        }
    }

    async fn tick(&self) {
        let guard = self.gate.clone().lock_owned().await;
        let ctx = self.ctx.clone();
        let tracked = self.tracked.clone();

        match detached(guard, refresh_and_sync(ctx, tracked)).await {
            Ok(report) if report.failures > 0 => {
                warn!(failures = report.failures, "Sync cycle finished with failures");
            }
            Ok(_) => {}
            Err(e) => error!(error = %e, "Sync cycle aborted"),
        }
    }
}

async fn refresh_and_sync(
    mut ctx: SyncContext,
    tracked: Vec<TrackedCorporation>,
) -> WardenResult<SyncReport> {
    // Eligibility and alliance membership drift; re-read them each tick.
    ctx.corporations = resolve_tracked(ctx.api.as_ref(), &tracked).await?;
    run_cycle(&ctx).await
}

/// Wait for a cycle that is already running to finish.
pub async fn drain(gate: &SyncGate) {
    info!("Shutting down, waiting for running cycle");
    let _idle = gate.lock().await;
}

pub async fn execute(config: &WardenConfig) -> Result<()> {
    let services = Services::connect(config).await?;
    let ctx = services.context(config).await?;
    let gate = new_gate();

    println!(
        "{} every {}s for {} corporations",
        "Syncing".cyan().bold(),
        config.sync.interval_secs,
        ctx.corporations.len()
    );
    println!("  {}", "Ctrl+C to stop".dimmed());

    let scheduler = Scheduler {
        ctx,
        tracked: config.corporations.clone(),
        interval: config.sync.interval(),
        gate: gate.clone(),
    };

    tokio::select! {
        _ = scheduler.run() => {}
        _ = tokio::signal::ctrl_c() => drain(&gate).await,
    }

    Ok(())
}
