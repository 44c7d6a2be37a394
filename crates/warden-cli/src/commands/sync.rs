//! One-shot sync command.

use anyhow::{Context, Result};
use colored::Colorize;

use warden_core::config::WardenConfig;
use warden_core::sync::run_cycle;

use super::Services;
use crate::output;

pub async fn execute(config: &WardenConfig) -> Result<()> {
    let services = Services::connect(config).await?;
    let ctx = services.context(config).await?;

    println!(
        "{} {} corporations, {} channels",
        "Syncing".cyan().bold(),
        ctx.corporations.len(),
        ctx.channels.len()
    );

    let report = run_cycle(&ctx).await.context("Sync cycle aborted")?;
    output::print_sync_report(&report);

    Ok(())
}
