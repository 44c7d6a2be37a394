//! Wipe command - forget every war record and ledger.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use warden_core::config::WardenConfig;
use warden_core::maintenance;

use super::Services;
use crate::output;

#[derive(Args)]
pub struct WipeArgs {
    /// Confirm destructive operation
    #[arg(long)]
    pub confirm: bool,
}

pub async fn execute(args: WipeArgs, config: &WardenConfig) -> Result<()> {
    if !args.confirm {
        println!("{}", "This will permanently delete:".red().bold());
        println!("  {} every global war record", "•".red());
        println!(
            "  {} the war ledgers of {} tracked corporations",
            "•".red(),
            config.corporations.len()
        );
        println!();
        println!("The next sync will announce every listed war again.");
        println!("Run with {} to confirm.", "--confirm".bold());
        return Ok(());
    }

    println!("{}", "Wiping war state...".red().bold());

    let services = Services::connect(config).await?;
    let ctx = services.context(config).await?;
    let report = maintenance::wipe(&ctx).await?;

    output::print_wipe_report(&report);
    Ok(())
}
