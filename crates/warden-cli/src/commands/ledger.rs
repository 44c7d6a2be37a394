//! Ledger inspection command.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;

use warden_core::config::WardenConfig;
use warden_core::ports::WarLedger;
use warden_core::CorporationId;

use super::connect_store;
use crate::output;

#[derive(Args)]
pub struct LedgerArgs {
    /// Corporation ID
    pub corporation_id: i32,
}

pub async fn execute(args: LedgerArgs, config: &WardenConfig) -> Result<()> {
    let corporation_id = CorporationId(args.corporation_id);
    if !config.corporations.iter().any(|c| c.corporation_id == corporation_id) {
        bail!("Corporation {} is not in the configuration", corporation_id);
    }

    let store = connect_store(config).await?;
    let entries = store.entries(corporation_id).await?;

    println!("{} {}", "Ledger of corporation".bold(), corporation_id.to_string().cyan());
    println!();
    output::print_ledger(&entries);

    Ok(())
}
