//! Scheduler plus web server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use warden_core::config::WardenConfig;
use warden_core::sync::new_gate;
use warden_web::AppState;

use super::run::{drain, Scheduler};
use super::Services;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides [web] port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides [web] host)
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to a daily rolling file
    #[arg(long)]
    pub log: bool,

    /// Directory for log files
    #[arg(long, default_value = "logs")]
    pub log_dir: PathBuf,
}

pub async fn execute(args: ServeArgs, config: &WardenConfig) -> Result<()> {
    let host = args.host.unwrap_or_else(|| config.web.host.clone());
    let port = args.port.unwrap_or(config.web.port);

    let services = Services::connect(config).await?;
    let ctx = services.context(config).await?;
    let gate = new_gate();

    println!();
    println!("  {} {}", "Warden".cyan().bold(), "War Notifications".bold());
    println!();
    println!("  {}        http://{}:{}/api", "API".green(), host, port);
    println!("  {}     http://{}:{}/health", "Health".green(), host, port);
    println!(
        "  {}   every {}s, {} corporations, {} channels",
        "Schedule".green(),
        config.sync.interval_secs,
        ctx.corporations.len(),
        ctx.channels.len()
    );
    if args.log {
        println!("  {}       {}", "Logs".green(), args.log_dir.display());
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    let scheduler = Scheduler {
        ctx: ctx.clone(),
        tracked: config.corporations.clone(),
        interval: config.sync.interval(),
        gate: gate.clone(),
    };
    let state = AppState::new(Arc::new(ctx), gate.clone());

    tokio::select! {
        _ = scheduler.run() => {}
        result = warden_web::run_server(state, &host, port) => result?,
        _ = tokio::signal::ctrl_c() => drain(&gate).await,
    }

    Ok(())
}
