//! Warden CLI
//!
//! Watches the war list for tracked corporations and reports declarations,
//! changes and endings to Discord.

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{Cli, Commands};

/// Initialize tracing, optionally mirroring to a daily log file.
///
/// The returned guard flushes the file writer and must live until exit.
fn init_tracing(log_dir: Option<&std::path::Path>, verbose: bool) -> Option<WorkerGuard> {
    let default_filter = if verbose {
        "warden=debug,warden_core=debug,warden_esi=debug,warden_web=debug"
    } else {
        "warden=info,warden_core=info,warden_web=debug"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    if let Some(dir) = log_dir {
        let appender = tracing_appender::rolling::daily(dir, "warden.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false),
            )
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
        None
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = match &cli.command {
        Commands::Serve(args) if args.log => Some(args.log_dir.clone()),
        _ => None,
    };
    let _guard = init_tracing(log_dir.as_deref(), cli.verbose);

    cli.execute().await
}
