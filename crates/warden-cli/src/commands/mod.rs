//! CLI command definitions and handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use warden_core::config::{WardenConfig, DEFAULT_CONFIG_PATH};
use warden_core::corporations::resolve_tracked;
use warden_core::store::RedisStore;
use warden_core::SyncContext;
use warden_discord::DiscordNotifier;
use warden_esi::EsiClient;

pub mod ledger;
pub mod run;
pub mod serve;
pub mod sync;
pub mod wipe;

/// Warden - war declaration notifications for EVE Online corporations
#[derive(Parser)]
#[command(name = "warden")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single sync cycle and print what it did
    Sync,

    /// Run sync cycles on the configured interval
    Run,

    /// Run the scheduler together with the HTTP API
    Serve(serve::ServeArgs),

    /// Show a corporation's war ledger
    Ledger(ledger::LedgerArgs),

    /// Delete all war records and ledgers
    Wipe(wipe::WipeArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = load_config(&self.config)?;

        match self.command {
            Commands::Sync => sync::execute(&config).await,
            Commands::Run => run::execute(&config).await,
            Commands::Serve(args) => serve::execute(args, &config).await,
            Commands::Ledger(args) => ledger::execute(args, &config).await,
            Commands::Wipe(args) => wipe::execute(args, &config).await,
        }
    }
}

fn load_config(path: &Path) -> Result<WardenConfig> {
    WardenConfig::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

/// Collaborators shared by the commands that talk to ESI.
pub struct Services {
    pub api: Arc<EsiClient>,
    pub store: Arc<RedisStore>,
}

impl Services {
    pub async fn connect(config: &WardenConfig) -> Result<Self> {
        let api = EsiClient::from_config(&config.esi).context("Failed to set up ESI client")?;
        let store = connect_store(config).await?;
        Ok(Self { api: Arc::new(api), store: Arc::new(store) })
    }

    /// Resolve the tracked corporations and assemble a sync context.
    pub async fn context(&self, config: &WardenConfig) -> Result<SyncContext> {
        let corporations = resolve_tracked(self.api.as_ref(), &config.corporations)
            .await
            .context("Failed to resolve tracked corporations")?;

        let notifier = DiscordNotifier::new().context("Failed to set up Discord client")?;

        Ok(SyncContext {
            api: self.api.clone(),
            records: self.store.clone(),
            ledger: self.store.clone(),
            notifier: Arc::new(notifier),
            corporations,
            channels: config.channels.clone(),
            pacing: config.esi.pacing(),
        })
    }
}

pub async fn connect_store(config: &WardenConfig) -> Result<RedisStore> {
    let pool = warden_redis::init_pool(&config.redis.url)
        .await
        .context("Failed to connect to Redis")?;
    Ok(RedisStore::new(pool))
}
