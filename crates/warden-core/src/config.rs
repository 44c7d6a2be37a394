//! Service configuration loaded from `warden.toml`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{WardenError, WardenResult};
use crate::model::{Channel, CorporationId};

pub const DEFAULT_CONFIG_PATH: &str = "warden.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WardenConfig {
    #[serde(default)]
    pub esi: EsiConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub web: WebConfig,
    /// Tracked corporations, highest priority first.
    #[serde(default)]
    pub corporations: Vec<TrackedCorporation>,
    #[serde(default)]
    pub channels: Vec<Channel>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsiConfig {
    #[serde(default = "default_esi_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Delay before each new-war detail fetch.
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Bearer token. Only ever read from the environment.
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for EsiConfig {
    fn default() -> Self {
        Self {
            base_url: default_esi_url(),
            user_agent: default_user_agent(),
            pacing_ms: default_pacing_ms(),
            timeout_secs: default_timeout_secs(),
            token: None,
        }
    }
}

impl EsiConfig {
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    #[serde(default = "default_redis_url")]
    pub url: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self { url: default_redis_url() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self { interval_secs: default_interval_secs() }
    }
}

impl SyncConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// A configured corporation before it is looked up upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedCorporation {
    pub corporation_id: CorporationId,
    /// Overrides the eligibility reported by the API.
    #[serde(default)]
    pub war_eligible: Option<bool>,
}

fn default_esi_url() -> String {
    "https://esi.evetech.net/latest".to_string()
}

fn default_user_agent() -> String {
    format!("warden/{}", env!("CARGO_PKG_VERSION"))
}

fn default_pacing_ms() -> u64 {
    60
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_interval_secs() -> u64 {
    300
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3040
}

impl WardenConfig {
    /// Read, apply environment overrides, and validate.
    pub fn load(path: &Path) -> WardenResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WardenError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        debug!(
            path = %path.display(),
            corporations = config.corporations.len(),
            channels = config.channels.len(),
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> WardenResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// `REDIS_URL`, `WARDEN_ESI_URL` and `WARDEN_ESI_TOKEN` win over the file.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("REDIS_URL") {
            self.redis.url = url;
        }
        if let Some(url) = lookup("WARDEN_ESI_URL") {
            self.esi.base_url = url;
        }
        self.esi.token = lookup("WARDEN_ESI_TOKEN").filter(|t| !t.is_empty());
    }

    pub fn validate(&self) -> WardenResult<()> {
        if self.corporations.is_empty() {
            return Err(WardenError::config("at least one corporation must be tracked"));
        }
        if self.sync.interval_secs == 0 {
            return Err(WardenError::config("sync.interval_secs must be greater than zero"));
        }
        if let Some(channel) = self.channels.iter().find(|c| c.webhook_url.trim().is_empty()) {
            return Err(WardenError::config(format!(
                "channel '{}' has an empty webhook_url",
                channel.name
            )));
        }
        if self.channels.is_empty() {
            warn!("No channels configured, notifications will be dropped");
        }
        Ok(())
    }
}
