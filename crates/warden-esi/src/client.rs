//! HTTP client for the ESI endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use warden_core::config::EsiConfig;
use warden_core::ports::WarApi;
use warden_core::{AllianceId, Corporation, CorporationId, War, WarId, WardenError, WardenResult};

use crate::response::{CorporationResponse, NamedResponse, WarResponse};

/// Below this many remaining errors in the current window, every response
/// is logged at warn.
const ERROR_LIMIT_WARNING: u32 = 20;

const ERROR_LIMIT_HEADER: &str = "x-esi-error-limit-remain";

/// ESI client. Owns the optional bearer token it authenticates with.
#[derive(Clone)]
pub struct EsiClient {
    base_url: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl EsiClient {
    pub fn new(base_url: &str, user_agent: &str, timeout: Duration) -> WardenResult<Self> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(user_agent)
            .map_err(|e| WardenError::config(format!("invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, agent);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| WardenError::config(format!("cannot build HTTP client: {}", e)))?;

        debug!(base_url = %base_url, "ESI client initialized");
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        })
    }

    pub fn from_config(config: &EsiConfig) -> WardenResult<Self> {
        let client = Self::new(&config.base_url, &config.user_agent, config.timeout())?;
        Ok(match &config.token {
            Some(token) => client.with_token(token),
            None => client,
        })
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> WardenResult<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| WardenError::upstream(format!("GET {} failed: {}", path, e)))?;
        check_error_limit(&response, path);

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(WardenError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WardenError::upstream(format!("GET {} returned {}: {}", path, status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| WardenError::upstream(format!("Failed to decode {}: {}", path, e)))
    }
}

fn check_error_limit(response: &Response, path: &str) {
    let remaining = response
        .headers()
        .get(ERROR_LIMIT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u32>().ok());

    if let Some(remaining) = remaining {
        if remaining < ERROR_LIMIT_WARNING {
            warn!(path = %path, remaining, "ESI error limit nearly exhausted");
        }
    }
}

#[async_trait]
impl WarApi for EsiClient {
    async fn war_ids(&self) -> WardenResult<Vec<WarId>> {
        let ids: Vec<i32> = self.get("/wars/").await?;
        debug!(count = ids.len(), "Fetched war list");
        Ok(ids.into_iter().map(WarId).collect())
    }

    async fn war(&self, war_id: WarId) -> WardenResult<War> {
        let wire: WarResponse = self.get(&format!("/wars/{}/", war_id)).await?;
        wire.into_war()
    }

    async fn alliance_name(&self, alliance_id: AllianceId) -> WardenResult<String> {
        let wire: NamedResponse = self.get(&format!("/alliances/{}/", alliance_id)).await?;
        Ok(wire.name)
    }

    async fn corporation_name(&self, corporation_id: CorporationId) -> WardenResult<String> {
        let wire: NamedResponse = self.get(&format!("/corporations/{}/", corporation_id)).await?;
        Ok(wire.name)
    }

    async fn corporation(&self, corporation_id: CorporationId) -> WardenResult<Corporation> {
        let wire: CorporationResponse =
            self.get(&format!("/corporations/{}/", corporation_id)).await?;
        Ok(wire.into_corporation(corporation_id))
    }
}
