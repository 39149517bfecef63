mod error;
mod models;
pub mod retry;

pub use error::{OverFastError, Result};
pub use models::{
    CareerStat, CareerStatCategory, ComparisonData, ComparisonValue, CompetitiveByPlatform,
    CompetitiveData, CompetitiveRank, Endorsement, FullPlayerData, GameMode, GameModeStats,
    GeneralStats, Platform, PlatformStats, PlayerSearchResult, PlayerStats, PlayerSummary,
    RoleStats, StatValue,
};
pub use retry::RetryPolicy;

use models::SearchResponse;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://overfast-api.tekrop.fr";
const CLIENT_USER_AGENT: &str = "OverwatchAPI-Client/1.0";

/// Upstream client configuration, fixed for the client's lifetime.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// Per-attempt timeout
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_millis(15_000),
            retry: RetryPolicy::default(),
        }
    }
}

/// Client for the OverFast API.
///
/// Holds only immutable configuration and a pooled `reqwest::Client`, so a
/// single instance is built at startup and cloned into every request.
#[derive(Debug, Clone)]
pub struct OverFastClient {
    http: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl OverFastClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(OverFastError::Transport)?;

        let mut base_url = Url::parse(&config.base_url)
            .map_err(|e| OverFastError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(OverFastError::InvalidUrl(config.base_url));
        }
        // endpoints are joined relative to the base path
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http,
            base_url,
            retry: config.retry,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// GET an endpoint relative to the base URL and return the JSON body.
    pub async fn get(&self, endpoint: &str) -> Result<serde_json::Value> {
        let url = self
            .base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| OverFastError::InvalidUrl(format!("{endpoint}: {e}")))?;
        self.fetch(url).await
    }

    /// Search players by name.
    ///
    /// Best effort: any failure is logged and yields no results.
    pub async fn search_players(&self, name: &str) -> Vec<PlayerSearchResult> {
        let mut url = self.endpoint(&["players"]);
        url.query_pairs_mut().append_pair("name", name);

        match self.fetch::<SearchResponse>(url).await {
            Ok(response) => response.results,
            Err(err) => {
                warn!(%name, error = %err, "player search failed, returning no results");
                Vec::new()
            }
        }
    }

    /// Full career profile (summary and stats) of a player.
    pub async fn get_player_data(
        &self,
        player_id: &str,
        platform: Option<Platform>,
        gamemode: Option<GameMode>,
    ) -> Result<FullPlayerData> {
        self.fetch(self.player_url(player_id, platform, gamemode))
            .await
    }

    /// Same request as [`get_player_data`](Self::get_player_data), with the
    /// payload left untouched.
    pub async fn get_player_data_raw(
        &self,
        player_id: &str,
        platform: Option<Platform>,
        gamemode: Option<GameMode>,
    ) -> Result<serde_json::Value> {
        self.fetch(self.player_url(player_id, platform, gamemode))
            .await
    }

    fn player_url(
        &self,
        player_id: &str,
        platform: Option<Platform>,
        gamemode: Option<GameMode>,
    ) -> Url {
        let mut url = self.endpoint(&["players", player_id]);
        if platform.is_some() || gamemode.is_some() {
            let mut query = url.query_pairs_mut();
            if let Some(platform) = platform {
                query.append_pair("platform", platform.as_str());
            }
            if let Some(gamemode) = gamemode {
                query.append_pair("gamemode", gamemode.as_str());
            }
        }
        url
    }

    /// Base URL with percent-encoded path segments appended.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            debug!(%url, attempt, "requesting overfast");

            match self.http.get(url.clone()).send().await {
                Ok(response) if response.status().is_success() => {
                    return response.json::<T>().await.map_err(OverFastError::from);
                }
                Ok(response) => {
                    let status = response.status();
                    if attempt < max_attempts && retry::is_retryable_status(status.as_u16()) {
                        let delay = self.retry.delay_for(attempt, Some(response.headers()));
                        warn!(%url, %status, attempt, ?delay, "retrying overfast request");
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    let body = response.text().await.unwrap_or_default();
                    let err = OverFastError::from_status(status, &body);
                    debug!(%url, %status, error = %err, "overfast request failed");
                    return Err(err);
                }
                Err(err) if attempt < max_attempts && (err.is_timeout() || err.is_connect()) => {
                    let delay = self.retry.delay_for(attempt, None);
                    warn!(%url, error = %err, attempt, ?delay, "retrying overfast request");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}
