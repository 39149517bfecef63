use std::env::var;
use std::time::Duration;

use dotenvy::dotenv;
use overfast_client::{ClientConfig, DEFAULT_BASE_URL, RetryPolicy};

use crate::RateLimitConfig;

/// Application configuration with environment variable overrides
#[derive(Debug, Clone)]
pub struct Config {
    /// OverFast API base URL
    /// Env: OVERWATCH_API_URL (default: "https://overfast-api.tekrop.fr")
    pub overwatch_api_url: String,

    /// Timeout of a single upstream attempt
    /// Env: OVERWATCH_API_TIMEOUT_MS (default: 15000)
    pub overwatch_api_timeout: Duration,

    /// Upstream attempts per request, first one included
    /// Env: OVERWATCH_API_MAX_ATTEMPTS (default: 3)
    pub overwatch_api_max_attempts: u32,

    /// First retry delay, doubled per retry
    /// Env: OVERWATCH_API_BACKOFF_BASE_MS (default: 250)
    pub overwatch_api_backoff_base: Duration,

    /// Longest wait between two attempts
    /// Env: OVERWATCH_API_BACKOFF_MAX_MS (default: 4000)
    pub overwatch_api_backoff_max: Duration,

    /// Listen host
    /// Env: HOST (default: "localhost")
    pub host: String,

    /// Server port
    /// Env: PORT (default: 3000)
    pub port: u16,

    /// Whole-request timeout in seconds
    /// Env: REQUEST_TIMEOUT_SECS (default: 60)
    /// Must leave room for every upstream attempt and the waits between them
    pub request_timeout: Duration,

    /// Rate limit for /api endpoints (requests per second per client IP)
    /// Env: RATE_LIMIT_PER_SEC (default: 10)
    pub rate_limit_per_sec: u64,

    /// Burst size for /api endpoints
    /// Env: RATE_LIMIT_BURST (default: 30)
    pub rate_limit_burst: u32,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let _ = dotenv(); //for local runs mostly
        Self {
            overwatch_api_url: env_or_default_string("OVERWATCH_API_URL", DEFAULT_BASE_URL),
            overwatch_api_timeout: Duration::from_millis(env_or_default(
                "OVERWATCH_API_TIMEOUT_MS",
                15_000,
            )),
            overwatch_api_max_attempts: env_or_default("OVERWATCH_API_MAX_ATTEMPTS", 3),
            overwatch_api_backoff_base: Duration::from_millis(env_or_default(
                "OVERWATCH_API_BACKOFF_BASE_MS",
                250,
            )),
            overwatch_api_backoff_max: Duration::from_millis(env_or_default(
                "OVERWATCH_API_BACKOFF_MAX_MS",
                4_000,
            )),
            host: env_or_default_string("HOST", "localhost"),
            port: env_or_default("PORT", 3000),
            request_timeout: Duration::from_secs(env_or_default("REQUEST_TIMEOUT_SECS", 60)),
            rate_limit_per_sec: env_or_default("RATE_LIMIT_PER_SEC", 10),
            rate_limit_burst: env_or_default("RATE_LIMIT_BURST", 30),
        }
    }

    /// Upstream client settings derived from this configuration
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.overwatch_api_url.clone(),
            timeout: self.overwatch_api_timeout,
            retry: RetryPolicy {
                max_attempts: self.overwatch_api_max_attempts,
                base_delay: self.overwatch_api_backoff_base,
                max_delay: self.overwatch_api_backoff_max,
            },
        }
    }

    pub fn rate_limit(&self) -> RateLimitConfig {
        RateLimitConfig {
            per_sec: self.rate_limit_per_sec,
            burst: self.rate_limit_burst,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    /// Create configuration with all default values
    fn default() -> Self {
        Self {
            overwatch_api_url: DEFAULT_BASE_URL.to_string(),
            overwatch_api_timeout: Duration::from_millis(15_000),
            overwatch_api_max_attempts: 3,
            overwatch_api_backoff_base: Duration::from_millis(250),
            overwatch_api_backoff_max: Duration::from_millis(4_000),
            host: "localhost".to_string(),
            port: 3000,
            request_timeout: Duration::from_secs(60),
            rate_limit_per_sec: 10,
            rate_limit_burst: 30,
        }
    }
}

/// Parse environment variable or return default value
fn env_or_default<T: std::str::FromStr>(key: &str, default: T) -> T {
    var(key)
        .ok()
        .and_then(|val| val.parse().ok())
        .unwrap_or(default)
}

/// Parse environment variable string or return default value
fn env_or_default_string(key: &str, default: &str) -> String {
    var(key).unwrap_or_else(|_| default.to_string())
}
