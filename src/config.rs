//! Application configuration
//!
//! Configuration is read from a YAML file (or built from defaults) and
//! converted into the runtime configs used by the HTTP client and the
//! paged fetcher.

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Largest page the upstream search/recommendation endpoints accept
pub const MAX_PAGE_SIZE: u32 = 50;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete application configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the Spotify Web API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Pagination behavior
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Caller-side retry policy (the fetcher itself never retries)
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            http: HttpConfig::default(),
            fetch: FetchConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.spotify.com".to_string()
}

impl AppConfig {
    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parse and validate config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "api_base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.fetch.page_size == 0 || self.fetch.page_size > MAX_PAGE_SIZE {
            return Err(Error::invalid_value(
                "fetch.page_size",
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }

        if let Some(market) = &self.fetch.market {
            if market.len() != 2 || !market.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(Error::invalid_value(
                    "fetch.market",
                    "expected an ISO 3166-1 alpha-2 country code",
                ));
            }
        }

        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value("http.timeout_seconds", "must be > 0"));
        }

        Ok(())
    }

    /// Build the runtime HTTP client config
    pub fn http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.api_base_url)
            .timeout(Duration::from_secs(self.http.timeout_seconds));

        builder = if self.http.rate_limit.enabled {
            builder.rate_limit(RateLimiterConfig::new(
                self.http.rate_limit.requests_per_second,
                self.http.rate_limit.burst_size,
            ))
        } else {
            builder.no_rate_limit()
        };

        builder.build()
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Client-side rate limiting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether rate limiting is applied at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Sustained requests per second
    #[serde(default = "default_rps")]
    pub requests_per_second: u32,

    /// Burst size
    #[serde(default = "default_burst")]
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_second: default_rps(),
            burst_size: default_burst(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_rps() -> u32 {
    10
}

fn default_burst() -> u32 {
    10
}

// ============================================================================
// Fetch Config
// ============================================================================

/// Pagination behavior for fetch sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Items requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Distance from the bottom (in pixels) that counts as "near bottom"
    #[serde(default = "default_near_bottom_threshold")]
    pub near_bottom_threshold: u32,

    /// Optional market (country code) forwarded to the source
    #[serde(default)]
    pub market: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            near_bottom_threshold: default_near_bottom_threshold(),
            market: None,
        }
    }
}

fn default_page_size() -> u32 {
    20
}

fn default_near_bottom_threshold() -> u32 {
    200
}

// ============================================================================
// Retry Config
// ============================================================================

/// Retry policy applied by callers of the fetcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum retries of a retryable failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Type of backoff
    #[serde(rename = "backoff", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

impl RetryConfig {
    /// Delay before the given retry attempt (0-based)
    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff_type.delay(
            attempt,
            Duration::from_millis(self.initial_ms),
            Duration::from_millis(self.max_ms),
        )
    }
}

fn default_max_retries() -> u32 {
    2
}

fn default_initial_ms() -> u64 {
    250
}

fn default_max_ms() -> u64 {
    5_000
}
