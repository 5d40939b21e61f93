use std::path::PathBuf;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Serialize,
};

use crate::domain::HealthThresholds;

pub(super) const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

pub(super) const DEFAULT_CORS_ALLOW_ALL: bool = true;

pub(super) const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 30;

pub(super) const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 10;

pub(super) const DEFAULT_WINDOW_HOURS: u32 = 24;

pub(super) const DEFAULT_RETRY_ATTEMPTS: usize = 2;

pub(super) const DEFAULT_AWS_REGION: &str = "us-east-1";

pub(super) const DEFAULT_COST_TAG_KEY: &str = "app";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PulseboardConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub aggregation: AggregationConfig,

    #[serde(default)]
    pub health: HealthThresholds,

    #[serde(default)]
    pub aws: AwsConfig,

    #[serde(default)]
    pub app_store: AppStoreConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub apps: IndexMap<String, AppFileConfig>,
}

impl PulseboardConfig {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("pulseboard"))
            .unwrap_or_else(|| PathBuf::from(".pulseboard"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_cors_allow_all")]
    pub cors_allow_all: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            cors_allow_all: DEFAULT_CORS_ALLOW_ALL,
        }
    }
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_cors_allow_all() -> bool {
    DEFAULT_CORS_ALLOW_ALL
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Upper bound for a single adapter call, retries included
    pub source_timeout_secs: u64,
    /// Adapter calls in flight per request
    pub max_concurrent_fetches: usize,
    /// Window used when a request gives no `start`
    pub default_window_hours: u32,
    /// Attempts per adapter call for transient errors
    pub retry_attempts: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            source_timeout_secs: DEFAULT_SOURCE_TIMEOUT_SECS,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            default_window_hours: DEFAULT_WINDOW_HOURS,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
        }
    }
}

impl AggregationConfig {
    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsConfig {
    pub region: String,
    /// Cost allocation tag that scopes Cost Explorer queries to one app
    pub cost_tag_key: String,
    /// Named profile from the shared AWS config, if any
    pub profile: Option<String>,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_AWS_REGION.to_string(),
            cost_tag_key: DEFAULT_COST_TAG_KEY.to_string(),
            profile: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppStoreConfig {
    pub base_url: String,
    pub api_key: String,
}

impl AppStoreConfig {
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    pub tokens: Vec<TokenFileConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenFileConfig {
    pub token: String,
    pub user_id: String,
    #[serde(default)]
    pub admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppFileConfig {
    pub lambda_functions: Vec<String>,
    pub dynamodb_tables: Vec<String>,
    pub api_gateway: Option<String>,
    pub app_store_id: Option<String>,
    /// Cost allocation tag value; the app id when unset
    pub cost_tag: Option<String>,
}
