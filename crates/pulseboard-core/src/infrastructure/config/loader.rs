use std::path::{
    Path,
    PathBuf,
};

use thiserror::Error;

use super::interpolation::{
    interpolate_toml,
    InterpolationError,
};
use super::schema::PulseboardConfig;

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] InterpolationError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ConfigLoadResult<T> = Result<T, ConfigLoadError>;

const LOCAL_CONFIG_FILE: &str = "pulseboard.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn discover_config_path() -> PathBuf {
        if let Ok(path) = std::env::var("PULSEBOARD_CONFIG_PATH") {
            tracing::debug!("Using config path from PULSEBOARD_CONFIG_PATH: {}", path);
            return PathBuf::from(path);
        }

        let user_path = PulseboardConfig::default_config_dir().join("config.toml");
        if user_path.exists() {
            tracing::debug!("Using user config path: {}", user_path.display());
            return user_path;
        }

        let fallback = PathBuf::from(LOCAL_CONFIG_FILE);
        tracing::debug!("Using fallback config path: {}", fallback.display());
        fallback
    }

    pub fn load(path: &Path) -> ConfigLoadResult<PulseboardConfig> {
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Loads the file when present, otherwise starts from defaults.
    pub fn load_or_default(path: &Path) -> ConfigLoadResult<PulseboardConfig> {
        if path.exists() {
            return Self::load(path);
        }

        tracing::warn!(
            "No config file at {} - starting with defaults and no apps",
            path.display()
        );
        let mut config = PulseboardConfig::default();
        Self::apply_env_overrides(&mut config);
        Ok(config)
    }

    pub fn parse(content: &str) -> ConfigLoadResult<PulseboardConfig> {
        let mut value: toml::Value = toml::from_str(content)?;

        interpolate_toml(&mut value)?;

        let config: PulseboardConfig = value.try_into().map_err(|e| {
            ConfigLoadError::InvalidConfig(format!("Failed to deserialize config: {}", e))
        })?;

        tracing::debug!(
            apps = config.apps.len(),
            region = %config.aws.region,
            "Loaded config"
        );

        Ok(config)
    }

    pub fn apply_env_overrides(config: &mut PulseboardConfig) {
        if let Ok(bind_addr) = std::env::var("PULSEBOARD_BIND_ADDR") {
            config.server.bind_addr = bind_addr;
        }

        if let Ok(cors) = std::env::var("PULSEBOARD_CORS_ALLOW_ALL") {
            config.server.cors_allow_all = cors == "true" || cors == "1";
        }
    }
}
