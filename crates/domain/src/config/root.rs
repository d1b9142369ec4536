use serde::{Deserialize, Serialize};

use super::client::ClientConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-stub.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-stub/config.toml";

/// Main configuration structure for the stub client
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Name server the client talks to
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Retry, timeout and fallback behaviour
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-stub.toml in current directory
    /// 3. /etc/ferrous-stub/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(server) = overrides.server {
            self.upstream.server = server;
        }
        if let Some(tcp_server) = overrides.tcp_server {
            self.upstream.tcp_server = Some(tcp_server);
        }
        if let Some(attempts) = overrides.max_attempts {
            self.client.max_attempts = attempts;
        }
        if let Some(timeout) = overrides.timeout_ms {
            self.client.timeout_ms = timeout;
        }
        if overrides.no_tcp_fallback {
            self.client.tcp_fallback = false;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if self.client.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "timeout_ms must be greater than 0".to_string(),
            ));
        }

        if self.client.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        self.upstream.server_addr()?;
        self.upstream.tcp_server_addr()?;

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub server: Option<String>,
    pub tcp_server: Option<String>,
    pub max_attempts: Option<u16>,
    pub timeout_ms: Option<u64>,
    pub no_tcp_fallback: bool,
    pub log_level: Option<String>,
}
