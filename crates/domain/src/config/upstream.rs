use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::errors::ConfigError;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UpstreamConfig {
    #[serde(default = "default_server")]
    pub server: String,

    /// Endpoint used for TCP fallback instead of `server`
    #[serde(default)]
    pub tcp_server: Option<String>,
}

impl UpstreamConfig {
    pub fn server_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_addr(&self.server)
    }

    pub fn tcp_server_addr(&self) -> Result<Option<SocketAddr>, ConfigError> {
        self.tcp_server.as_deref().map(parse_addr).transpose()
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            tcp_server: None,
        }
    }
}

fn parse_addr(addr: &str) -> Result<SocketAddr, ConfigError> {
    addr.parse::<SocketAddr>()
        .map_err(|e| ConfigError::Validation(format!("Invalid server address '{}': {}", addr, e)))
}

fn default_server() -> String {
    "1.1.1.1:53".to_string()
}
