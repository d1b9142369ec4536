use ferrous_stub_domain::{ClientConfig, ConfigError, DomainError, ErrorLogging, UpstreamConfig};
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runtime settings of a `DnsClient`.
#[derive(Clone)]
pub struct DnsClientOptions {
    /// Datagrams sent before the query is given up.
    pub max_attempts: u16,
    /// Wait after each datagram, and bound for each TCP fallback step.
    pub timeout: Duration,
    /// How often a waiting query re-checks completion.
    pub poll_interval: Duration,
    /// Re-issue truncated answers over TCP.
    pub tcp_fallback: bool,
    /// TCP fallback target; the UDP server when `None`.
    pub tcp_endpoint: Option<SocketAddr>,
    pub error_logging: Option<Arc<dyn ErrorLogging>>,
}

impl Default for DnsClientOptions {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            timeout: Duration::from_millis(250),
            poll_interval: Duration::from_millis(10),
            tcp_fallback: true,
            tcp_endpoint: None,
            error_logging: None,
        }
    }
}

impl DnsClientOptions {
    pub fn from_config(
        client: &ClientConfig,
        upstream: &UpstreamConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            max_attempts: client.max_attempts,
            timeout: Duration::from_millis(client.timeout_ms),
            poll_interval: Duration::from_millis(client.poll_interval_ms),
            tcp_fallback: client.tcp_fallback,
            tcp_endpoint: upstream.tcp_server_addr()?,
            error_logging: None,
        })
    }

    pub fn with_max_attempts(mut self, max_attempts: u16) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_tcp_fallback(mut self, enabled: bool) -> Self {
        self.tcp_fallback = enabled;
        self
    }

    pub fn with_tcp_endpoint(mut self, endpoint: SocketAddr) -> Self {
        self.tcp_endpoint = Some(endpoint);
        self
    }

    pub fn with_error_logging(mut self, logger: Arc<dyn ErrorLogging>) -> Self {
        self.error_logging = Some(logger);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_attempts == 0 {
            return Err(DomainError::ConfigError(
                "max_attempts must be greater than 0".to_string(),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(DomainError::ConfigError(
                "poll_interval must be greater than 0".to_string(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(DomainError::ConfigError(
                "timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for DnsClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DnsClientOptions")
            .field("max_attempts", &self.max_attempts)
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .field("tcp_fallback", &self.tcp_fallback)
            .field("tcp_endpoint", &self.tcp_endpoint)
            .field("error_logging", &self.error_logging.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let options =
            DnsClientOptions::from_config(&ClientConfig::default(), &UpstreamConfig::default())
                .unwrap();

        assert_eq!(options.max_attempts, 5);
        assert_eq!(options.timeout, Duration::from_millis(250));
        assert_eq!(options.poll_interval, Duration::from_millis(10));
        assert!(options.tcp_fallback);
        assert!(options.tcp_endpoint.is_none());
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_tcp_override_is_parsed() {
        let upstream = UpstreamConfig {
            tcp_server: Some("10.0.0.1:5353".to_string()),
            ..UpstreamConfig::default()
        };
        let options = DnsClientOptions::from_config(&ClientConfig::default(), &upstream).unwrap();
        assert_eq!(options.tcp_endpoint, Some("10.0.0.1:5353".parse().unwrap()));
    }

    #[test]
    fn test_zero_values_rejected() {
        assert!(DnsClientOptions::default()
            .with_max_attempts(0)
            .validate()
            .is_err());
        assert!(DnsClientOptions::default()
            .with_poll_interval(Duration::ZERO)
            .validate()
            .is_err());
        assert!(DnsClientOptions::default()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
