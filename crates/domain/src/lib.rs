//! Ferrous Stub Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod dns_response;
pub mod error_logging;
pub mod errors;

pub use config::{ClientConfig, CliOverrides, Config, ConfigError, LoggingConfig, UpstreamConfig};
pub use dns_query::DnsQuery;
pub use dns_record::{DnsRecord, RecordType};
pub use dns_response::{DnsErrorCode, DnsResponse};
pub use error_logging::ErrorLogging;
pub use errors::DomainError;
