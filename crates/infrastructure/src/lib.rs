//! Ferrous Stub Infrastructure Layer
pub mod dns;

pub use dns::{DnsClient, DnsClientOptions, TracingErrorLogger};
