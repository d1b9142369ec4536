pub mod client;
pub mod transaction;
pub mod transport;
pub mod wire;

pub use client::{DnsClient, DnsClientOptions, TracingErrorLogger};
pub use transaction::{PendingQuery, QueryState, TransactionRegistry};
pub use transport::{BufferPool, PoolStats, TcpTransport, UdpTransport};
pub use wire::{MessageBuilder, RecordParser, ResponseParser};
