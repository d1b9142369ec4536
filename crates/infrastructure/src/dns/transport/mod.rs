pub mod buffer_pool;
pub mod tcp;
pub mod udp;

pub use buffer_pool::{BufferPool, PoolStats, PooledBuffer};
pub use tcp::TcpTransport;
pub use udp::{UdpTransport, MAX_UDP_MESSAGE_SIZE};
