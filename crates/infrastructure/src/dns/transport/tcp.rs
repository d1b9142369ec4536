use super::buffer_pool::{BufferPool, PooledBuffer};
use crate::dns::wire::HEADER_LEN;
use ferrous_stub_domain::DomainError;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// TCP transport used for the truncation fallback (RFC 1035 §4.2.2).
///
/// Each exchange opens a fresh connection, writes one length-prefixed query
/// and reads one length-prefixed reply. Every step is bounded by `timeout`.
#[derive(Debug, Clone)]
pub struct TcpTransport {
    server_addr: SocketAddr,
    timeout: Duration,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            server_addr,
            timeout,
        }
    }

    pub async fn exchange<'p>(
        &self,
        message_bytes: &[u8],
        pool: &'p BufferPool,
    ) -> Result<PooledBuffer<'p>, DomainError> {
        let mut stream = self.connect_new().await?;

        tokio::time::timeout(
            self.timeout,
            send_with_length_prefix(&mut stream, message_bytes),
        )
        .await
        .map_err(|_| self.timeout_error())??;

        debug!(
            server = %self.server_addr,
            message_len = message_bytes.len(),
            "TCP query sent"
        );

        let response = tokio::time::timeout(
            self.timeout,
            read_with_length_prefix(&mut stream, pool),
        )
        .await
        .map_err(|_| self.timeout_error())??;

        debug!(
            server = %self.server_addr,
            response_len = response.len(),
            "TCP response received"
        );

        Ok(response)
    }

    async fn connect_new(&self) -> Result<TcpStream, DomainError> {
        let stream = tokio::time::timeout(self.timeout, TcpStream::connect(self.server_addr))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| match e.kind() {
                ErrorKind::ConnectionRefused => DomainError::TransportConnectionRefused {
                    server: self.server_addr.to_string(),
                },
                _ => DomainError::IoError(format!(
                    "Failed to connect to TCP server {}: {}",
                    self.server_addr, e
                )),
            })?;

        stream.set_nodelay(true).map_err(|e| {
            DomainError::IoError(format!(
                "Failed to set TCP_NODELAY on {}: {}",
                self.server_addr, e
            ))
        })?;

        Ok(stream)
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }
}

pub(crate) async fn send_with_length_prefix<S>(
    stream: &mut S,
    message_bytes: &[u8],
) -> Result<(), DomainError>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        DomainError::InvalidQuery(format!(
            "Message of {} bytes does not fit a TCP length prefix",
            message_bytes.len()
        ))
    })?;

    let mut framed = Vec::with_capacity(message_bytes.len() + 2);
    framed.extend_from_slice(&length.to_be_bytes());
    framed.extend_from_slice(message_bytes);

    stream
        .write_all(&framed)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to write DNS message: {}", e)))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to flush stream: {}", e)))?;

    Ok(())
}

pub(crate) async fn read_with_length_prefix<'p, S>(
    stream: &mut S,
    pool: &'p BufferPool,
) -> Result<PooledBuffer<'p>, DomainError>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream
        .read_exact(&mut len_buf)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to read response length: {}", e)))?;

    let response_len = u16::from_be_bytes(len_buf) as usize;
    if response_len < HEADER_LEN {
        return Err(DomainError::MalformedMessage(format!(
            "TCP response of {} bytes is shorter than a DNS header",
            response_len
        )));
    }

    let mut response = pool.acquire(response_len);
    stream
        .read_exact(&mut response)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to read response body: {}", e)))?;

    Ok(response)
}
