//! UDP transport (RFC 1035 §4.2.1).
//!
//! One connected socket per client. Callers send on it concurrently; only the
//! receive loop reads from it. Datagrams from any other source are dropped by
//! the kernel because the socket is connected.

use ferrous_stub_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::UdpSocket;
use tracing::debug;

/// Largest datagram the receive loop accepts.
pub const MAX_UDP_MESSAGE_SIZE: usize = 4096;

const RECV_BUFFER_SIZE: usize = 256 * 1024;
const SEND_BUFFER_SIZE: usize = 128 * 1024;

#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub async fn connect(server_addr: SocketAddr) -> Result<Self, DomainError> {
        let socket = create_socket(server_addr).map_err(|e| {
            DomainError::IoError(format!("Failed to create UDP socket for {}: {}", server_addr, e))
        })?;

        socket.connect(server_addr).await.map_err(|e| {
            DomainError::IoError(format!("Failed to connect UDP socket to {}: {}", server_addr, e))
        })?;

        debug!(server = %server_addr, local = ?socket.local_addr().ok(), "UDP socket connected");

        Ok(Self {
            socket,
            server_addr,
        })
    }

    pub async fn send(&self, message_bytes: &[u8]) -> Result<usize, DomainError> {
        let sent = self.socket.send(message_bytes).await.map_err(|e| {
            DomainError::IoError(format!(
                "Failed to send UDP query to {}: {}",
                self.server_addr, e
            ))
        })?;

        debug!(server = %self.server_addr, bytes_sent = sent, "UDP query sent");
        Ok(sent)
    }

    pub async fn recv(&self, buf: &mut [u8]) -> Result<usize, DomainError> {
        self.socket.recv(buf).await.map_err(|e| {
            DomainError::IoError(format!(
                "Failed to receive UDP datagram from {}: {}",
                self.server_addr, e
            ))
        })
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        Ok(self.socket.local_addr()?)
    }
}

fn create_socket(server: SocketAddr) -> Result<UdpSocket, std::io::Error> {
    let (domain, bind_addr) = if server.is_ipv4() {
        (
            Domain::IPV4,
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
        )
    } else {
        (
            Domain::IPV6,
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
        )
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_recv_buffer_size(RECV_BUFFER_SIZE)?;
    socket.set_send_buffer_size(SEND_BUFFER_SIZE)?;
    socket.bind(&bind_addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}
