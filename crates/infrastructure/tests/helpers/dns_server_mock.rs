#![allow(dead_code)]
use super::builders::ResponseBuilder;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

pub const ANSWER_ADDR: [u8; 4] = [93, 184, 216, 34];
pub const TCP_ANSWER_ADDR: [u8; 4] = [93, 184, 216, 35];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// One A record with TTL 60.
    Answer,
    /// Never replies over UDP.
    Silent,
    /// Replies with the TC bit set; the TCP listener returns the full answer.
    Truncated,
    /// Sends noise first, then a response with no question section.
    Garbage,
    /// Sends the answer twice.
    Duplicate,
    /// Replies with the given RCODE.
    Rcode(u8),
}

/// UDP and TCP DNS server on loopback that answers according to a fixed
/// behavior and records what it saw.
pub struct MockDnsServer {
    udp_addr: SocketAddr,
    tcp_addr: SocketAddr,
    udp_queries: Arc<Mutex<Vec<u16>>>,
    tcp_connections: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let udp_addr = socket.local_addr()?;
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let tcp_addr = listener.local_addr()?;

        let udp_queries = Arc::new(Mutex::new(Vec::new()));
        let tcp_connections = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let seen = Arc::clone(&udp_queries);
        let connections = Arc::clone(&tcp_connections);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let query = &buf[..len];
                            if query.len() < 12 {
                                continue;
                            }
                            seen.lock().unwrap().push(u16::from_be_bytes([query[0], query[1]]));
                            for reply in Self::udp_replies(behavior, query) {
                                let _ = socket.send_to(&reply, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((stream, _)) = accepted {
                            connections.fetch_add(1, Ordering::SeqCst);
                            tokio::spawn(Self::serve_tcp(stream));
                        }
                    }
                }
            }
        });

        Ok(Self {
            udp_addr,
            tcp_addr,
            udp_queries,
            tcp_connections,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn udp_addr(&self) -> SocketAddr {
        self.udp_addr
    }

    pub fn tcp_addr(&self) -> SocketAddr {
        self.tcp_addr
    }

    /// Transaction IDs of every UDP query received, in arrival order.
    pub fn udp_queries(&self) -> Vec<u16> {
        self.udp_queries.lock().unwrap().clone()
    }

    pub fn tcp_connections(&self) -> usize {
        self.tcp_connections.load(Ordering::SeqCst)
    }

    fn udp_replies(behavior: MockBehavior, query: &[u8]) -> Vec<Vec<u8>> {
        let answer = || {
            ResponseBuilder::for_query(query)
                .answer_a(0x3c, ANSWER_ADDR)
                .build()
        };

        match behavior {
            MockBehavior::Answer => vec![answer()],
            MockBehavior::Silent => vec![],
            MockBehavior::Truncated => vec![ResponseBuilder::for_query(query).truncated().build()],
            MockBehavior::Garbage => {
                let mut as_query = answer();
                as_query[2] &= 0x7F;
                let headless = ResponseBuilder::for_query(query)
                    .question_count(0)
                    .build();
                vec![vec![0xde, 0xad, 0xbe], as_query, headless[..12].to_vec()]
            }
            MockBehavior::Duplicate => vec![answer(), answer()],
            MockBehavior::Rcode(rcode) => vec![ResponseBuilder::for_query(query).rcode(rcode).build()],
        }
    }

    async fn serve_tcp(mut stream: tokio::net::TcpStream) {
        let mut len_buf = [0u8; 2];
        if stream.read_exact(&mut len_buf).await.is_err() {
            return;
        }
        let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
        if stream.read_exact(&mut query).await.is_err() || query.len() < 12 {
            return;
        }

        let reply = ResponseBuilder::for_query(&query)
            .answer_a(0x3c, ANSWER_ADDR)
            .answer_a(0x3c, TCP_ANSWER_ADDR)
            .build();

        let mut framed = (reply.len() as u16).to_be_bytes().to_vec();
        framed.extend_from_slice(&reply);
        let _ = stream.write_all(&framed).await;
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
