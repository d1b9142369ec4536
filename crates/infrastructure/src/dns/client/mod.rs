//! Asynchronous DNS stub client.
//!
//! A `DnsClient` owns one connected UDP socket and a background task that
//! reads every datagram arriving on it. Queries register a pending
//! transaction, send their datagram up to `max_attempts` times and wait for
//! the receive loop to deliver the matching answer. Truncated answers are
//! re-issued over TCP when the options allow it.

mod logging;
mod options;
mod receive_loop;

pub use logging::TracingErrorLogger;
pub use options::DnsClientOptions;

use crate::dns::transaction::{PendingQuery, TransactionRegistry};
use crate::dns::transport::{BufferPool, PoolStats, TcpTransport, UdpTransport};
use crate::dns::wire::{is_response, transaction_id, MessageBuilder, ResponseParser};
use ferrous_stub_domain::{DnsErrorCode, DnsQuery, DnsResponse, DomainError, RecordType};
use logging::ErrorSink;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub(crate) struct ClientInner {
    udp: UdpTransport,
    registry: TransactionRegistry,
    buffers: BufferPool,
    options: DnsClientOptions,
    errors: ErrorSink,
}

pub struct DnsClient {
    inner: Arc<ClientInner>,
    shutdown: CancellationToken,
}

/// Unregisters a transaction when the query call returns, however it returns.
struct Registration<'a> {
    registry: &'a TransactionRegistry,
    pending: &'a Arc<PendingQuery>,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        self.registry.release(self.pending);
    }
}

impl DnsClient {
    /// Connects to `server_addr` and starts the receive loop on the current
    /// tokio runtime.
    pub async fn connect(
        server_addr: SocketAddr,
        options: DnsClientOptions,
    ) -> Result<Self, DomainError> {
        options.validate()?;

        let udp = UdpTransport::connect(server_addr).await?;
        let errors = ErrorSink::new(options.error_logging.clone());

        let inner = Arc::new(ClientInner {
            udp,
            registry: TransactionRegistry::new(),
            buffers: BufferPool::default(),
            options,
            errors,
        });

        let shutdown = CancellationToken::new();
        tokio::spawn(receive_loop::run(Arc::clone(&inner), shutdown.clone()));

        info!(
            server = %server_addr,
            max_attempts = inner.options.max_attempts,
            timeout_ms = inner.options.timeout.as_millis() as u64,
            tcp_fallback = inner.options.tcp_fallback,
            "DNS client started"
        );

        Ok(Self { inner, shutdown })
    }

    /// Sends `query` and waits for its answer.
    ///
    /// Network and parse failures are reported through the response's error
    /// code. `Err` means the query never went out: the buffer was too small
    /// or the client has been shut down.
    pub async fn query(&self, query: &DnsQuery) -> Result<DnsResponse, DomainError> {
        let inner = &*self.inner;
        let options = &inner.options;

        if query.record_types().len() > 1 {
            warn!(
                domain = %query.domain(),
                types = query.record_types().len(),
                "Query asks several record types; most servers answer only the first"
            );
        }

        let mut send_buf = inner.buffers.acquire(query.wire_len());
        let pending = inner.registry.begin()?;
        let _registration = Registration {
            registry: &inner.registry,
            pending: &pending,
        };

        let len = MessageBuilder::write_query(query, pending.id(), &mut send_buf)?;
        let message = &send_buf[..len];

        for attempt in 1..=options.max_attempts {
            if let Err(e) = inner.udp.send(message).await {
                inner.errors.log_exception("Failed to send DNS query", &e);
            }

            if pending.wait(options.timeout, options.poll_interval).await {
                break;
            }

            debug!(
                transaction_id = pending.id(),
                attempt,
                max_attempts = options.max_attempts,
                "No answer yet"
            );
        }

        if pending.abort(DnsErrorCode::NoResponseFromServer) {
            debug!(
                transaction_id = pending.id(),
                domain = %query.domain(),
                "Query gave up without an answer"
            );
        }

        let response = pending.response().unwrap_or_else(DnsResponse::no_response);

        if response.truncated && !query.accept_truncated() && options.tcp_fallback {
            return Ok(self.retry_over_tcp(message, pending.id(), response).await);
        }

        Ok(response)
    }

    /// Looks up a single record type.
    pub async fn lookup(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<DnsResponse, DomainError> {
        let query = DnsQuery::new(domain, record_type)?;
        self.query(&query).await
    }

    async fn retry_over_tcp(
        &self,
        message: &[u8],
        id: u16,
        truncated: DnsResponse,
    ) -> DnsResponse {
        let inner = &*self.inner;
        let endpoint = inner
            .options
            .tcp_endpoint
            .unwrap_or_else(|| inner.udp.server_addr());

        debug!(transaction_id = id, server = %endpoint, "Answer truncated, retrying over TCP");

        let tcp = TcpTransport::new(endpoint, inner.options.timeout);
        let reply = match tcp.exchange(message, &inner.buffers).await {
            Ok(reply) => reply,
            Err(e) => {
                inner.errors.log_exception("TCP fallback failed", &e);
                return truncated;
            }
        };

        if !is_response(&reply) || transaction_id(&reply) != Some(id) {
            let e = DomainError::MalformedMessage(format!(
                "TCP reply from {} does not answer transaction {}",
                endpoint, id
            ));
            inner.errors.log_exception("TCP fallback failed", &e);
            return truncated;
        }

        match ResponseParser::try_parse(&reply, true) {
            Ok(response) => response,
            Err(e) => {
                inner
                    .errors
                    .log_exception("Failed to parse DNS response received over TCP", &e);
                ResponseParser::unparseable(true)
            }
        }
    }

    /// Stops the receive loop and fails every in-flight query with
    /// `NoResponseFromServer`. Later queries return `ClientShutdown`.
    pub fn shutdown(&self) -> usize {
        if self.shutdown.is_cancelled() {
            return 0;
        }
        self.shutdown.cancel();
        let aborted = self.inner.registry.close();
        info!(aborted, "DNS client shut down");
        aborted
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.inner.udp.server_addr()
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.inner.udp.local_addr()
    }

    pub fn pending_transactions(&self) -> usize {
        self.inner.registry.len()
    }

    pub fn has_transaction(&self, id: u16) -> bool {
        self.inner.registry.contains(id)
    }

    pub fn buffer_stats(&self) -> PoolStats {
        self.inner.buffers.stats()
    }

    pub fn options(&self) -> &DnsClientOptions {
        &self.inner.options
    }
}

impl Drop for DnsClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}
