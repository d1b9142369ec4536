use super::ClientInner;
use crate::dns::transport::MAX_UDP_MESSAGE_SIZE;
use crate::dns::wire::{is_response, transaction_id, ResponseParser, HEADER_LEN};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use ferrous_stub_domain::DomainError;
use tracing::debug;

/// Reads datagrams until `shutdown` fires and hands each answer to the query
/// waiting on its transaction ID.
pub(super) async fn run(inner: Arc<ClientInner>, shutdown: CancellationToken) {
    debug!(server = %inner.udp.server_addr(), "Receive loop started");

    let mut buf = inner.buffers.acquire(MAX_UDP_MESSAGE_SIZE);

    loop {
        let len = tokio::select! {
            _ = shutdown.cancelled() => break,
            result = inner.udp.recv(&mut buf) => match result {
                Ok(len) => len,
                Err(e) => {
                    report_recv_error(&inner, &e);
                    continue;
                }
            },
        };

        let datagram = &buf[..len];
        if catch_unwind(AssertUnwindSafe(|| dispatch(&inner, datagram))).is_err() {
            inner
                .errors
                .log_error("Panic while handling a received datagram");
        }
    }

    debug!("Receive loop stopped");
}

pub(super) fn report_recv_error(inner: &ClientInner, err: &DomainError) {
    inner.errors.log_exception("UDP receive failed", err);
}

pub(super) fn dispatch(inner: &ClientInner, datagram: &[u8]) {
    if datagram.len() < HEADER_LEN {
        debug!(len = datagram.len(), "Dropping datagram shorter than header");
        return;
    }
    if !is_response(datagram) {
        debug!("Dropping datagram without QR flag");
        return;
    }
    let Some(id) = transaction_id(datagram) else {
        return;
    };

    let Some(pending) = inner.registry.take(id) else {
        debug!(transaction_id = id, "No pending query for response");
        return;
    };
    if pending.is_complete() {
        debug!(transaction_id = id, "Dropping response for finished query");
        return;
    }

    let response = match ResponseParser::try_parse(datagram, false) {
        Ok(response) => response,
        Err(e) => {
            inner
                .errors
                .log_exception("Failed to parse DNS response", &e);
            ResponseParser::unparseable(false)
        }
    };

    pending.complete(response);
}
