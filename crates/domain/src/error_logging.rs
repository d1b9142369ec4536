use std::error::Error;

/// Sink for errors the client cannot report through a return value,
/// such as a malformed datagram seen by the background receive loop.
///
/// Implementations must not block for long; they are called from the
/// receive loop.
pub trait ErrorLogging: Send + Sync {
    fn log_error(&self, message: &str);

    fn log_exception(&self, message: &str, error: &dyn Error);
}
