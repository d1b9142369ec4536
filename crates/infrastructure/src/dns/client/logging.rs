use ferrous_stub_domain::ErrorLogging;
use std::error::Error;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::error;

/// `ErrorLogging` implementation that forwards to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorLogger;

impl ErrorLogging for TracingErrorLogger {
    fn log_error(&self, message: &str) {
        error!("{}", message);
    }

    fn log_exception(&self, message: &str, err: &dyn Error) {
        error!(error = %err, "{}", message);
    }
}

/// Shields the client from the configured logger. A panicking logger is
/// reported through `tracing` and otherwise ignored.
#[derive(Clone, Default)]
pub(crate) struct ErrorSink {
    logger: Option<Arc<dyn ErrorLogging>>,
}

impl ErrorSink {
    pub(crate) fn new(logger: Option<Arc<dyn ErrorLogging>>) -> Self {
        Self { logger }
    }

    pub(crate) fn log_error(&self, message: &str) {
        match &self.logger {
            Some(logger) => {
                if catch_unwind(AssertUnwindSafe(|| logger.log_error(message))).is_err() {
                    error!(logged = message, "Error logger panicked");
                }
            }
            None => TracingErrorLogger.log_error(message),
        }
    }

    pub(crate) fn log_exception(&self, message: &str, err: &dyn Error) {
        match &self.logger {
            Some(logger) => {
                if catch_unwind(AssertUnwindSafe(|| logger.log_exception(message, err))).is_err() {
                    error!(logged = message, error = %err, "Error logger panicked");
                }
            }
            None => TracingErrorLogger.log_exception(message, err),
        }
    }
}
