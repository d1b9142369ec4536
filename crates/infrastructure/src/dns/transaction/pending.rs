use ferrous_stub_domain::{DnsErrorCode, DnsResponse};
use std::sync::OnceLock;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    InProgress,
    Completed,
    Failed,
}

#[derive(Debug)]
struct Outcome {
    state: QueryState,
    response: DnsResponse,
}

/// State of one in-flight query.
///
/// Moves from `InProgress` to `Completed` or `Failed` exactly once; the first
/// transition wins and later ones are ignored. The winning transition cancels
/// `completion`, which wakes whoever is waiting on this query and nobody else.
#[derive(Debug)]
pub struct PendingQuery {
    id: u16,
    outcome: OnceLock<Outcome>,
    completion: CancellationToken,
}

impl PendingQuery {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            outcome: OnceLock::new(),
            completion: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn state(&self) -> QueryState {
        self.outcome
            .get()
            .map_or(QueryState::InProgress, |outcome| outcome.state)
    }

    pub fn is_complete(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// Delivers the server's response. Returns `false` if the query had
    /// already finished.
    pub fn complete(&self, response: DnsResponse) -> bool {
        self.finish(QueryState::Completed, response)
    }

    /// Fails the query with a client-side error code and no records.
    pub fn abort(&self, error_code: DnsErrorCode) -> bool {
        self.finish(QueryState::Failed, DnsResponse::error(error_code))
    }

    fn finish(&self, state: QueryState, response: DnsResponse) -> bool {
        let won = self.outcome.set(Outcome { state, response }).is_ok();
        if won {
            self.completion.cancel();
        }
        won
    }

    pub fn response(&self) -> Option<DnsResponse> {
        self.outcome.get().map(|outcome| outcome.response.clone())
    }

    /// Waits up to `timeout` for the query to finish, waking at least every
    /// `poll_interval` to re-check. Returns whether the query finished;
    /// running out of time is not an error.
    pub async fn wait(&self, timeout: Duration, poll_interval: Duration) -> bool {
        let deadline = Instant::now() + timeout;

        loop {
            if self.is_complete() {
                return true;
            }

            let now = Instant::now();
            if now >= deadline {
                return false;
            }

            let step = poll_interval.min(deadline - now);
            tokio::select! {
                _ = self.completion.cancelled() => return self.is_complete(),
                _ = tokio::time::sleep(step) => {}
            }
        }
    }
}
