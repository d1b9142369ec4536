use serde::{Deserialize, Serialize};

/// Retry and timing knobs for the query lifecycle.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClientConfig {
    /// Datagrams sent per query before giving up (must be > 0)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u16,

    /// Time waited for a reply after each attempt, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Interval at which a waiting query re-checks completion (must be > 0)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_true")]
    pub tcp_fallback: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            timeout_ms: default_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            tcp_fallback: default_true(),
        }
    }
}

fn default_max_attempts() -> u16 {
    5
}

fn default_timeout_ms() -> u64 {
    250
}

fn default_poll_interval_ms() -> u64 {
    10
}

fn default_true() -> bool {
    true
}
