use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Which wait of the invocation lifecycle failed to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Endpoint,
    Acceptance,
    Result,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Endpoint => "endpoint readiness",
            Stage::Acceptance => "goal acceptance",
            Stage::Result => "action result",
        })
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// A configured deadline elapsed before the awaited notification arrived.
    #[error("timed out waiting for {stage} after {limit:?}")]
    DeadlineExceeded { stage: Stage, limit: Duration },

    /// The transport dropped its half of a pending operation, so the
    /// notification can never arrive.
    #[error("transport dropped the {stage} notification")]
    NotificationLost { stage: Stage },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
