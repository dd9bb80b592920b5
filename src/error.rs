use std::fmt;
use std::io;

/// The channel could not be created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChannelBuildError {
    #[error("channel capacity must be at least 1")]
    ZeroCapacity,
}

/// The channel stayed full for the whole send timeout.
///
/// Carries the undelivered value; dropping the error drops the message.
#[derive(PartialEq, Eq, thiserror::Error)]
#[error("send timed out: channel full")]
pub struct SendTimeoutError<T>(pub T);

impl<T> SendTimeoutError<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for SendTimeoutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SendTimeoutError(..)")
    }
}

/// Fatal failures of the harness. Each one aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("failed to create {resource}: {reason}")]
    ResourceCreation {
        resource: &'static str,
        reason: String,
    },

    #[error("failed to start {worker}: {source}")]
    WorkerStart {
        worker: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("{worker} panicked before completing")]
    WorkerPanicked { worker: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ChannelBuildError> for HarnessError {
    fn from(e: ChannelBuildError) -> Self {
        HarnessError::ResourceCreation {
            resource: "message channel",
            reason: e.to_string(),
        }
    }
}
