// Refresh error type surfaced to consumers of the fee history view
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RefreshError {
    /// The remote fee API call failed. Holds the full context chain.
    #[error("failed to fetch fee history: {0}")]
    Fetch(String),
    #[error("malformed fee history: {min_len} min samples but {avg_len} avg samples")]
    MalformedSeries { min_len: usize, avg_len: usize },
    #[error("malformed fee history: timestamp of sample {index} is out of range")]
    TimestampOutOfRange { index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("fee history watcher has shut down")]
pub struct WatcherStopped;

impl From<anyhow::Error> for RefreshError {
    fn from(err: anyhow::Error) -> Self {
        RefreshError::Fetch(format!("{:#}", err))
    }
}
