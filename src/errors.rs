use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The central error type for slabq.
///
/// Queue failures and driver configuration failures both funnel into this
/// type so the binary can map them onto process exit codes.
#[derive(Error, Debug)]
pub enum SlabqError {
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failures reported by [`crate::queue::BoundedBlockingQueue`].
///
/// `push` has no error path; only construction and the reading side fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Queue capacity must be at least 1 (requested {requested})")]
    InvalidCapacity { requested: usize },

    #[error("Queue pop timed out after {waited:?}")]
    Timeout { waited: Duration },

    #[error("Queue is closed and empty")]
    Closed,
}

impl QueueError {
    /// True for the deadline-exceeded outcome of `pop_timeout` / `pop_until`.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, SlabqError>;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_TIMEOUT: u8 = 3;

/// Determine the appropriate process exit code for an error.
pub fn get_exit_code(e: &anyhow::Error) -> u8 {
    if let Some(slabq_err) = e.downcast_ref::<SlabqError>() {
        return match slabq_err {
            SlabqError::Config(_) => EXIT_CONFIG_ERROR,
            SlabqError::Queue(q) if q.is_timeout() => EXIT_TIMEOUT,
            _ => EXIT_ERROR,
        };
    }

    // Direct enum unwraps fallback
    if e.downcast_ref::<ConfigError>().is_some() {
        return EXIT_CONFIG_ERROR;
    }
    if let Some(q) = e.downcast_ref::<QueueError>() {
        return if q.is_timeout() {
            EXIT_TIMEOUT
        } else {
            EXIT_ERROR
        };
    }

    EXIT_ERROR
}
