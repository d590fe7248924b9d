//! Configuration Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A configuration error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// Every one of these is a problem with what the user asked for; none of
/// them involve the network or the cache.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Not one of the Contents variants published by a mirror.
    #[display("unknown architecture: {_0}")]
    InvalidArchitecture(#[error(not(source))] String),
    /// The mirror is not an HTTP(S) URL.
    #[display("invalid mirror URL: {_0}")]
    InvalidMirror(#[error(not(source))] String),
    /// An explicitly requested configuration file does not exist.
    #[display("configuration file not found: {}", _0.display())]
    MissingFile(#[error(not(source))] PathBuf),
    /// No cache directory was configured and none could be determined.
    #[display("unable to determine a cache directory")]
    NoCacheDir,
    /// Configuration sources could not be merged or deserialized.
    #[display("unable to load configuration")]
    Load,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Configuration doesn't change between attempts.
        false
    }
}
