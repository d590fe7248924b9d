//! Fetch Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use debstat_compress::error::{Error as CompressionError, ErrorKind as CompressionErrorKind};
use derive_more::{Display, Error};
use std::path::PathBuf;

/// A fetch error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The mirror answered, but not with a success status.
    #[display("mirror responded with HTTP {status} for {url}")]
    Status { url: String, status: u16 },
    /// The mirror could not be reached or the response body was cut short.
    #[display("network error fetching {_0}")]
    Network(#[error(not(source))] String),
    /// A cache entry exists but could not be read.
    #[display("unable to read cache file: {}", _0.display())]
    CacheRead(#[error(not(source))] PathBuf),
    /// Downloaded data could not be written to the cache. Never fatal on its
    /// own; the downloaded copy is still usable.
    #[display("unable to persist cache file: {}", _0.display())]
    Persist(#[error(not(source))] PathBuf),
    /// The payload is not valid gzip, or is truncated.
    #[display("decompression error: {_0}")]
    Decompression(CompressionErrorKind),
}

impl ErrorKind {
    /// Convert a compression error into a fetch error, preserving the
    /// compress crate's `Exn` frame as a child in its own error tree.
    #[track_caller]
    pub fn compression(err: CompressionError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Decompression(inner))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::CacheRead(_) | Self::Persist(_) => true,
            Self::Decompression(_) => false,
        }
    }
}
