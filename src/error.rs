//! Driver Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction.

use derive_more::{Display, Error};

/// A driver error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for driver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit status for a usage or configuration problem.
pub const EXIT_USAGE: u8 = 2;
/// Process exit status for every other failure.
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any network or cache access.
    #[display("invalid configuration")]
    Config,
    /// Neither the cache nor the mirror produced a usable Contents file.
    #[display("unable to obtain Contents file")]
    Fetch,
    /// The report could not be written out.
    #[display("unable to write report")]
    Output,
}

impl ErrorKind {
    /// Exit status the process should end with.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config => EXIT_USAGE,
            Self::Fetch | Self::Output => EXIT_FAILURE,
        }
    }
}
