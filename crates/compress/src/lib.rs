//! Decompression of mirror index files.
//!
//! Archive mirrors publish their index files gzip-compressed. This crate
//! wraps `flate2` behind a small [`Compression`] enum, providing:
//!
//! - **In-memory** compression ([`Compression::compress`])
//! - **Streaming** via wrapped readers ([`Compression::wrap_reader`])
//! - **Line splitting** of the decompressed payload ([`Compression::lines`])
//!
//! Every operation buffers its full output in memory; there is no partial
//! result on failure.

pub mod error;
mod lines;
mod ops;
mod util;

pub use crate::lines::Line;

/// A supported compression format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Gzip compression (.gz), one or more concatenated members.
    Gzip,
}
