//! Obtaining Contents files, from the local cache or from a mirror.
//!
//! [`Fetcher::fetch`] is the single entry point. With the cache allowed and
//! an entry present, it never touches the network. Otherwise it downloads
//! `<mirror>/Contents-<arch>.gz`, writes the raw bytes to the cache and
//! decompresses the copy it already holds in memory.

pub mod cache;
pub mod error;
pub mod transport;

pub use crate::cache::Cache;
use crate::error::{Error, ErrorKind, Result};
use crate::transport::Transport;
use debstat_compress::{Compression, Line};
use debstat_config::Architecture;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use tracing::instrument;

/// Where the lines of a [`Contents`] came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Read from an existing cache entry.
    Cache(PathBuf),
    /// Downloaded from this URL.
    Network(String),
}

impl Source {
    pub fn is_cache(&self) -> bool {
        matches!(self, Source::Cache(_))
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Source::Cache(path) => write!(f, "cache file {}", path.display()),
            Source::Network(url) => write!(f, "mirror {url}"),
        }
    }
}

/// A decompressed Contents file.
#[derive(Debug)]
pub struct Contents {
    pub lines: Vec<Line>,
    pub source: Source,
    /// Set when a download could not be written to the cache. The lines are
    /// still complete; only the next run loses out.
    pub persist_error: Option<Error>,
}

/// Fetches Contents files for one mirror and one cache directory.
pub struct Fetcher<T> {
    transport: T,
    mirror: String,
    cache: Cache,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(transport: T, mirror: impl Into<String>, cache: Cache) -> Self {
        Self {
            transport,
            mirror: mirror.into(),
            cache,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// URL of the Contents file for `arch` on the configured mirror.
    ///
    /// ```
    /// use debstat_config::Architecture;
    /// use debstat_fetch::{Cache, Fetcher, transport::HttpTransport};
    ///
    /// let fetcher = Fetcher::new(HttpTransport::new(), "http://deb.debian.org/debian/dists/stable/main/", Cache::new("/tmp"));
    /// assert_eq!(
    ///     fetcher.url(Architecture::UdebAmd64),
    ///     "http://deb.debian.org/debian/dists/stable/main/Contents-udeb-amd64.gz"
    /// );
    /// ```
    pub fn url(&self, arch: Architecture) -> String {
        format!("{}/{}", self.mirror.trim_end_matches('/'), cache::file_name(arch))
    }

    /// Produce the decompressed lines of the Contents file for `arch`.
    ///
    /// With `allow_cached` set and a cache entry present, the entry is read
    /// and nothing is requested. Otherwise exactly one request is made; a
    /// non-success status fails the fetch without writing to the cache. A
    /// successful download is persisted before it is decompressed, and a
    /// failure to persist is reported through
    /// [`Contents::persist_error`] rather than failing the fetch.
    #[instrument(skip(self), fields(transport = self.transport.name(), source))]
    pub fn fetch(&self, arch: Architecture, allow_cached: bool) -> Result<Contents> {
        if allow_cached && let Some(path) = self.cache.lookup(arch) {
            tracing::Span::current().record("source", "cache");
            tracing::info!(path = %path.display(), "using cached Contents file");
            let lines = self.cache.read_lines(&path)?;
            return Ok(Contents {
                lines,
                source: Source::Cache(path),
                persist_error: None,
            });
        }

        tracing::Span::current().record("source", "network");
        let url = self.url(arch);
        tracing::info!(%url, "downloading Contents file");
        let body = self.transport.get(&url)?;

        let persist_error = match self.cache.persist(arch, &body) {
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(error = ?err, "unable to cache downloaded Contents file");
                Some(err)
            },
        };

        let lines = Compression::Gzip.lines(body.as_slice()).map_err(ErrorKind::compression)?;
        Ok(Contents {
            lines,
            source: Source::Network(url),
            persist_error,
        })
    }
}
