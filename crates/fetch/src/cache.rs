//! On-disk cache of downloaded Contents files.
//!
//! One file per architecture, named exactly like the file on the mirror.
//! Entries are never expired; the only way to refresh one is to fetch again
//! without allowing the cache.

use crate::error::{ErrorKind, Result};
use debstat_compress::{Compression, Line};
use debstat_config::Architecture;
use exn::ResultExt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// File name of the Contents index for `arch`, on the mirror and on disk.
pub fn file_name(arch: Architecture) -> String {
    format!("Contents-{arch}{}", Compression::Gzip.extension())
}

/// A cache directory holding at most one entry per architecture.
#[derive(Clone, Debug)]
pub struct Cache {
    root: PathBuf,
}

impl Cache {
    /// The directory does not need to exist yet; it is created on the first
    /// [`persist`](Self::persist).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Location of the cache entry for `arch`, whether or not it exists.
    pub fn path(&self, arch: Architecture) -> PathBuf {
        self.root.join(file_name(arch))
    }

    /// Location of the cache entry for `arch`, only if it exists.
    pub fn lookup(&self, arch: Architecture) -> Option<PathBuf> {
        let path = self.path(arch);
        path.is_file().then_some(path)
    }

    /// Decompress a cache entry into lines.
    #[instrument(skip(self))]
    pub fn read_lines(&self, path: &Path) -> Result<Vec<Line>> {
        let file = File::open(path).or_raise(|| ErrorKind::CacheRead(path.to_path_buf()))?;
        Compression::Gzip.lines(file).map_err(ErrorKind::compression)
    }

    /// Write `data` as the cache entry for `arch`, replacing any previous
    /// entry, and return where it was written.
    ///
    /// Missing parent directories are created. The file is truncated before
    /// writing and closed on every path out of this function; a failure part
    /// way through can leave a partial entry behind. There is no locking and
    /// no fsync.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub fn persist(&self, arch: Architecture, data: &[u8]) -> Result<PathBuf> {
        let path = self.path(arch);
        let to_persist_error = || ErrorKind::Persist(path.clone());
        fs::create_dir_all(&self.root).or_raise(to_persist_error)?;
        let mut file = File::create(&path).or_raise(to_persist_error)?;
        file.write_all(data).or_raise(to_persist_error)?;
        file.flush().or_raise(to_persist_error)?;
        tracing::debug!(path = %path.display(), "cache entry written");
        Ok(path)
    }
}
