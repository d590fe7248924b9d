//! Rank the packages of a Debian archive by how many files they install.
//!
//! [`run`] wires the pieces together: fetch (or reuse) the Contents file,
//! decompress it, tally every line, and print the top of the ranking.

pub mod error;

use crate::error::{ErrorKind, Result};
use debstat_config::Config;
use debstat_contents::{Ranked, Tally};
use debstat_fetch::transport::Transport;
use debstat_fetch::{Cache, Fetcher, Source, cache};
use exn::ResultExt;
use std::io::Write;
use tracing::instrument;

/// What a single run found.
#[derive(Debug)]
pub struct Report {
    pub source: Source,
    /// Lines in the Contents file, malformed ones included.
    pub rows: usize,
    pub malformed: usize,
    /// Whether the download could not be written to the cache.
    pub persist_failed: bool,
    pub ranking: Vec<Ranked>,
}

/// Fetch, tally and print the ranking described by `config` to `out`.
///
/// Progress lines come first, then one `<rank>. <package> <count>` line per
/// ranked package. Malformed lines in the Contents file are counted and
/// reported, never fatal; a download that can't be cached is reported and
/// still used.
#[instrument(skip_all, fields(arch = %config.architecture, use_cache = config.use_cache))]
pub fn run<T: Transport>(config: &Config, transport: T, out: &mut impl Write) -> Result<Report> {
    let file_name = cache::file_name(config.architecture);
    let fetcher = Fetcher::new(transport, config.mirror.as_str(), Cache::new(&config.cache_dir));

    let contents = fetcher.fetch(config.architecture, config.use_cache).or_raise(|| ErrorKind::Fetch)?;
    let write_error = || ErrorKind::Output;

    writeln!(out, "Loaded {file_name} from {}", contents.source).or_raise(write_error)?;
    if let Some(err) = &contents.persist_error {
        writeln!(out, "Warning: {}; the next run will download it again", **err).or_raise(write_error)?;
    }
    writeln!(out, "Data file contains {} rows", contents.lines.len()).or_raise(write_error)?;

    let tally = Tally::from_lines(&contents.lines);
    writeln!(out, "Done. Found {} malformed lines in {file_name}", tally.malformed()).or_raise(write_error)?;

    let ranking = tally.packages().top(config.top_n);
    for ranked in &ranking {
        writeln!(out, "{}. {} {}", ranked.rank, ranked.name(), ranked.count).or_raise(write_error)?;
    }
    out.flush().or_raise(write_error)?;

    Ok(Report {
        source: contents.source,
        rows: tally.rows(),
        malformed: tally.malformed(),
        persist_failed: contents.persist_error.is_some(),
        ranking,
    })
}
