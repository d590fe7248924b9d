//! Configuration loading and validation.
//!
//! Values are layered with `figment`, later sources winning:
//!
//! 1. built-in defaults,
//! 2. a TOML file (`--config`, or `config.toml` in the user config directory),
//! 3. `DEBSTAT_*` environment variables,
//! 4. command-line [`Overrides`].
//!
//! The merged values are validated into a [`Config`] before anything touches
//! the network or the cache.

mod arch;
pub mod error;

pub use crate::arch::Architecture;
use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

pub const APP_NAME: &str = "debstat";
pub const ENV_PREFIX: &str = "DEBSTAT_";
pub const DEFAULT_MIRROR: &str = "http://ftp.uk.debian.org/debian/dists/stable/main/";
pub const DEFAULT_TOP_N: usize = 10;
const CONFIG_FILE_NAME: &str = "config.toml";

/// Validated runtime configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Which Contents file variant to request.
    pub architecture: Architecture,
    /// Whether an existing cache entry may be used instead of the network.
    pub use_cache: bool,
    /// Base URL of the mirror directory holding the Contents files.
    pub mirror: String,
    /// How many ranked packages to report.
    pub top_n: usize,
    /// Directory holding cached Contents files.
    pub cache_dir: PathBuf,
}

/// Values supplied on the command line. Unset fields leave lower layers alone.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_cache: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

/// Merged, not yet validated, values.
#[derive(Debug, Deserialize, Serialize)]
struct Raw {
    architecture: String,
    use_cache: bool,
    mirror: String,
    top_n: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cache_dir: Option<PathBuf>,
}

impl Raw {
    fn defaults(dirs: Option<&ProjectDirs>) -> Self {
        Self {
            architecture: Architecture::default().to_string(),
            use_cache: true,
            mirror: DEFAULT_MIRROR.to_string(),
            top_n: DEFAULT_TOP_N,
            cache_dir: dirs.map(|dirs| dirs.cache_dir().to_path_buf()),
        }
    }
}

impl Config {
    /// Load configuration from every source for the current user.
    ///
    /// `file` replaces the default configuration file location and, unlike
    /// the default location, must exist.
    #[instrument(skip(overrides))]
    pub fn load(file: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let dirs = ProjectDirs::from("", "", APP_NAME);
        let figment = Self::figment(dirs.as_ref(), file)?
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(overrides));
        Self::from_figment(&figment)
    }

    /// Defaults, then the configuration file.
    fn figment(dirs: Option<&ProjectDirs>, file: Option<&Path>) -> Result<Figment> {
        let figment = Figment::from(Serialized::defaults(Raw::defaults(dirs)));
        let path = match file {
            Some(path) if !path.is_file() => exn::bail!(ErrorKind::MissingFile(path.to_path_buf())),
            Some(path) => path.to_path_buf(),
            None => match dirs {
                Some(dirs) => dirs.config_dir().join(CONFIG_FILE_NAME),
                None => return Ok(figment),
            },
        };
        tracing::debug!(path = %path.display(), "reading configuration file if present");
        Ok(figment.merge(Toml::file(path)))
    }

    /// Extract and validate configuration from an already assembled figment.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let raw: Raw = figment.extract().or_raise(|| ErrorKind::Load)?;
        Self::validate(raw)
    }

    fn validate(raw: Raw) -> Result<Self> {
        let architecture = raw.architecture.parse::<Architecture>()?;
        let mirror = raw.mirror.trim().to_string();
        if !(mirror.starts_with("http://") || mirror.starts_with("https://")) {
            exn::bail!(ErrorKind::InvalidMirror(raw.mirror));
        }
        let cache_dir = raw.cache_dir.ok_or_raise(|| ErrorKind::NoCacheDir)?;
        let config = Self {
            architecture,
            use_cache: raw.use_cache,
            mirror,
            top_n: raw.top_n,
            cache_dir,
        };
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }
}
