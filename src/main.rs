use clap::Parser;
use clap::builder::PossibleValuesParser;
use debstat::error::{ErrorKind, Result};
use debstat_config::{Architecture, Config, Overrides};
use debstat_fetch::transport::HttpTransport;
use exn::ResultExt;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Download the Contents index of a Debian mirror and list the packages
/// that install the most files.
#[derive(Parser, Debug)]
#[command(name = "debstat", version, about)]
struct Cli {
    /// Contents variant to print statistics for [default: all]
    #[arg(short, long, ignore_case = true, value_parser = PossibleValuesParser::new(Architecture::ALL.map(|arch| arch.as_str())))]
    arch: Option<String>,
    /// Download a fresh copy even if one is cached
    #[arg(long)]
    no_cache: bool,
    /// Mirror directory holding the Contents files
    #[arg(short, long)]
    mirror: Option<String>,
    /// Number of packages to list [default: 10]
    #[arg(short = 'n', long)]
    count: Option<usize>,
    /// Directory for cached Contents files
    #[arg(long)]
    cache_dir: Option<PathBuf>,
    /// Configuration file to read instead of the default one
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            architecture: self.arch.clone(),
            use_cache: self.no_cache.then_some(false),
            mirror: self.mirror.clone(),
            top_n: self.count,
            cache_dir: self.cache_dir.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(err.exit_code())
        },
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref(), cli.overrides()).or_raise(|| ErrorKind::Config)?;
    let mut stdout = std::io::stdout().lock();
    debstat::run(&config, HttpTransport::new(), &mut stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind as ClapErrorKind;
    use debstat::error::EXIT_USAGE;
    use std::io::Write;

    #[test]
    fn test_cli_rejects_unknown_arch() {
        let err = Cli::try_parse_from(["debstat", "--arch", "totally-armhf"]).unwrap_err();
        assert_eq!(err.kind(), ClapErrorKind::InvalidValue);
        assert_eq!(err.exit_code(), i32::from(EXIT_USAGE));
    }

    #[test]
    fn test_cli_arch_ignores_case() {
        let cli = Cli::try_parse_from(["debstat", "--arch", "UDEB-ARM64"]).unwrap();
        let arch = cli.overrides().architecture.unwrap();
        assert_eq!(arch.parse::<Architecture>().unwrap(), Architecture::UdebArm64);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from(["debstat", "--no-cache", "-n", "3", "--cache-dir", "/tmp/debstat"]).unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.use_cache, Some(false));
        assert_eq!(overrides.top_n, Some(3));
        assert_eq!(overrides.cache_dir, Some(PathBuf::from("/tmp/debstat")));
        assert_eq!(overrides.architecture, None);
        assert_eq!(Cli::try_parse_from(["debstat"]).unwrap().overrides().use_cache, None);
    }

    #[test]
    fn test_invalid_arch_in_config_file_is_usage_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "architecture = \"totally-armhf\"\ncache_dir = \"/tmp/debstat\"").unwrap();
        let path = file.path().to_str().unwrap();

        let cli = Cli::try_parse_from(["debstat", "--config", path]).unwrap();
        let err = run(&cli).unwrap_err();
        assert_eq!(*err, ErrorKind::Config);
        assert_eq!(err.exit_code(), EXIT_USAGE);
    }
}
