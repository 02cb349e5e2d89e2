//! Command-line interface definition.

use clap::Parser;
use std::path::PathBuf;

use crate::logging::{LogLevel, TracingFormat};

/// Install released CLI tools into a GitHub Actions job.
///
/// Per-tool version requests arrive as step inputs (`INPUT_<NAME>`
/// environment variables): empty means skip, `latest` resolves the
/// newest release, anything else is used as an explicit tag. Every
/// installed tool's directory is appended to `GITHUB_PATH`.
#[derive(Debug, Parser)]
#[command(name = "relkit", version, about)]
pub struct Cli {
    /// Directory tools are installed under (default: the user cache
    /// directory)
    #[arg(long, env = "RELKIT_INSTALL_DIR")]
    pub install_dir: Option<PathBuf>,

    /// Log verbosity (RUST_LOG overrides this)
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log output format
    #[arg(long, value_enum, default_value = "compact")]
    pub log_format: TracingFormat,
}

/// Parse command line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Resolve the install root: the flag wins, then the user cache
/// directory, then a relative fallback for minimal environments.
#[must_use]
pub fn install_root(cli: &Cli) -> PathBuf {
    cli.install_dir.clone().unwrap_or_else(|| {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("relkit")
            .join("tools")
    })
}
