use clap::{Parser, ValueEnum};
use myr_config::StatsConfig;
use std::path::PathBuf;

/// Command-line arguments for myrstat
#[derive(Parser, Debug, Clone)]
#[command(
    name = "myrstat",
    version = crate::VERSION,
    about = "Rolling block statistics for Myriad-style chains",
    long_about = "myrstat fetches the most recent block range from a node over JSON-RPC, computes per-algorithm block share, difficulty and soft-fork signaling percentages, and writes one JSON chart document per chart for a plotting front end."
)]
pub struct CliArgs {
    /// Path to the TOML configuration file
    #[arg(short = 'c', long = "config", default_value = "config.toml", value_name = "FILE")]
    pub config: PathBuf,

    /// Selects a [networks.<NAME>] table other than the configured one
    #[arg(short = 'n', long = "network", value_name = "NAME")]
    pub network: Option<String>,

    /// Overrides the output directory
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Overrides the look-back span in blocks
    #[arg(long = "block-window", value_name = "BLOCKS")]
    pub block_window: Option<usize>,

    /// Overrides the number of output points
    #[arg(long = "block-domain", value_name = "BLOCKS")]
    pub block_domain: Option<usize>,

    /// Overrides the number of block requests in flight
    #[arg(long = "concurrency", value_name = "N")]
    pub concurrency: Option<usize>,

    /// Log level, used when RUST_LOG is not set
    #[arg(long = "log-level", value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

/// Log level enumeration
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Trace level logging
    Trace,
    /// Debug level logging
    Debug,
    /// Info level logging
    Info,
    /// Warning level logging
    Warn,
    /// Error level logging
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

impl CliArgs {
    /// Applies command-line overrides to a loaded configuration and
    /// re-validates it
    pub fn apply_to(&self, config: &mut StatsConfig) -> myr_config::ConfigResult<()> {
        if let Some(network) = &self.network {
            config.select_network(network.clone())?;
        }

        let settings = config.active_network_mut()?;
        if let Some(dir) = &self.output_dir {
            settings.output_dir = dir.clone();
        }
        if let Some(window) = self.block_window {
            settings.block_window = window;
        }
        if let Some(domain) = self.block_domain {
            settings.block_domain = domain;
        }
        if let Some(concurrency) = self.concurrency {
            settings.fetch_concurrency = concurrency;
        }

        config.validate()
    }
}
