//! Myrstat Configuration Module
//!
//! This module provides the run configuration for the statistics tool: which
//! network to query, how to reach its RPC endpoint, and the window sizes.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Default Myriad mainnet RPC port
pub const DEFAULT_RPC_PORT: u16 = 10889;
/// Default Myriad testnet RPC port
pub const DEFAULT_TESTNET_RPC_PORT: u16 = 20889;
/// Default RPC host
pub const DEFAULT_RPC_HOST: &str = "127.0.0.1";
/// Concurrent block requests in flight during a fetch
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;
/// Per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Highest signal bit carried in the low byte of a block version
pub const MAX_SIGNAL_BIT: u32 = 8;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration was not valid TOML or did not match the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The selected network has no settings table.
    #[error("no [networks.{0}] table in configuration")]
    UnknownNetwork(String),

    /// A value failed validation.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A soft-fork deployment tracked by its version signal bit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Human readable deployment name
    pub name: String,
    /// Signal bit, 1-based from the least significant bit
    pub bit: u32,
}

impl Deployment {
    /// Creates a deployment entry
    pub fn new(name: impl Into<String>, bit: u32) -> Self {
        Self {
            name: name.into(),
            bit,
        }
    }
}

/// Known Myriad deployments
pub fn default_deployments() -> Vec<Deployment> {
    vec![
        Deployment::new("csv", 1),
        Deployment::new("segwit", 2),
        Deployment::new("legbit", 3),
        Deployment::new("reservealgo", 5),
        Deployment::new("longblocks", 6),
        Deployment::new("argon2d", 7),
    ]
}

fn default_rpc_host() -> String {
    DEFAULT_RPC_HOST.to_string()
}

fn default_rpc_port() -> u16 {
    DEFAULT_RPC_PORT
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_fetch_concurrency() -> usize {
    DEFAULT_FETCH_CONCURRENCY
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Per-network settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSettings {
    /// RPC user name
    pub rpc_user: String,
    /// RPC password
    pub rpc_password: String,
    /// RPC host name or address
    #[serde(default = "default_rpc_host")]
    pub rpc_host: String,
    /// RPC port
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,
    /// Directory the chart documents are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Look-back span in blocks
    pub block_window: usize,
    /// Number of output points
    pub block_domain: usize,
    /// Block requests in flight at once
    #[serde(default = "default_fetch_concurrency")]
    pub fetch_concurrency: usize,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl NetworkSettings {
    /// Endpoint URL for the node's RPC server
    pub fn rpc_url(&self) -> String {
        format!("http://{}:{}", self.rpc_host, self.rpc_port)
    }

    /// Validate these settings
    pub fn validate(&self) -> ConfigResult<()> {
        if self.block_window == 0 {
            return Err(ConfigError::Invalid(
                "block_window must be greater than 0".to_string(),
            ));
        }
        if self.block_domain == 0 {
            return Err(ConfigError::Invalid(
                "block_domain must be greater than 0".to_string(),
            ));
        }
        let fits = self
            .block_window
            .checked_add(self.block_domain)
            .and_then(|span| span.checked_add(1))
            .is_some_and(|len| i64::try_from(len).is_ok());
        if !fits {
            return Err(ConfigError::Invalid(
                "block_window + block_domain is too large".to_string(),
            ));
        }
        if self.fetch_concurrency == 0 {
            return Err(ConfigError::Invalid(
                "fetch_concurrency must be greater than 0".to_string(),
            ));
        }
        if self.rpc_host.trim().is_empty() {
            return Err(ConfigError::Invalid("rpc_host cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            rpc_user: String::new(),
            rpc_password: String::new(),
            rpc_host: default_rpc_host(),
            rpc_port: DEFAULT_RPC_PORT,
            output_dir: default_output_dir(),
            block_window: 2016,
            block_domain: 20160,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Name of the active `[networks.<name>]` table
    pub network: String,
    /// Settings for each known network
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkSettings>,
    /// Deployments whose signal bits are charted
    #[serde(default = "default_deployments")]
    pub deployments: Vec<Deployment>,
}

impl Default for StatsConfig {
    fn default() -> Self {
        let mut networks = BTreeMap::new();
        networks.insert("mainnet".to_string(), NetworkSettings::default());
        networks.insert(
            "testnet".to_string(),
            NetworkSettings {
                rpc_port: DEFAULT_TESTNET_RPC_PORT,
                ..NetworkSettings::default()
            },
        );
        Self {
            network: "mainnet".to_string(),
            networks,
            deployments: default_deployments(),
        }
    }
}

impl StatsConfig {
    /// Load and validate configuration from a TOML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), network = %config.network, "configuration loaded");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: StatsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Switch the active network
    pub fn select_network(&mut self, name: impl Into<String>) -> ConfigResult<()> {
        let name = name.into();
        if !self.networks.contains_key(&name) {
            return Err(ConfigError::UnknownNetwork(name));
        }
        self.network = name;
        Ok(())
    }

    /// Settings of the active network
    pub fn active_network(&self) -> ConfigResult<&NetworkSettings> {
        self.networks
            .get(&self.network)
            .ok_or_else(|| ConfigError::UnknownNetwork(self.network.clone()))
    }

    /// Mutable settings of the active network
    pub fn active_network_mut(&mut self) -> ConfigResult<&mut NetworkSettings> {
        let name = self.network.clone();
        self.networks
            .get_mut(&name)
            .ok_or(ConfigError::UnknownNetwork(name))
    }

    /// Signal bits of the configured deployments, in configuration order
    pub fn signal_bits(&self) -> Vec<u32> {
        self.deployments.iter().map(|d| d.bit).collect()
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        self.active_network()?.validate()?;

        let mut seen = HashSet::new();
        for deployment in &self.deployments {
            if deployment.bit == 0 || deployment.bit > MAX_SIGNAL_BIT {
                return Err(ConfigError::Invalid(format!(
                    "deployment '{}' uses bit {}, expected 1..={}",
                    deployment.name, deployment.bit, MAX_SIGNAL_BIT
                )));
            }
            if !seen.insert(deployment.bit) {
                return Err(ConfigError::Invalid(format!(
                    "signal bit {} is assigned to more than one deployment",
                    deployment.bit
                )));
            }
        }
        Ok(())
    }
}
