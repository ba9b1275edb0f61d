//! Configuration Loading Tests
//!
//! Exercises TOML loading the way the binary reads its configuration file.

use myr_config::*;
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE: &str = r#"
network = "mainnet"

[networks.mainnet]
rpc_user = "myriad"
rpc_password = "secret"
rpc_host = "192.168.1.20"
rpc_port = 10889
output_dir = "/var/www/html/"
block_window = 2016
block_domain = 20160

[networks.testnet]
rpc_user = "test"
rpc_password = "test"
rpc_port = 20889
block_window = 100
block_domain = 1000
fetch_concurrency = 2
request_timeout_secs = 5

[[deployments]]
name = "legbit"
bit = 3

[[deployments]]
name = "argon2d"
bit = 7
"#;

#[cfg(test)]
mod config_tests {
    use super::*;

    /// Full configuration file loads from disk
    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = StatsConfig::load(file.path()).unwrap();
        assert_eq!(config.network, "mainnet");

        let mainnet = config.active_network().unwrap();
        assert_eq!(mainnet.rpc_url(), "http://192.168.1.20:10889");
        assert_eq!(mainnet.block_window, 2016);
        assert_eq!(mainnet.block_domain, 20160);
        assert_eq!(mainnet.fetch_concurrency, DEFAULT_FETCH_CONCURRENCY);
        assert_eq!(mainnet.output_dir.to_str(), Some("/var/www/html/"));

        assert_eq!(config.signal_bits(), vec![3, 7]);
    }

    /// Omitted optional keys fall back to defaults
    #[test]
    fn test_defaults_applied() {
        let config = StatsConfig::from_toml_str(SAMPLE).unwrap();
        let testnet = &config.networks["testnet"];
        assert_eq!(testnet.rpc_host, DEFAULT_RPC_HOST);
        assert_eq!(testnet.fetch_concurrency, 2);
        assert_eq!(testnet.request_timeout_secs, 5);
        assert_eq!(testnet.output_dir.to_str(), Some("."));
    }

    /// Deployments default to the known Myriad bits
    #[test]
    fn test_default_deployments() {
        let minimal = r#"
network = "local"
[networks.local]
rpc_user = "u"
rpc_password = "p"
block_window = 10
block_domain = 10
"#;
        let config = StatsConfig::from_toml_str(minimal).unwrap();
        assert_eq!(config.deployments, default_deployments());
        assert_eq!(config.active_network().unwrap().rpc_port, DEFAULT_RPC_PORT);
    }

    /// Selecting a network without a table is rejected
    #[test]
    fn test_missing_network_table() {
        let text = SAMPLE.replace("network = \"mainnet\"", "network = \"regtest\"");
        let err = StatsConfig::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNetwork(name) if name == "regtest"));
    }

    /// Malformed TOML surfaces a parse error
    #[test]
    fn test_parse_error() {
        let err = StatsConfig::from_toml_str("network = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    /// Missing files report their path
    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = StatsConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    /// Configuration written back out parses to the same values
    #[test]
    fn test_toml_output_reloads() {
        let config = StatsConfig::from_toml_str(SAMPLE).unwrap();
        let text = config.to_toml_string().unwrap();
        assert_eq!(StatsConfig::from_toml_str(&text).unwrap(), config);
    }

    /// The shipped example configuration is valid
    #[test]
    fn test_example_file_parses() {
        let text = include_str!("../../../config.example.toml");
        let config = StatsConfig::from_toml_str(text).unwrap();
        assert_eq!(config.network, "mainnet");
        assert_eq!(config.signal_bits(), vec![1, 2, 3, 5, 6, 7]);
        assert_eq!(
            config.networks["testnet"].fetch_concurrency,
            DEFAULT_FETCH_CONCURRENCY
        );
    }
}
