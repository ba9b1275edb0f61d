//! Proof-of-work algorithm identifiers.

use crate::error::StatsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mining algorithm that produced a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algo {
    /// Double SHA-256
    Sha256d,
    /// Scrypt
    Scrypt,
    /// Myriad-Groestl
    Groestl,
    /// Yescrypt
    Yescrypt,
    /// Argon2d
    Argon2d,
}

impl Algo {
    /// Every algorithm, in canonical display order.
    pub const ALL: [Algo; 5] = [
        Algo::Sha256d,
        Algo::Scrypt,
        Algo::Groestl,
        Algo::Yescrypt,
        Algo::Argon2d,
    ];

    /// Gets the tag used by the node's `pow_algo` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Algo::Sha256d => "sha256d",
            Algo::Scrypt => "scrypt",
            Algo::Groestl => "groestl",
            Algo::Yescrypt => "yescrypt",
            Algo::Argon2d => "argon2d",
        }
    }
}

impl fmt::Display for Algo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algo {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256d" | "sha256" => Ok(Algo::Sha256d),
            "scrypt" => Ok(Algo::Scrypt),
            "groestl" | "myr-gr" => Ok(Algo::Groestl),
            "yescrypt" => Ok(Algo::Yescrypt),
            "argon2d" | "argon2d4096" => Ok(Algo::Argon2d),
            _ => Err(StatsError::UnknownAlgo(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_node_tags() {
        for algo in Algo::ALL {
            assert_eq!(algo.as_str().parse::<Algo>().unwrap(), algo);
        }
        assert_eq!("SHA256D".parse::<Algo>().unwrap(), Algo::Sha256d);
        assert_eq!("myr-gr".parse::<Algo>().unwrap(), Algo::Groestl);
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let err = "x11".parse::<Algo>().unwrap_err();
        assert_eq!(err, StatsError::UnknownAlgo("x11".to_string()));
    }

    #[test]
    fn test_serde_uses_node_tags() {
        let json = serde_json::to_string(&Algo::Yescrypt).unwrap();
        assert_eq!(json, "\"yescrypt\"");
        let parsed: Algo = serde_json::from_str("\"argon2d\"").unwrap();
        assert_eq!(parsed, Algo::Argon2d);
    }
}
