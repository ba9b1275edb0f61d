// Copyright (C) 2017-2026 cryptapus.
//
// rpc_block.rs file belongs to the myrstat project and is free
// software distributed under the GNU Lesser General Public License,
// version 2.1 or (at your option) any later version, see
// https://www.gnu.org/licenses/lgpl-2.1.html for more details.
//
// This software is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.

use crate::rpc_exception::RpcException;
use myr_core::{Algo, BlockRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Subset of `getblockchaininfo` the tool relies on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcBlockchainInfo {
    /// Chain name (main, test, regtest)
    #[serde(default)]
    pub chain: Option<String>,
    /// Height of the best block
    pub blocks: i64,
    /// Hash of the best block
    #[serde(default)]
    pub bestblockhash: Option<String>,
}

/// Verbose `getblock` result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcBlock {
    /// Block hash
    pub hash: String,
    /// Block height
    pub height: i64,
    /// Version as reported by the node; signed on the wire
    pub version: i64,
    /// Mining algorithm tag
    pub pow_algo: String,
    /// Difficulty for the block's algorithm
    pub difficulty: f64,
    /// Serialized size in bytes
    pub size: u64,
    /// Block timestamp
    pub time: u64,
    /// Transaction ids (or objects, at higher verbosity)
    #[serde(default)]
    pub tx: Vec<Value>,
}

impl RpcBlock {
    /// Version reinterpreted as the unsigned 32-bit header field.
    ///
    /// Values outside the 32-bit range keep their low 32 bits; they can never
    /// carry the signaling marker that way.
    pub fn version_bits(&self) -> u32 {
        match u32::try_from(self.version) {
            Ok(version) => version,
            Err(_) => {
                if i32::try_from(self.version).is_err() {
                    warn!(
                        height = self.height,
                        version = self.version,
                        "block version outside 32-bit range"
                    );
                }
                self.version as u32
            }
        }
    }
}

impl TryFrom<RpcBlock> for BlockRecord {
    type Error = RpcException;

    fn try_from(block: RpcBlock) -> Result<Self, Self::Error> {
        let algo: Algo = block.pow_algo.parse().map_err(|e| {
            RpcException::parse(format!("block {} at height {}: {e}", block.hash, block.height))
        })?;
        let tx_count = u32::try_from(block.tx.len())
            .map_err(|_| RpcException::parse(format!("block {}: too many transactions", block.hash)))?;

        Ok(BlockRecord {
            height: block.height,
            algo,
            difficulty: block.difficulty,
            version: block.version_bits(),
            size: block.size,
            time: block.time,
            tx_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "hash": "00000000000000001a2b",
            "confirmations": 3,
            "size": 1234,
            "height": 2_500_000,
            "version": 536_870_916,
            "pow_algo_id": 4,
            "pow_algo": "yescrypt",
            "pow_hash": "0000ab",
            "merkleroot": "ff00",
            "tx": ["aa", "bb", "cc"],
            "time": 1_520_000_000,
            "difficulty": 12.5,
            "previousblockhash": "0000fe"
        })
    }

    #[test]
    fn test_block_to_record() {
        let block: RpcBlock = serde_json::from_value(sample()).unwrap();
        let record = BlockRecord::try_from(block).unwrap();

        assert_eq!(record.height, 2_500_000);
        assert_eq!(record.algo, Algo::Yescrypt);
        assert_eq!(record.version, 0x2000_0004);
        assert_eq!(record.signal_bits().as_value(), 4);
        assert_eq!(record.tx_count, 3);
        assert_eq!(record.size, 1234);
    }

    #[test]
    fn test_negative_version_is_not_signaling() {
        let mut value = sample();
        value["version"] = json!(-1);
        let block: RpcBlock = serde_json::from_value(value).unwrap();
        assert_eq!(block.version_bits(), u32::MAX);

        let record = BlockRecord::try_from(block).unwrap();
        assert_eq!(record.signal_bits().as_value(), -1);
    }

    #[test]
    fn test_unknown_algo_is_rejected() {
        let mut value = sample();
        value["pow_algo"] = json!("x17");
        let block: RpcBlock = serde_json::from_value(value).unwrap();
        let err = BlockRecord::try_from(block).unwrap_err();
        assert_eq!(err.code, crate::rpc_exception::PARSE_ERROR);
        assert!(err.message.contains("x17"));
    }
}
