// Copyright (C) 2017-2026 cryptapus.
//
// rpc_request.rs file belongs to the myrstat project and is free
// software distributed under the GNU Lesser General Public License,
// version 2.1 or (at your option) any later version, see
// https://www.gnu.org/licenses/lgpl-2.1.html for more details.
//
// This software is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// Request ID
    pub id: Value,

    /// JSON-RPC version
    #[serde(rename = "jsonrpc")]
    pub json_rpc: String,

    /// Method name
    pub method: String,

    /// Method parameters
    pub params: Vec<Value>,
}

impl RpcRequest {
    /// Creates a new RPC request
    pub fn new(id: u64, method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            id: Value::from(id),
            json_rpc: "1.0".to_string(),
            method: method.into(),
            params,
        }
    }
}

/// Error object returned by the node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponseError {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
}

/// JSON-RPC response envelope
///
/// Bitcoin-derived nodes send `"error": null` on success and omit `jsonrpc`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Call result
    #[serde(default)]
    pub result: Option<Value>,
    /// Error object, if the call failed
    #[serde(default)]
    pub error: Option<RpcResponseError>,
    /// Echoed request ID
    #[serde(default)]
    pub id: Option<Value>,
}
