// Copyright (C) 2017-2026 cryptapus.
//
// rpc_exception.rs file belongs to the myrstat project and is free
// software distributed under the GNU Lesser General Public License,
// version 2.1 or (at your option) any later version, see
// https://www.gnu.org/licenses/lgpl-2.1.html for more details.
//
// This software is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.

use std::fmt;
use thiserror::Error;

/// JSON-RPC error code for an unparseable response
pub const PARSE_ERROR: i32 = -32700;
/// JSON-RPC error code for a client-side or transport failure
pub const INTERNAL_ERROR: i32 = -32603;

/// Failure talking to the node, carrying the JSON-RPC error code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct RpcException {
    /// Error code reported by the node, or one of the client-side codes
    pub code: i32,

    /// Error message
    pub message: String,
}

impl RpcException {
    /// Creates a new RPC exception
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Transport or client-side failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }

    /// Response body could not be interpreted
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(PARSE_ERROR, message)
    }
}

impl fmt::Display for RpcException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}
