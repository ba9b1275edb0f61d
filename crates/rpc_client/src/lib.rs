// Copyright (C) 2017-2026 cryptapus.
//
// lib.rs file belongs to the myrstat project and is free
// software distributed under the GNU Lesser General Public License,
// version 2.1 or (at your option) any later version, see
// https://www.gnu.org/licenses/lgpl-2.1.html for more details.
//
// This software is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.

//! Myrstat RPC Client Library
//!
//! Fetches block ranges from a Myriad-style JSON-RPC node and converts them
//! into the records the statistics engine consumes. Failures are returned as
//! [`RpcException`]; nothing is retried.

pub mod models;
mod rpc_client;
mod rpc_exception;

pub use rpc_client::RpcClient;
pub use rpc_exception::{RpcException, INTERNAL_ERROR, PARSE_ERROR};

// Re-export commonly used types
pub use models::{RpcBlock, RpcBlockchainInfo, RpcRequest, RpcResponse, RpcResponseError};
