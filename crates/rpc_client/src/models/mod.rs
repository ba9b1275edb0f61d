// Copyright (C) 2017-2026 cryptapus.
//
// mod.rs file belongs to the myrstat project and is free
// software distributed under the GNU Lesser General Public License,
// version 2.1 or (at your option) any later version, see
// https://www.gnu.org/licenses/lgpl-2.1.html for more details.
//
// This software is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.

//! RPC Models
//!
//! Request/response envelopes and the block shapes returned by the node.

mod rpc_block;
mod rpc_request;

pub use rpc_block::{RpcBlock, RpcBlockchainInfo};
pub use rpc_request::{RpcRequest, RpcResponse, RpcResponseError};
