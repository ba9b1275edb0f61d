// Copyright (C) 2017-2026 cryptapus.
//
// rpc_client.rs file belongs to the myrstat project and is free
// software distributed under the GNU Lesser General Public License,
// version 2.1 or (at your option) any later version, see
// https://www.gnu.org/licenses/lgpl-2.1.html for more details.
//
// This software is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.

use crate::models::{RpcBlock, RpcBlockchainInfo, RpcRequest, RpcResponse};
use crate::rpc_exception::RpcException;
use base64::{engine::general_purpose, Engine as _};
use futures::stream::{self, StreamExt, TryStreamExt};
use myr_config::NetworkSettings;
use myr_core::{BlockDataset, BlockRecord, WindowParams};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, info};

/// JSON-RPC client for a Myriad-style node
pub struct RpcClient {
    base_address: Url,
    http_client: Client,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Creates a new RPC client with optional basic auth and request timeout
    pub fn new(
        url: Url,
        rpc_user: Option<String>,
        rpc_pass: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, RpcException> {
        let mut builder = Client::builder();

        if let (Some(user), Some(pass)) = (rpc_user, rpc_pass) {
            let encoded = general_purpose::STANDARD.encode(format!("{user}:{pass}"));
            let mut auth = HeaderValue::from_str(&format!("Basic {encoded}"))
                .map_err(|e| RpcException::internal(format!("invalid credentials: {e}")))?;
            auth.set_sensitive(true);

            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, auth);
            builder = builder.default_headers(headers);
        }

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| RpcException::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(http_client, url))
    }

    /// Creates a client from a network's configuration
    pub fn from_settings(settings: &NetworkSettings) -> Result<Self, RpcException> {
        let url = Url::parse(&settings.rpc_url())
            .map_err(|e| RpcException::internal(format!("invalid RPC url: {e}")))?;
        Self::new(
            url,
            Some(settings.rpc_user.clone()),
            Some(settings.rpc_password.clone()),
            Some(Duration::from_secs(settings.request_timeout_secs)),
        )
    }

    /// Creates a new RPC client with an existing HTTP client
    pub fn with_client(client: Client, url: Url) -> Self {
        Self {
            base_address: url,
            http_client: client,
            next_id: AtomicU64::new(1),
        }
    }

    fn as_rpc_request(&self, method: &str, params: Vec<Value>) -> RpcRequest {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        RpcRequest::new(id, method, params)
    }

    /// Interprets a response body. Nodes report call failures with a non-2xx
    /// status and a JSON error object, so the body is parsed first.
    fn as_rpc_response(content: &str, status: u16) -> Result<RpcResponse, RpcException> {
        let response: RpcResponse = match serde_json::from_str(content) {
            Ok(response) => response,
            Err(_) if !(200..300).contains(&status) => {
                return Err(RpcException::internal(format!("HTTP status {status}")))
            }
            Err(e) => return Err(RpcException::parse(format!("Parse error: {e}"))),
        };

        if let Some(error) = &response.error {
            return Err(RpcException::new(error.code, error.message.clone()));
        }

        Ok(response)
    }

    /// Sends an RPC request
    pub async fn send_async(&self, request: RpcRequest) -> Result<RpcResponse, RpcException> {
        let response = self
            .http_client
            .post(self.base_address.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcException::internal(format!("HTTP error: {e}")))?;

        let status = response.status().as_u16();
        let content = response
            .text()
            .await
            .map_err(|e| RpcException::internal(format!("Failed to read response: {e}")))?;

        Self::as_rpc_response(&content, status)
    }

    /// Sends an RPC request and returns the result
    pub async fn rpc_send_async(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, RpcException> {
        let request = self.as_rpc_request(method, params);
        let response = self.send_async(request).await?;
        response
            .result
            .ok_or_else(|| RpcException::internal(format!("{method}: no result returned")))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, RpcException> {
        let result = self.rpc_send_async(method, params).await?;
        serde_json::from_value(result)
            .map_err(|e| RpcException::parse(format!("{method}: unexpected result: {e}")))
    }

    // Blockchain methods

    /// Returns chain state, including the best block height
    pub async fn get_blockchain_info(&self) -> Result<RpcBlockchainInfo, RpcException> {
        self.call("getblockchaininfo", vec![]).await
    }

    /// Returns the hash of the block at `height` in the main chain
    pub async fn get_block_hash(&self, height: i64) -> Result<String, RpcException> {
        self.call("getblockhash", vec![Value::from(height)]).await
    }

    /// Returns the verbose block for `hash`
    pub async fn get_block(&self, hash: &str) -> Result<RpcBlock, RpcException> {
        self.call("getblock", vec![Value::from(hash)]).await
    }

    /// Fetches the block at `height` and converts it into a [`BlockRecord`]
    pub async fn get_block_record(&self, height: i64) -> Result<BlockRecord, RpcException> {
        let hash = self.get_block_hash(height).await?;
        let block = self.get_block(&hash).await?;
        if block.height != height {
            return Err(RpcException::parse(format!(
                "getblock {hash}: expected height {height}, got {}",
                block.height
            )));
        }
        BlockRecord::try_from(block)
    }

    /// Fetches every block in `range`, in height order, with up to
    /// `concurrency` requests in flight. The first failure aborts the fetch.
    pub async fn fetch_range(
        &self,
        range: RangeInclusive<i64>,
        concurrency: usize,
    ) -> Result<Vec<BlockRecord>, RpcException> {
        debug!(start = *range.start(), end = *range.end(), concurrency, "fetching blocks");
        stream::iter(range)
            .map(|height| self.get_block_record(height))
            .buffered(concurrency.max(1))
            .try_collect()
            .await
    }

    /// Fetches the block range a run with `params` needs, ending at the tip
    pub async fn fetch_dataset(
        &self,
        params: &WindowParams,
        concurrency: usize,
    ) -> Result<BlockDataset, RpcException> {
        let info = self.get_blockchain_info().await?;
        let range = params.fetch_range(info.blocks);
        info!(
            tip = info.blocks,
            start = *range.start(),
            blocks = range.end() - range.start() + 1,
            "fetching block range"
        );

        let records = self.fetch_range(range, concurrency).await?;
        BlockDataset::new(records).map_err(|e| RpcException::parse(e.to_string()))
    }
}
