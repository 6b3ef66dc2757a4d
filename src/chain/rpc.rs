//! JSON-RPC 2.0 transport over HTTP.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::trace;

use crate::chain::Transport;
use crate::errors::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport speaking JSON-RPC 2.0 to a node endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<serde_json::Value>,
    error: Option<RpcError>,
}

#[derive(Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

impl HttpTransport {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Rpc(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.to_string(),
            next_id: AtomicU64::new(1),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        trace!(method, id, "rpc request");
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Rpc(format!("request failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Rpc(format!("HTTP {status} from {}", self.url)));
        }
        let parsed: RpcResponse = response
            .json()
            .await
            .map_err(|e| Error::Rpc(format!("invalid response body: {e}")))?;
        if let Some(err) = parsed.error {
            return Err(Error::Rpc(format!("{} (code {})", err.message, err.code)));
        }
        parsed
            .result
            .ok_or_else(|| Error::Rpc("response missing result".to_string()))
    }
}
