use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

static HTTP: OnceLock<reqwest::Client> = OnceLock::new();

fn http_client() -> &'static reqwest::Client {
    HTTP.get_or_init(|| {
        reqwest::Client::builder()
            .pool_max_idle_per_host(4)
            .tcp_nodelay(true)
            .build()
            .expect("reqwest client")
    })
}

// Fresh id per outgoing request; upstream gateways reject reused ids.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Classified failure of a single JSON-RPC call.
#[derive(Debug, thiserror::Error)]
pub enum RpcFailure {
    /// The transport failed: connection error, abort, or a non-2xx HTTP status.
    #[error("transport error: {0}")]
    Transport(String),
    /// The endpoint answered 2xx but reported an application error body.
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
}

impl RpcFailure {
    /// The human-readable part, without the code prefix.
    pub fn message(&self) -> &str {
        match self {
            RpcFailure::Transport(message) => message,
            RpcFailure::Rpc { message, .. } => message,
        }
    }
}

/// Single-method JSON-RPC invoker. Production uses [`HttpTransport`]; tests
/// substitute a scripted implementation.
///
/// No retry happens at this layer. Retry policy belongs to callers.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcFailure>;
}

/// JSON-RPC 2.0 over HTTP POST against a single endpoint URL.
pub struct HttpTransport {
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(endpoint: &str, api_key: Option<&str>, timeout_ms: u64) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            api_key: api_key.map(|k| k.to_string()),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcFailure> {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let mut req = http_client()
            .post(&self.endpoint)
            .header("accept", "application/json")
            .json(&body)
            .timeout(self.timeout);

        if let Some(key) = &self.api_key {
            req = req.header("x-api-key", key);
        }

        let res = req
            .send()
            .await
            .map_err(|e| RpcFailure::Transport(e.to_string()))?;

        if !res.status().is_success() {
            return Err(RpcFailure::Transport(format!(
                "RPC request failed with status {}",
                res.status()
            )));
        }

        let v: Value = res
            .json()
            .await
            .map_err(|e| RpcFailure::Transport(format!("invalid response body: {e}")))?;

        if let Some(err) = v.get("error") {
            let code = err.get("code").and_then(|c| c.as_i64()).unwrap_or_default();
            let message = err
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("RPC returned an error")
                .to_string();
            return Err(RpcFailure::Rpc { code, message });
        }

        match v.get("result") {
            Some(r) => Ok(r.clone()),
            None => Err(RpcFailure::Transport(
                "invalid rpc payload (no result)".into(),
            )),
        }
    }
}
