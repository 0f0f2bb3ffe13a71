//! Scripted in-memory RPC transport shared by the integration tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use suix::rpc::{RpcFailure, RpcTransport};

#[derive(Default)]
pub struct ScriptedRpc {
    replies: Mutex<HashMap<String, VecDeque<Result<Value, RpcFailure>>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedRpc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next call of `method`. Replies drain in FIFO
    /// order per method.
    pub fn push(&self, method: &str, reply: Result<Value, RpcFailure>) {
        self.replies
            .lock()
            .unwrap()
            .entry(method.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, method: &str) -> Vec<Value> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }
}

#[async_trait]
impl RpcTransport for ScriptedRpc {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcFailure> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params));
        self.replies
            .lock()
            .unwrap()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| panic!("no scripted reply left for {method}"))
    }
}

pub fn rpc_error(message: &str) -> RpcFailure {
    RpcFailure::Rpc {
        code: -32000,
        message: message.to_string(),
    }
}
