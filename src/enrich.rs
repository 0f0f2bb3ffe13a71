use crate::rpc::RpcTransport;
use crate::types::{BalanceSnapshot, EnrichedTransaction};
use futures::join;
use log::warn;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

/// Augment a base transaction record with checkpoint metadata, referenced
/// object details, and live balances. The three lookups run concurrently and
/// fail independently; a broken auxiliary lookup degrades to an empty slot
/// instead of failing the result.
pub async fn enrich_transaction(rpc: &dyn RpcTransport, base: Value) -> EnrichedTransaction {
    let (checkpoint_info, object_details, balance_snapshots) = join!(
        fetch_checkpoint_info(rpc, base.get("checkpoint")),
        fetch_object_details(rpc, base.get("objectChanges")),
        fetch_current_balances(rpc, base.get("balanceChanges")),
    );

    EnrichedTransaction {
        base,
        checkpoint_info,
        object_details,
        balance_snapshots,
    }
}

async fn fetch_checkpoint_info(
    rpc: &dyn RpcTransport,
    checkpoint: Option<&Value>,
) -> Option<Value> {
    // Forward the id verbatim; nodes disagree on string vs numeric encoding.
    let id = match checkpoint {
        Some(v) if !v.is_null() => v.clone(),
        _ => return None,
    };
    match rpc.call("sui_getCheckpoint", json!([id])).await {
        Ok(info) => Some(info),
        Err(err) => {
            warn!("Unable to fetch checkpoint info: {err}");
            None
        }
    }
}

async fn fetch_object_details(
    rpc: &dyn RpcTransport,
    object_changes: Option<&Value>,
) -> HashMap<String, Value> {
    let mut ids = Vec::new();
    let mut seen = HashSet::new();
    if let Some(changes) = object_changes.and_then(Value::as_array) {
        for change in changes {
            if let Some(id) = change.get("objectId").and_then(Value::as_str) {
                if !id.is_empty() && seen.insert(id.to_string()) {
                    ids.push(id.to_string());
                }
            }
        }
    }
    if ids.is_empty() {
        return HashMap::new();
    }

    // Type and owner only; content/display/bcs are never rendered.
    let options = json!({
        "showType": true,
        "showOwner": true,
        "showContent": false,
        "showDisplay": false,
        "showBcs": false,
    });

    match rpc.call("sui_multiGetObjects", json!([ids, options])).await {
        Ok(Value::Array(entries)) => {
            let mut details = HashMap::new();
            for entry in entries {
                if entry.get("error").is_some() {
                    continue;
                }
                if let Some(id) = entry.pointer("/data/objectId").and_then(Value::as_str) {
                    let id = id.to_string();
                    if let Some(data) = entry.get("data") {
                        details.insert(id, data.clone());
                    }
                }
            }
            details
        }
        Ok(other) => {
            warn!("Unexpected sui_multiGetObjects payload: {other}");
            HashMap::new()
        }
        Err(err) => {
            warn!("Unable to fetch object details: {err}");
            HashMap::new()
        }
    }
}

async fn fetch_current_balances(
    rpc: &dyn RpcTransport,
    balance_changes: Option<&Value>,
) -> Vec<BalanceSnapshot> {
    let mut targets: Vec<(String, String)> = Vec::new();
    let mut seen = HashSet::new();
    if let Some(changes) = balance_changes.and_then(Value::as_array) {
        for change in changes {
            let owner = change
                .pointer("/owner/AddressOwner")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty());
            let coin_type = change
                .get("coinType")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty());
            if let (Some(owner), Some(coin_type)) = (owner, coin_type) {
                if seen.insert(format!("{owner}::{coin_type}")) {
                    targets.push((owner.to_string(), coin_type.to_string()));
                }
            }
        }
    }

    // One request per pair, deliberately sequential.
    let mut snapshots = Vec::new();
    for (owner, coin_type) in targets {
        match rpc
            .call("sui_getBalance", json!([owner.as_str(), coin_type.as_str()]))
            .await
        {
            Ok(balance) => {
                let total_balance = balance
                    .get("totalBalance")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                snapshots.push(BalanceSnapshot {
                    owner,
                    coin_type,
                    total_balance,
                });
            }
            Err(err) => {
                warn!("Unable to fetch balance for {owner} ({coin_type}): {err}");
            }
        }
    }
    snapshots
}
