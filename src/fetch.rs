use crate::rpc::{RpcFailure, RpcTransport};
use log::warn;
use serde_json::{json, Value};

/// Attached to the outcome when the endpoint rejected at least one of the
/// richer field sets before a leaner one succeeded.
pub const DEGRADED_FIELDS_WARNING: &str =
    "Some RPC fields are unavailable on this endpoint. Showing the most complete data we could fetch.";

/// Field sets to request, richest first. Gateways that cannot serve the richer
/// shapes get retried with a leaner one; the trailing `None` sends bare params
/// and takes whatever minimal shape the server defaults to.
fn option_candidates() -> [Option<Value>; 6] {
    [
        Some(json!({
            "showInput": true,
            "showEffects": true,
            "showEvents": true,
            "showObjectChanges": true,
            "showBalanceChanges": true,
        })),
        Some(json!({
            "showInput": true,
            "showEffects": true,
            "showObjectChanges": true,
            "showBalanceChanges": true,
        })),
        Some(json!({
            "showEffects": true,
            "showObjectChanges": true,
            "showBalanceChanges": true,
        })),
        Some(json!({
            "showEffects": true,
            "showBalanceChanges": true,
        })),
        Some(json!({
            "showEffects": true,
        })),
        None,
    ]
}

#[derive(Debug)]
pub struct FetchedTransaction {
    pub result: Value,
    pub warning: Option<&'static str>,
}

/// Retryable means a leaner request might still get through: transport
/// trouble, or an upstream message that reads like the node could not serve
/// the requested shape. Note that "unsupported" and "not ready" also appear
/// on permanently incompatible endpoints; they stay retryable here.
fn is_retryable(err: &RpcFailure) -> bool {
    if matches!(err, RpcFailure::Transport(_)) {
        return true;
    }
    let message = err.message().to_lowercase();
    message.contains("invalid response from upstream")
        || message.contains("timeout")
        || message.contains("timed out")
        || message.contains("unavailable")
        || message.contains("unsupported")
        || message.contains("not ready")
}

/// Fetch a transaction block, degrading the requested field set until the
/// endpoint accepts the request. Candidates are tried strictly in order and
/// the first success wins. Non-retryable errors abort the sequence; exhausting
/// it returns the last error.
pub async fn fetch_transaction_with_fallback(
    rpc: &dyn RpcTransport,
    digest: &str,
) -> Result<FetchedTransaction, RpcFailure> {
    let candidates = option_candidates();
    let last = candidates.len() - 1;

    for (i, options) in candidates.into_iter().enumerate() {
        let params = match options {
            Some(options) => json!([digest, options]),
            None => json!([digest]),
        };

        match rpc.call("sui_getTransactionBlock", params).await {
            Ok(result) => {
                return Ok(FetchedTransaction {
                    result,
                    warning: (i > 0).then_some(DEGRADED_FIELDS_WARNING),
                });
            }
            Err(err) => {
                if !is_retryable(&err) || i == last {
                    return Err(err);
                }
                warn!("RPC options rejected, retrying with a leaner payload: {err}");
            }
        }
    }

    unreachable!("the final candidate always returns")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_are_retryable() {
        assert!(is_retryable(&RpcFailure::Transport("connection reset".into())));
    }

    #[test]
    fn upstream_shape_complaints_are_retryable() {
        for message in [
            "Invalid response from upstream server",
            "request timed out",
            "method temporarily Unavailable",
            "showEvents is unsupported",
            "node not ready",
        ] {
            let err = RpcFailure::Rpc {
                code: -32000,
                message: message.to_string(),
            };
            assert!(is_retryable(&err), "expected retryable: {message}");
        }
    }

    #[test]
    fn other_rpc_errors_are_fatal() {
        let err = RpcFailure::Rpc {
            code: -32602,
            message: "Invalid params".to_string(),
        };
        assert!(!is_retryable(&err));
    }

    #[test]
    fn candidates_shrink_monotonically() {
        let lens: Vec<usize> = option_candidates()
            .iter()
            .map(|c| c.as_ref().map_or(0, |o| o.as_object().unwrap().len()))
            .collect();
        assert_eq!(lens, vec![5, 4, 3, 2, 1, 0]);
    }
}
