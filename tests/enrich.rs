//! Enrichment orchestrator behavior: dedup, per-entry error skipping, and
//! isolation of auxiliary-lookup failures.

mod common;

use common::{rpc_error, ScriptedRpc};
use serde_json::json;
use suix::enrich::enrich_transaction;

#[tokio::test]
async fn object_detail_ids_are_deduplicated_and_errors_skipped() {
    let rpc = ScriptedRpc::new();
    rpc.push(
        "sui_multiGetObjects",
        Ok(json!([
            {"data": {"objectId": "0xaaa", "type": "0x2::coin::Coin", "version": "5"}},
            {"error": {"code": "notExists", "object_id": "0xbbb"}},
        ])),
    );

    let base = json!({
        "objectChanges": [
            {"type": "created", "objectId": "0xaaa"},
            {"type": "mutated", "objectId": "0xaaa"},
            {"type": "deleted", "objectId": "0xbbb"},
            {"type": "published"},
        ]
    });

    let enriched = enrich_transaction(&rpc, base).await;

    let calls = rpc.calls_for("sui_multiGetObjects");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0][0], json!(["0xaaa", "0xbbb"]));
    assert_eq!(calls[0][1]["showType"], true);
    assert_eq!(calls[0][1]["showOwner"], true);
    assert_eq!(calls[0][1]["showContent"], false);

    assert_eq!(enriched.object_details.len(), 1);
    assert_eq!(
        enriched.object_details["0xaaa"]["type"],
        "0x2::coin::Coin"
    );
}

#[tokio::test]
async fn no_object_changes_means_no_object_lookup() {
    let rpc = ScriptedRpc::new();
    let enriched = enrich_transaction(&rpc, json!({"digest": "abc"})).await;
    assert!(enriched.object_details.is_empty());
    assert!(rpc.calls().is_empty());
}

#[tokio::test]
async fn balance_pairs_are_deduplicated_and_failures_omitted() {
    let rpc = ScriptedRpc::new();
    rpc.push(
        "sui_getBalance",
        Ok(json!({"coinType": "0x2::sui::SUI", "totalBalance": "5000000000"})),
    );
    rpc.push("sui_getBalance", Err(rpc_error("owner not indexed")));

    let base = json!({
        "balanceChanges": [
            {"owner": {"AddressOwner": "0x1"}, "coinType": "0x2::sui::SUI", "amount": "-100"},
            {"owner": {"AddressOwner": "0x1"}, "coinType": "0x2::sui::SUI", "amount": "40"},
            {"owner": {"AddressOwner": "0x2"}, "coinType": "0xa::usdc::USDC", "amount": "7"},
            {"owner": {"ObjectOwner": "0x3"}, "coinType": "0x2::sui::SUI", "amount": "1"},
            {"owner": {"AddressOwner": "0x4"}, "amount": "1"},
        ]
    });

    let enriched = enrich_transaction(&rpc, base).await;

    // Object-owned and coin-type-less entries produce no lookup targets.
    let calls = rpc.calls_for("sui_getBalance");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], json!(["0x1", "0x2::sui::SUI"]));
    assert_eq!(calls[1], json!(["0x2", "0xa::usdc::USDC"]));

    assert_eq!(enriched.balance_snapshots.len(), 1);
    let snapshot = &enriched.balance_snapshots[0];
    assert_eq!(snapshot.owner, "0x1");
    assert_eq!(snapshot.coin_type, "0x2::sui::SUI");
    assert_eq!(snapshot.total_balance.as_deref(), Some("5000000000"));
}

#[tokio::test]
async fn checkpoint_failure_degrades_to_none() {
    let rpc = ScriptedRpc::new();
    rpc.push("sui_getCheckpoint", Err(rpc_error("pruned")));

    let enriched = enrich_transaction(&rpc, json!({"checkpoint": "123"})).await;
    assert!(enriched.checkpoint_info.is_none());
    assert_eq!(rpc.calls_for("sui_getCheckpoint")[0], json!(["123"]));
}

#[tokio::test]
async fn checkpoint_lookup_succeeds_alongside_failing_branches() {
    let rpc = ScriptedRpc::new();
    rpc.push(
        "sui_getCheckpoint",
        Ok(json!({"proposer": "0xval", "timestampMs": "1700000000000"})),
    );
    rpc.push("sui_multiGetObjects", Err(rpc_error("not ready")));

    let base = json!({
        "checkpoint": "9001",
        "objectChanges": [{"type": "created", "objectId": "0xaaa"}],
    });
    let enriched = enrich_transaction(&rpc, base).await;

    assert_eq!(enriched.checkpoint_info.unwrap()["proposer"], "0xval");
    assert!(enriched.object_details.is_empty());
}

#[tokio::test]
async fn total_object_lookup_failure_degrades_to_empty_map() {
    let rpc = ScriptedRpc::new();
    rpc.push("sui_multiGetObjects", Err(rpc_error("unavailable")));

    let base = json!({"objectChanges": [{"type": "created", "objectId": "0xaaa"}]});
    let enriched = enrich_transaction(&rpc, base).await;
    assert!(enriched.object_details.is_empty());
}
