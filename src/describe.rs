//! Natural-language fragments for ownership, object changes, and events.
//! Pure functions over already-parsed records; no I/O.

use crate::types::{ObjectChangeKind, ObjectChangeRecord, OwnerKind};
use crate::util_text::shorten6;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;

pub fn describe_owner(owner: &OwnerKind) -> String {
    match owner {
        OwnerKind::Address(addr) => format!("address {addr}"),
        OwnerKind::Object(id) => format!("object {id}"),
        OwnerKind::Shared {
            initial_version: Some(v),
        } => format!("shared object (initial v{v})"),
        OwnerKind::Shared {
            initial_version: None,
        } => "shared object".to_string(),
        OwnerKind::Immutable => "immutable".to_string(),
        OwnerKind::Unknown => "unknown owner".to_string(),
    }
}

/// One sentence for an object-change record, folding in the enriched object
/// detail when present: its type backfills a missing `objectType` and its
/// version renders as ` (vN)`.
pub fn describe_object_change(change: &ObjectChangeRecord, detail: Option<&Value>) -> String {
    let owner = describe_owner(&change.owner);
    let detail_type = detail.and_then(|d| {
        d.get("type")
            .or_else(|| d.pointer("/content/type"))
            .and_then(Value::as_str)
    });
    let object_type = change
        .object_type
        .as_deref()
        .or(detail_type)
        .unwrap_or("object");
    let version = detail
        .and_then(|d| d.get("version"))
        .filter(|v| !v.is_null())
        .map(|v| match v.as_str() {
            Some(s) => format!(" (v{s})"),
            None => format!(" (v{v})"),
        })
        .unwrap_or_default();
    let id = &change.object_id;

    match &change.kind {
        ObjectChangeKind::Created => {
            format!("Created {object_type}{version} {id} owned by {owner}.")
        }
        ObjectChangeKind::Mutated => {
            format!("Mutated {object_type}{version} {id} now owned by {owner}.")
        }
        ObjectChangeKind::Transferred => {
            format!("Transferred {object_type}{version} {id} to {owner}.")
        }
        ObjectChangeKind::Deleted => format!("Deleted {object_type}{version} {id}."),
        ObjectChangeKind::Wrapped => {
            format!("Wrapped {object_type}{version} {id} into another object.")
        }
        ObjectChangeKind::Other(kind) => {
            let kind = if kind.is_empty() { "Change" } else { kind };
            format!("{kind} on {object_type} {id} ({owner}).")
        }
    }
}

/// Short identity line for an event type: `module::name (package 0xabcd…ef)`.
pub fn describe_event_type(event_type: Option<&str>) -> String {
    let Some(event_type) = event_type.filter(|t| !t.is_empty()) else {
        return "Unknown event".to_string();
    };
    let parts = crate::types::parse_move_type(event_type);
    format!(
        "{}::{} (package {})",
        parts.module,
        parts.name,
        shorten6(&parts.address)
    )
}

// Well-known event signatures, keyed by `module::StructName`.
const EVENT_DESCRIPTIONS: &[(&str, &str)] = &[
    // Core Sui / 0x2 framework events
    (
        "coin::MintEvent",
        "New coins got minted for a specific coin type (supply increased).",
    ),
    (
        "coin::BurnEvent",
        "Coins were burned and removed from circulation.",
    ),
    (
        "coin::TransferEvent",
        "Generic coin handoff between owners.",
    ),
    (
        "coin::BalanceChangeEvent",
        "Balance delta emitted for bookkeeping (used by wallets/indexers).",
    ),
    (
        "pay::PayEvent",
        "Multi-recipient coin transfer that spent a coin vector.",
    ),
    ("pay::PaySuiEvent", "Batch payout using pure SUI coins."),
    (
        "pay::PayAllSuiEvent",
        "Sent the entire gas coin to one or more recipients.",
    ),
    (
        "sui::NewEpochEvent",
        "Network advanced to a new epoch; validator set or parameters may have changed.",
    ),
    (
        "sui::EndOfEpochEvent",
        "Epoch wrapped up and checkpoints/finalization were completed.",
    ),
    (
        "sui::MoveCallMetricsEvent",
        "Diagnostic stats for a programmable transaction step.",
    ),
    (
        "package::UpgradeEvent",
        "A Move package upgrade (new bytecode) landed on-chain.",
    ),
    (
        "package::PublisherEvent",
        "A new package got published with the referenced upgrade capability.",
    ),
    (
        "validator::AddStakeEvent",
        "Validator staking pool accepted additional delegated stake.",
    ),
    (
        "validator::WithdrawStakeEvent",
        "Delegated stake (principal or rewards) was withdrawn from a validator.",
    ),
    (
        "staking_pool::BalanceConvertedEvent",
        "Rewards inside a staking pool were converted to balance units.",
    ),
    (
        "staking_pool::JoinEvent",
        "A participant joined a staking pool with fresh stake.",
    ),
    (
        "staking_pool::LeaveEvent",
        "Stake exited the pool (either withdrawal or re-delegation).",
    ),
    // DeFi/custom events that show up frequently
    (
        "events::AssetSwap",
        "Indicates a swap between two assets inside the referenced pool — usually logging the amounts in/out.",
    ),
    (
        "campaign::LoginEvent",
        "Fired when a campaign participant signs in, recording the actor and context.",
    ),
    (
        "clob_v2::OrderFillEvent",
        "Central limit order book fill: maker/taker amounts are logged.",
    ),
    (
        "farm::HarvestEvent",
        "Yield-farming reward distribution to the farmer wallet.",
    ),
    (
        "vault::DepositEvent",
        "Assets were deposited into a vault strategy.",
    ),
    (
        "vault::WithdrawEvent",
        "Assets withdrawn from a vault back to the user.",
    ),
];

fn event_table() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| EVENT_DESCRIPTIONS.iter().copied().collect())
}

/// Semantic explanation for a well-known event signature, or an empty string
/// when the `module::StructName` pair is not in the table. Generic parameters
/// on the struct name are stripped for the fallback lookup.
pub fn event_description(event_type: &str) -> &'static str {
    if event_type.is_empty() {
        return "";
    }
    let parts = crate::types::parse_move_type(event_type);
    let key = format!("{}::{}", parts.module, parts.name);
    if let Some(description) = event_table().get(key.as_str()).copied() {
        return description;
    }
    let base_name = match parts.name.find('<') {
        Some(idx) => &parts.name[..idx],
        None => parts.name.as_str(),
    };
    let base_key = format!("{}::{}", parts.module, base_name);
    event_table().get(base_key.as_str()).copied().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn change(kind: &str, object_type: Option<&str>, owner: Value) -> ObjectChangeRecord {
        crate::types::parse_object_change(&json!({
            "type": kind,
            "objectId": "0xobj",
            "objectType": object_type,
            "owner": owner,
        }))
    }

    #[test]
    fn owner_descriptions() {
        assert_eq!(
            describe_owner(&OwnerKind::Address("0x1".into())),
            "address 0x1"
        );
        assert_eq!(describe_owner(&OwnerKind::Object("0x2".into())), "object 0x2");
        assert_eq!(
            describe_owner(&OwnerKind::Shared {
                initial_version: Some(3)
            }),
            "shared object (initial v3)"
        );
        assert_eq!(
            describe_owner(&OwnerKind::Shared {
                initial_version: None
            }),
            "shared object"
        );
        assert_eq!(describe_owner(&OwnerKind::Immutable), "immutable");
        assert_eq!(describe_owner(&OwnerKind::Unknown), "unknown owner");
    }

    #[test]
    fn object_change_sentences_per_kind() {
        let owner = json!({"AddressOwner": "0xa"});
        assert_eq!(
            describe_object_change(&change("created", Some("0x2::coin::Coin"), owner.clone()), None),
            "Created 0x2::coin::Coin 0xobj owned by address 0xa."
        );
        assert_eq!(
            describe_object_change(&change("mutated", Some("0x2::coin::Coin"), owner.clone()), None),
            "Mutated 0x2::coin::Coin 0xobj now owned by address 0xa."
        );
        assert_eq!(
            describe_object_change(&change("transferred", None, owner.clone()), None),
            "Transferred object 0xobj to address 0xa."
        );
        assert_eq!(
            describe_object_change(&change("deleted", None, owner.clone()), None),
            "Deleted object 0xobj."
        );
        assert_eq!(
            describe_object_change(&change("wrapped", None, owner.clone()), None),
            "Wrapped object 0xobj into another object."
        );
        assert_eq!(
            describe_object_change(&change("published", None, owner), None),
            "published on object 0xobj (address 0xa)."
        );
    }

    #[test]
    fn object_change_folds_in_detail() {
        let record = change("mutated", None, json!({"AddressOwner": "0xa"}));
        let detail = json!({"type": "0x2::kiosk::Kiosk", "version": "88"});
        assert_eq!(
            describe_object_change(&record, Some(&detail)),
            "Mutated 0x2::kiosk::Kiosk (v88) 0xobj now owned by address 0xa."
        );
    }

    #[test]
    fn event_type_identity_line() {
        let line = describe_event_type(Some("0x2::coin::MintEvent"));
        assert_eq!(line, "coin::MintEvent (package 0x2)");
        assert_eq!(describe_event_type(None), "Unknown event");
        assert_eq!(describe_event_type(Some("")), "Unknown event");
    }

    #[test]
    fn known_events_resolve_descriptions() {
        assert!(!event_description("0xabc::coin::MintEvent").is_empty());
        assert_eq!(event_description("0xabc::mystery::Nothing"), "");
    }

    #[test]
    fn generic_suffix_is_stripped_for_lookup() {
        let description =
            event_description("0xdee::clob_v2::OrderFillEvent<0x2::sui::SUI, 0xa::usdc::USDC>");
        assert!(description.contains("order book fill"));
    }
}
