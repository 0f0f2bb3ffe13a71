use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Who controls an object, per the RPC `owner` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerKind {
    Address(String),
    Object(String),
    Shared { initial_version: Option<u64> },
    Immutable,
    Unknown,
}

/// Kind of ledger mutation recorded in `objectChanges`. Kinds the RPC may add
/// later land in `Other` with the raw tag preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectChangeKind {
    Created,
    Mutated,
    Transferred,
    Deleted,
    Wrapped,
    Other(String),
}

#[derive(Debug, Clone)]
pub struct ObjectChangeRecord {
    pub kind: ObjectChangeKind,
    pub object_id: String,
    pub object_type: Option<String>,
    pub owner: OwnerKind,
}

#[derive(Debug, Clone)]
pub struct BalanceChangeRecord {
    pub owner: OwnerKind,
    pub coin_type: Option<String>,
    pub amount: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct EventRecord {
    pub event_type: Option<String>,
    pub sender: Option<String>,
}

/// `address::module::name` split of a Move type tag. Tags with fewer than
/// three segments degenerate to the original string in all three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTypeParts {
    pub address: String,
    pub module: String,
    pub name: String,
}

pub fn parse_move_type(tag: &str) -> MoveTypeParts {
    let parts: Vec<&str> = tag.split("::").collect();
    if parts.len() < 3 {
        return MoveTypeParts {
            address: tag.to_string(),
            module: tag.to_string(),
            name: tag.to_string(),
        };
    }
    MoveTypeParts {
        address: parts[0].to_string(),
        module: parts[1].to_string(),
        name: parts[2..].join("::"),
    }
}

fn value_as_u64(v: &Value) -> Option<u64> {
    v.as_u64().or_else(|| v.as_str().and_then(|s| s.parse().ok()))
}

pub fn parse_owner(owner: Option<&Value>) -> OwnerKind {
    let Some(owner) = owner else {
        return OwnerKind::Unknown;
    };
    if let Some(addr) = owner.get("AddressOwner").and_then(Value::as_str) {
        return OwnerKind::Address(addr.to_string());
    }
    if let Some(id) = owner.get("ObjectOwner").and_then(Value::as_str) {
        return OwnerKind::Object(id.to_string());
    }
    if let Some(shared) = owner.get("Shared") {
        // Field name has shifted between snake and camel case across node
        // versions; accept both.
        let initial_version = shared
            .get("initial_shared_version")
            .or_else(|| shared.get("initialSharedVersion"))
            .and_then(value_as_u64);
        return OwnerKind::Shared { initial_version };
    }
    if owner.as_str() == Some("Immutable") || owner.get("Immutable").is_some() {
        return OwnerKind::Immutable;
    }
    OwnerKind::Unknown
}

pub fn parse_object_change(change: &Value) -> ObjectChangeRecord {
    let kind = match change.get("type").and_then(Value::as_str) {
        Some("created") => ObjectChangeKind::Created,
        Some("mutated") => ObjectChangeKind::Mutated,
        Some("transferred") => ObjectChangeKind::Transferred,
        Some("deleted") => ObjectChangeKind::Deleted,
        Some("wrapped") => ObjectChangeKind::Wrapped,
        Some(other) => ObjectChangeKind::Other(other.to_string()),
        None => ObjectChangeKind::Other(String::new()),
    };
    ObjectChangeRecord {
        kind,
        object_id: change
            .get("objectId")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        object_type: change
            .get("objectType")
            .and_then(Value::as_str)
            .map(str::to_string),
        owner: parse_owner(change.get("owner")),
    }
}

pub fn parse_balance_change(change: &Value) -> BalanceChangeRecord {
    BalanceChangeRecord {
        owner: parse_owner(change.get("owner")),
        coin_type: change
            .get("coinType")
            .and_then(Value::as_str)
            .map(str::to_string),
        amount: change.get("amount").cloned(),
    }
}

pub fn parse_event(event: &Value) -> EventRecord {
    EventRecord {
        event_type: event
            .get("type")
            .and_then(Value::as_str)
            .map(str::to_string),
        sender: event
            .get("sender")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

/// Live balance fetched during enrichment, one per unique
/// (address owner, coin type) pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    pub owner: String,
    pub coin_type: String,
    pub total_balance: Option<String>,
}

/// The base transaction response plus everything the enrichment step added.
/// The base stays untyped: which fields are present depends on which
/// field-option candidate the endpoint accepted.
#[derive(Debug, Clone)]
pub struct EnrichedTransaction {
    pub base: Value,
    pub checkpoint_info: Option<Value>,
    pub object_details: HashMap<String, Value>,
    pub balance_snapshots: Vec<BalanceSnapshot>,
}

impl EnrichedTransaction {
    pub fn digest(&self) -> Option<&str> {
        self.base.get("digest").and_then(Value::as_str)
    }

    pub fn sender(&self) -> Option<&str> {
        self.base
            .pointer("/transaction/data/sender")
            .and_then(Value::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.base
            .pointer("/effects/status/status")
            .and_then(Value::as_str)
    }

    pub fn status_error(&self) -> Option<&str> {
        self.base
            .pointer("/effects/status/error")
            .and_then(Value::as_str)
    }

    /// `timestampMs` arrives as a decimal string on most nodes, a number on
    /// some.
    pub fn timestamp_ms(&self) -> Option<i64> {
        let v = self.base.get("timestampMs")?;
        v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse().ok()))
    }

    pub fn checkpoint(&self) -> Option<&Value> {
        match self.base.get("checkpoint") {
            Some(Value::Null) | None => None,
            Some(v) => Some(v),
        }
    }

    pub fn gas_used(&self) -> Option<&Value> {
        self.base.pointer("/effects/gasUsed")
    }

    pub fn object_changes(&self) -> Vec<ObjectChangeRecord> {
        self.base
            .get("objectChanges")
            .and_then(Value::as_array)
            .map(|changes| changes.iter().map(parse_object_change).collect())
            .unwrap_or_default()
    }

    /// Top-level `balanceChanges`, falling back to `effects.balanceChanges`
    /// for endpoints that only populate the nested copy.
    pub fn balance_changes(&self) -> Vec<BalanceChangeRecord> {
        self.base
            .get("balanceChanges")
            .or_else(|| self.base.pointer("/effects/balanceChanges"))
            .and_then(Value::as_array)
            .map(|changes| changes.iter().map(parse_balance_change).collect())
            .unwrap_or_default()
    }

    pub fn events(&self) -> Vec<EventRecord> {
        self.base
            .get("events")
            .and_then(Value::as_array)
            .map(|events| events.iter().map(parse_event).collect())
            .unwrap_or_default()
    }

    /// The full merged record for the raw-response section.
    pub fn merged_json(&self) -> Value {
        let mut merged = match &self.base {
            Value::Object(map) => Value::Object(map.clone()),
            other => json!({ "result": other.clone() }),
        };
        if let Value::Object(map) = &mut merged {
            map.insert(
                "checkpointInfo".to_string(),
                self.checkpoint_info.clone().unwrap_or(Value::Null),
            );
            map.insert(
                "objectDetails".to_string(),
                serde_json::to_value(&self.object_details).unwrap_or(Value::Null),
            );
            map.insert(
                "balanceSnapshots".to_string(),
                serde_json::to_value(&self.balance_snapshots).unwrap_or(Value::Null),
            );
        }
        merged
    }
}
