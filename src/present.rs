//! Builds the sectioned display model from an enriched transaction. Pure
//! derivation; the renderer decides how sections reach the terminal.

use crate::describe::{
    describe_event_type, describe_object_change, describe_owner, event_description,
};
use crate::types::{EnrichedTransaction, EventRecord, ObjectChangeKind, ObjectChangeRecord};
use crate::util_text::{
    format_coin_amount, format_sui, format_sui_field, format_timestamp_ms, net_gas_cost, shorten6,
    value_as_i128, MISSING_AMOUNT,
};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Section {
    pub title: &'static str,
    /// Display lines; entries may span multiple lines (the raw JSON dump).
    pub body: Vec<String>,
    /// One-line summary under the section, when one is derivable.
    pub callout: Option<String>,
    /// Collapsed by default; the renderer shows it only on request.
    pub collapsed: bool,
}

#[derive(Debug, Clone)]
pub struct PresentationModel {
    pub sections: Vec<Section>,
}

/// Assemble the five fixed sections: Transaction, Gas + balance, Object
/// changes, Events, Raw response. Tolerates any subset of optional fields
/// being absent.
pub fn build_presentation(tx: &EnrichedTransaction) -> PresentationModel {
    let object_changes = tx.object_changes();
    let events = tx.events();

    let sections = vec![
        Section {
            title: "Transaction",
            body: transaction_summary(tx),
            callout: Some(transaction_callout(tx)),
            collapsed: false,
        },
        Section {
            title: "Gas + balance",
            body: cost_summary(tx),
            callout: Some(cost_callout(tx)),
            collapsed: false,
        },
        Section {
            title: "Object changes",
            body: object_changes_body(tx, &object_changes),
            callout: Some(object_callout(&object_changes)),
            collapsed: false,
        },
        Section {
            title: "Events",
            body: events_body(&events),
            callout: Some(events_callout(&events)),
            collapsed: false,
        },
        Section {
            title: "Raw response",
            body: vec![serde_json::to_string_pretty(&tx.merged_json())
                .unwrap_or_else(|_| "{}".to_string())],
            callout: None,
            collapsed: true,
        },
    ];

    PresentationModel { sections }
}

fn status_line(status: Option<&str>) -> String {
    match status.map(str::to_lowercase).as_deref() {
        Some("success") => "✔ Success".to_string(),
        Some("failure") | Some("failed") => "✖ Failed".to_string(),
        Some(other) => format!("Status: {other}"),
        None => "Status: Unknown".to_string(),
    }
}

fn transaction_summary(tx: &EnrichedTransaction) -> Vec<String> {
    let digest = tx.digest().unwrap_or(MISSING_AMOUNT);
    let sender = tx.sender().unwrap_or("Unknown sender");
    let timestamp = tx
        .timestamp_ms()
        .map(format_timestamp_ms)
        .unwrap_or_else(|| "Not available".to_string());
    let checkpoint = tx
        .checkpoint()
        .map(|v| match v.as_str() {
            Some(s) => s.to_string(),
            None => v.to_string(),
        })
        .unwrap_or_else(|| "Unknown".to_string());

    let mut lines = vec![
        format!("Digest: {digest}"),
        format!("Sender: {sender}"),
        status_line(tx.status()),
        format!("Timestamp: {timestamp}"),
        format!("Checkpoint: {checkpoint}"),
    ];
    if let Some(details) = checkpoint_details(tx.checkpoint_info.as_ref()) {
        lines.push(details);
    }
    if let Some(error) = tx.status_error() {
        lines.push(format!("Error: {error}"));
    }
    lines
}

fn checkpoint_details(checkpoint_info: Option<&Value>) -> Option<String> {
    let info = checkpoint_info?;
    let proposer = info
        .get("proposer")
        .and_then(Value::as_str)
        .unwrap_or("Unknown proposer");
    let mut parts = vec![format!("Proposer: {proposer}")];
    if let Some(ms) = info
        .get("timestampMs")
        .and_then(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
    {
        parts.push(format!("Checkpoint time: {}", format_timestamp_ms(ms)));
    }
    Some(parts.join(" — "))
}

fn transaction_callout(tx: &EnrichedTransaction) -> String {
    let sender = tx
        .sender()
        .map(shorten6)
        .unwrap_or_else(|| "an unknown sender".to_string());
    let digest = tx
        .digest()
        .map(shorten6)
        .unwrap_or_else(|| MISSING_AMOUNT.to_string());
    let status = tx.status().unwrap_or("unknown").to_lowercase();
    match status.as_str() {
        "success" => format!("Transaction {digest} succeeded for {sender}."),
        "failure" | "failed" => {
            let reason = tx
                .status_error()
                .unwrap_or("the chain returned an error");
            format!("Transaction {digest} failed for {sender} because {reason}.")
        }
        _ => format!("Status for transaction {digest} from {sender} is {status}."),
    }
}

fn cost_summary(tx: &EnrichedTransaction) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(gas) = tx.gas_used() {
        lines.push("Gas breakdown".to_string());
        lines.push(format!(
            "  Computation: {}",
            format_sui_field(gas.get("computationCost"))
        ));
        lines.push(format!(
            "  Storage: {}",
            format_sui_field(gas.get("storageCost"))
        ));
        lines.push(format!(
            "  Rebate: {}",
            format_sui_field(gas.get("storageRebate"))
        ));
        if gas
            .get("nonRefundableStorageFee")
            .and_then(value_as_i128)
            .is_some_and(|fee| fee != 0)
        {
            lines.push(format!(
                "  Non-refundable storage fee: {}",
                format_sui_field(gas.get("nonRefundableStorageFee"))
            ));
        }
        lines.push(format!("  Net gas cost: {}", format_sui(net_gas_cost(gas))));
    }

    let balance_changes = tx.balance_changes();
    if balance_changes.is_empty() {
        lines.push("No balance changes reported.".to_string());
    } else {
        lines.push("Balance changes".to_string());
        for change in &balance_changes {
            let coin_type = change.coin_type.as_deref().unwrap_or("unknown coin");
            let amount = match &change.amount {
                Some(amount) => format_coin_amount(change.coin_type.as_deref(), amount),
                None => MISSING_AMOUNT.to_string(),
            };
            let verb = match change.amount.as_ref().and_then(value_as_i128) {
                Some(n) if n >= 0 => "Received",
                Some(_) => "Spent",
                None => "Changed",
            };
            let owner = describe_owner(&change.owner);
            lines.push(format!("  {verb} {amount} ({coin_type}) for {owner}"));
        }
    }

    if !tx.balance_snapshots.is_empty() {
        lines.push("Live balances".to_string());
        for snapshot in &tx.balance_snapshots {
            let formatted = match &snapshot.total_balance {
                Some(total) => format_coin_amount(
                    Some(snapshot.coin_type.as_str()),
                    &Value::String(total.clone()),
                ),
                None => MISSING_AMOUNT.to_string(),
            };
            lines.push(format!(
                "  {} currently holds {} ({})",
                snapshot.owner, formatted, snapshot.coin_type
            ));
        }
    }

    lines
}

fn cost_callout(tx: &EnrichedTransaction) -> String {
    let Some(gas) = tx.gas_used() else {
        return "Gas information was not returned by the RPC.".to_string();
    };
    let formatted = format_sui(net_gas_cost(gas));
    let count = tx.balance_changes().len();
    if count == 0 {
        return format!("Net gas cost: {formatted}. No explicit balance deltas were returned.");
    }
    let plural = if count == 1 { "" } else { "s" };
    format!("Net gas cost: {formatted}. There were {count} recorded balance change{plural}.")
}

fn object_changes_body(
    tx: &EnrichedTransaction,
    object_changes: &[ObjectChangeRecord],
) -> Vec<String> {
    if object_changes.is_empty() {
        return vec!["No object changes returned.".to_string()];
    }
    object_changes
        .iter()
        .map(|change| {
            let detail = (!change.object_id.is_empty())
                .then(|| tx.object_details.get(&change.object_id))
                .flatten();
            describe_object_change(change, detail)
        })
        .collect()
}

fn object_callout(object_changes: &[ObjectChangeRecord]) -> String {
    if object_changes.is_empty() {
        return "No objects were reported as created, mutated, or transferred.".to_string();
    }
    let count_kind = |kind: ObjectChangeKind| {
        object_changes
            .iter()
            .filter(|change| change.kind == kind)
            .count()
    };
    let created = count_kind(ObjectChangeKind::Created);
    let mutated = count_kind(ObjectChangeKind::Mutated);
    let transferred = count_kind(ObjectChangeKind::Transferred);
    let plural = if transferred == 1 { "" } else { "s" };
    format!("{created} created, {mutated} mutated, and {transferred} transferred object{plural}.")
}

fn events_body(events: &[EventRecord]) -> Vec<String> {
    if events.is_empty() {
        return vec!["No events.".to_string()];
    }
    events
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let info = describe_event_type(event.event_type.as_deref());
            let sender = event
                .sender
                .as_deref()
                .map(|s| format!(" — sender: {}", shorten6(s)))
                .unwrap_or_default();
            format!("Event {}: {info}{sender}", index + 1)
        })
        .collect()
}

fn events_callout(events: &[EventRecord]) -> String {
    if events.is_empty() {
        return "No events were emitted.".to_string();
    }

    let mut modules: Vec<String> = Vec::new();
    for event in events {
        if let Some(event_type) = event.event_type.as_deref().filter(|t| !t.is_empty()) {
            let module = crate::types::parse_move_type(event_type).module;
            if !module.is_empty() && !modules.contains(&module) {
                modules.push(module);
            }
        }
    }

    let mut senders: Vec<String> = Vec::new();
    for event in events {
        if let Some(sender) = event.sender.as_deref().filter(|s| !s.is_empty()) {
            let short = shorten6(sender);
            if !senders.contains(&short) {
                senders.push(short);
            }
        }
    }

    let detail = events
        .iter()
        .filter_map(|event| event.event_type.as_deref())
        .map(event_description)
        .find(|d| !d.is_empty())
        .map(|d| format!(" Detail: {d}"))
        .unwrap_or_default();

    if events.len() == 1 {
        let module_detail = modules
            .first()
            .map(|m| format!(" from {m}"))
            .unwrap_or_default();
        let sender_detail = senders
            .first()
            .map(|s| format!(" by {s}"))
            .unwrap_or_default();
        return format!("One event{module_detail}{sender_detail}.{detail}")
            .trim()
            .to_string();
    }

    let module_text = if modules.is_empty() {
        "various modules".to_string()
    } else {
        modules.join(", ")
    };
    let actors = if senders.is_empty() {
        "several".to_string()
    } else {
        senders.len().to_string()
    };
    let plural = if senders.len() == 1 { "" } else { "s" };
    format!(
        "{} events lit up {module_text}, triggered by {actors} actor{plural}.{detail}",
        events.len()
    )
}
