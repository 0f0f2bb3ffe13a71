use serde_json::Value;

/// One SUI is 10^9 MIST.
const MIST_PER_SUI: u128 = 1_000_000_000;

/// Canonical suffix of the SUI coin type tag, e.g. `0x2::sui::SUI`.
pub const SUI_COIN_SUFFIX: &str = "::sui::SUI";

/// Placeholder for absent numeric fields.
pub const MISSING_AMOUNT: &str = "—";

/// Parse an integer the RPC may encode as a JSON string or number.
pub fn value_as_i128(v: &Value) -> Option<i128> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn raw_scalar_text(v: &Value) -> String {
    match v.as_str() {
        Some(s) => s.to_string(),
        None => v.to_string(),
    }
}

/// Format a MIST amount as whole SUI with up to nine decimals, trailing
/// zeros stripped. All arithmetic stays in integers.
pub fn format_sui(mist: i128) -> String {
    let negative = mist < 0;
    let abs = mist.unsigned_abs();
    let whole = abs / MIST_PER_SUI;
    let fraction = abs % MIST_PER_SUI;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&whole.to_string());
    if fraction > 0 {
        let digits = format!("{fraction:09}");
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out.push_str(" SUI");
    out
}

/// SUI formatting for an optional raw field: absent or null renders the em
/// dash placeholder, unparseable values echo the raw text.
pub fn format_sui_field(v: Option<&Value>) -> String {
    let Some(v) = v else {
        return MISSING_AMOUNT.to_string();
    };
    if v.is_null() {
        return MISSING_AMOUNT.to_string();
    }
    match value_as_i128(v) {
        Some(mist) => format_sui(mist),
        None => raw_scalar_text(v),
    }
}

/// Amount formatting for an arbitrary coin type: SUI delegates to
/// [`format_sui`], anything else renders a signed magnitude in raw units.
pub fn format_coin_amount(coin_type: Option<&str>, amount: &Value) -> String {
    if coin_type.is_some_and(|t| t.ends_with(SUI_COIN_SUFFIX)) {
        return match value_as_i128(amount) {
            Some(mist) => format_sui(mist),
            None => raw_scalar_text(amount),
        };
    }
    match value_as_i128(amount) {
        Some(units) => {
            let sign = if units >= 0 { '+' } else { '-' };
            format!("{sign}{} units", units.unsigned_abs())
        }
        None => raw_scalar_text(amount),
    }
}

/// Net gas cost: computation + storage + non-refundable fee - rebate.
/// Missing fields count as zero.
pub fn net_gas_cost(gas_used: &Value) -> i128 {
    let field = |name: &str| gas_used.get(name).and_then(value_as_i128).unwrap_or(0);
    field("computationCost") + field("storageCost") + field("nonRefundableStorageFee")
        - field("storageRebate")
}

/// Middle-ellipsis shortener for addresses and digests in narrative text.
/// Strings short enough to show whole come back unchanged.
pub fn shorten(value: &str, visible: usize) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= visible * 2 + 3 {
        return value.to_string();
    }
    let head: String = chars[..visible].iter().collect();
    let tail: String = chars[chars.len() - visible..].iter().collect();
    format!("{head}…{tail}")
}

/// Default narrative shortening width.
pub fn shorten6(value: &str) -> String {
    shorten(value, 6)
}

/// Millisecond epoch timestamp as local wall-clock text.
pub fn format_timestamp_ms(ms: i64) -> String {
    use chrono::{Local, TimeZone, Utc};
    let dt = Utc
        .timestamp_millis_opt(ms)
        .single()
        .unwrap_or_else(|| Utc.timestamp_opt(0, 0).unwrap());
    dt.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
