// Record primitives shared by the store and the API layer

use serde_json::{Map, Value};

/// A record is an open set of JSON fields. The store reserves three of them:
/// `id` (numeric, assigned on create), `createdAt` and `updatedAt`
/// (RFC-3339 strings stamped on create/update).
pub type Record = Map<String, Value>;

/// Numeric id of a record, if it carries one.
pub fn record_id(record: &Record) -> Option<u64> {
    record.get("id").and_then(Value::as_u64)
}

/// Current UTC time as an RFC-3339 string with millisecond precision,
/// e.g. `2026-08-25T10:15:30.123Z`.
pub fn now_iso() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
