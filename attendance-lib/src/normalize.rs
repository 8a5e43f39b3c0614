//! Input adapters from backend payloads to explorer rows.
//!
//! The backend is not consistent about field casing (`Empcode` on one
//! endpoint, `empcode` on another) or about where the record array sits in
//! the response. These functions project each payload onto one stable row
//! shape per record kind before it reaches the explorer.

use crate::model::Row;
use crate::model::Value;

/// `(target field, source candidates)` for attendance records.
const ATTENDANCE_FIELDS: &[(&str, &[&str])] = &[
    ("empcode", &["Empcode", "empcode"]),
    ("name", &["Name", "name"]),
    ("in_time", &["INTime", "in_time", "InTime"]),
    ("out_time", &["OUTTime", "out_time", "OutTime"]),
    ("work_time", &["WorkTime", "work_time"]),
    ("over_time", &["OverTime", "over_time"]),
    ("break_time", &["BreakTime", "break_time"]),
    ("status", &["Status", "status"]),
    ("date_string", &["DateString", "date_string", "Date"]),
    ("remark", &["Remark", "remark"]),
    ("erl_out", &["ErlOut", "erl_out"]),
    ("late_in", &["Late_In", "late_in"]),
];

/// `(target field, source candidates)` for MCID punch records.
const MCID_PUNCH_FIELDS: &[(&str, &[&str])] = &[
    ("name", &["Name", "name"]),
    ("empcode", &["Empcode", "empcode"]),
    ("punch_date", &["PunchDate", "punch_date"]),
    ("punch_time", &["PunchTime", "punch_time"]),
    ("m_flag", &["M_Flag", "m_flag"]),
    ("mcid", &["mcid"]),
];

/// Fields of a per-employee operational summary, in display order.
pub const OPERATIONAL_FIELDS: &[&str] = &[
    "empcode",
    "name",
    "date",
    "in_time",
    "out_time",
    "total_time",
    "break_time",
    "work_time",
    "total_punches_count",
    "invalid_punches_count",
];

/// Returns the first candidate field holding a truthy value, or `""`.
///
/// Falsy values (null, absent, `""`, `0`, `false`) fall through to the next
/// candidate, so a record with `Empcode: ""` and `empcode: "E1"` yields `E1`.
pub fn pick(source: &Row, candidates: &[&str]) -> Value {
    candidates
        .iter()
        .filter_map(|field| source.get(field))
        .find(|value| !value.is_falsy())
        .cloned()
        .unwrap_or_else(|| Value::from(""))
}

fn project(source: &Row, fields: &[(&str, &[&str])]) -> Row {
    fields
        .iter()
        .map(|(target, candidates)| (*target, pick(source, candidates)))
        .collect()
}

/// Normalizes one raw attendance record.
pub fn attendance_row(source: &Row) -> Row {
    project(source, ATTENDANCE_FIELDS)
}

/// Normalizes one raw MCID punch record.
pub fn mcid_punch_row(source: &Row) -> Row {
    project(source, MCID_PUNCH_FIELDS)
}

/// Projects an operational summary onto [`OPERATIONAL_FIELDS`].
///
/// Every field is present in the result; missing ones are null.
pub fn operational_row(source: &Row) -> Row {
    OPERATIONAL_FIELDS
        .iter()
        .map(|field| (*field, source.get(field).cloned().unwrap_or(Value::Null)))
        .collect()
}

/// Stored-file metadata is already in display shape.
pub fn file_row(source: &Row) -> Row {
    source.clone()
}

/// Extracts the record array from a response payload.
///
/// Accepts a bare array, an object with a `data` array, or an object whose
/// `data` is itself an object with a `data` array. Anything else is empty.
/// Array elements that are not objects are skipped.
pub fn collection(payload: serde_json::Value) -> Vec<Row> {
    let items = match payload {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut obj) => match obj.remove("data") {
            Some(serde_json::Value::Array(items)) => items,
            Some(serde_json::Value::Object(mut inner)) => match inner.remove("data") {
                Some(serde_json::Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        },
        other => {
            log::warn!("unexpected payload shape: {}", json_kind(&other));
            Vec::new()
        }
    };

    let total = items.len();
    let rows: Vec<Row> = items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::Object(obj) => Some(Row::from(obj)),
            _ => None,
        })
        .collect();
    if rows.len() != total {
        log::warn!("skipped {} non-object records", total - rows.len());
    }
    rows
}

/// Extracts rows from `payload` and normalizes each with `normalize`.
pub fn rows_with(payload: serde_json::Value, normalize: fn(&Row) -> Row) -> Vec<Row> {
    collection(payload).iter().map(normalize).collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(value: serde_json::Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_pick_skips_falsy() {
        let source = row(json!({"Empcode": "", "empcode": "E1", "count": 0}));

        assert_eq!(pick(&source, &["Empcode", "empcode"]), Value::from("E1"));
        assert_eq!(pick(&source, &["count"]), Value::from(""));
        assert_eq!(pick(&source, &["missing"]), Value::from(""));
    }

    #[test]
    fn test_attendance_row_mixed_casing() {
        let source = row(json!({
            "Empcode": "E1",
            "name": "Bob",
            "InTime": "09:00",
            "OUTTime": "17:30",
            "WorkTime": "8:30",
            "Date": "01/05/2024",
            "Late_In": "0:05"
        }));
        let normalized = attendance_row(&source);

        assert_eq!(normalized.get("empcode"), Some(&Value::from("E1")));
        assert_eq!(normalized.get("name"), Some(&Value::from("Bob")));
        assert_eq!(normalized.get("in_time"), Some(&Value::from("09:00")));
        assert_eq!(normalized.get("out_time"), Some(&Value::from("17:30")));
        assert_eq!(normalized.get("date_string"), Some(&Value::from("01/05/2024")));
        assert_eq!(normalized.get("late_in"), Some(&Value::from("0:05")));
        assert_eq!(normalized.get("remark"), Some(&Value::from("")));
        assert_eq!(normalized.len(), 12);
    }

    #[test]
    fn test_mcid_punch_row() {
        let source = row(json!({"Name": "Amy", "Empcode": "E2", "PunchDate": "02/05/2024",
            "PunchTime": "09:01", "M_Flag": "I", "mcid": 7}));
        let normalized = mcid_punch_row(&source);

        assert_eq!(
            normalized.keys().collect::<Vec<_>>(),
            ["name", "empcode", "punch_date", "punch_time", "m_flag", "mcid"]
        );
        assert_eq!(normalized.get("mcid"), Some(&Value::from(7)));
    }

    #[test]
    fn test_operational_row_keeps_every_key() {
        let source = row(json!({"empcode": "E1", "name": "Bob", "work_time": "8:00", "extra": 1}));
        let normalized = operational_row(&source);

        assert_eq!(normalized.len(), OPERATIONAL_FIELDS.len());
        assert_eq!(normalized.get("total_time"), Some(&Value::Null));
        assert!(!normalized.contains("extra"));
    }

    #[test]
    fn test_collection_shapes() {
        assert_eq!(collection(json!([{"a": 1}, {"a": 2}])).len(), 2);
        assert_eq!(collection(json!({"data": [{"a": 1}]})).len(), 1);
        assert_eq!(collection(json!({"data": {"data": [{"a": 1}, {"a": 2}]}})).len(), 2);
        assert!(collection(json!({"message": "ok"})).is_empty());
        assert!(collection(json!("nope")).is_empty());
    }

    #[test]
    fn test_collection_skips_non_objects() {
        let rows = collection(json!([{"a": 1}, 3, null, {"a": 2}]));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_rows_with() {
        let rows = rows_with(json!({"data": [{"Empcode": "E9"}]}), attendance_row);
        assert_eq!(rows[0].get("empcode"), Some(&Value::from("E9")));
    }
}
