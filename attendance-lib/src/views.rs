//! Column presets for each record shape the backend serves.
//!
//! Each preset bundles the columns, search allow-list and export fields of
//! one explorer, together with the normalizer that produces its rows.

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Local;
use chrono::NaiveDateTime;
use chrono::TimeZone;

use crate::explorer::Column;
use crate::explorer::ExplorerConfig;
use crate::explorer::PLACEHOLDER;
use crate::export::ExportField;
use crate::model::Row;
use crate::model::Value;
use crate::normalize;

/// Display format for stored-file timestamps.
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

// =============================================================================
// Presets
// =============================================================================

/// Normalized attendance records.
pub fn attendance() -> ExplorerConfig {
    ExplorerConfig::new(vec![
        Column::new("empcode", "Employee Code"),
        Column::new("name", "Name"),
        Column::new("date_string", "Date"),
        Column::new("in_time", "In Time"),
        Column::new("out_time", "Out Time"),
        Column::new("work_time", "Work Time"),
        Column::new("break_time", "Break Time"),
        Column::new("over_time", "Over Time"),
        Column::new("status", "Status"),
        Column::new("remark", "Remark").not_sortable(),
    ])
    .search_keys(["empcode", "name", "date_string"])
    .export_fields(vec![
        ExportField::new("Empcode", "empcode"),
        ExportField::new("Name", "name"),
        ExportField::new("Date", "date_string"),
        ExportField::new("In Time", "in_time"),
        ExportField::new("Out Time", "out_time"),
        ExportField::new("Work Time", "work_time"),
        ExportField::new("Break Time", "break_time"),
        ExportField::new("Over Time", "over_time"),
        ExportField::new("Status", "status"),
        ExportField::new("Remark", "remark"),
    ])
}

/// Raw MCID punches as fetched.
pub fn mcid_punches() -> ExplorerConfig {
    ExplorerConfig::new(vec![
        Column::new("empcode", "Employee Code"),
        Column::new("name", "Name"),
        Column::new("punch_date", "Punch Date"),
        Column::new("punch_time", "Punch Time"),
        Column::new("mcid", "MCID"),
        Column::new("m_flag", "M Flag"),
    ])
    .search_keys(["empcode", "name"])
    .export_fields(
        ["name", "empcode", "punch_date", "punch_time", "m_flag", "mcid"]
            .into_iter()
            .map(ExportField::keyed)
            .collect(),
    )
}

/// Per-employee operational summaries produced by MCID processing.
pub fn operational_summary() -> ExplorerConfig {
    ExplorerConfig::new(vec![
        Column::new("empcode", "Employee Code"),
        Column::new("name", "Name"),
        Column::new("date", "Date"),
        Column::new("in_time", "In Time"),
        Column::new("out_time", "Out Time"),
        Column::new("total_time", "Total Time"),
        Column::new("break_time", "Break Time"),
        Column::new("work_time", "Work Time"),
        Column::new("total_punches_count", "Total Punches"),
        Column::new("invalid_punches_count", "Invalid Punches"),
    ])
    .search_keys(["empcode", "name"])
    .export_fields(
        normalize::OPERATIONAL_FIELDS
            .iter()
            .copied()
            .map(ExportField::keyed)
            .collect(),
    )
}

/// Picks the MCID preset matching the row shape.
///
/// Processed summaries carry `work_time`; raw punches do not.
pub fn mcid_for(rows: &[Row]) -> ExplorerConfig {
    if rows.first().is_some_and(|row| row.contains("work_time")) {
        operational_summary()
    } else {
        mcid_punches()
    }
}

/// Stored punch-data files.
pub fn files() -> ExplorerConfig {
    ExplorerConfig::new(vec![
        Column::new("id", "ID"),
        Column::new("filename", "Filename"),
        Column::new("from_date", "From Date").render(|value, _| or_placeholder(value)),
        Column::new("to_date", "To Date").render(|value, _| or_placeholder(value)),
        Column::new("total_records", "Total Records").render(|value, _| count(value)),
        Column::new("unique_employees", "Unique Employees").render(|value, _| count(value)),
        Column::new("created_at", "Created At").render(|value, _| timestamp(value, &Local)),
        Column::new("actions", "Actions")
            .not_sortable()
            .render(|_, row| file_actions(row).to_string()),
    ])
    .search_keys(["filename", "from_date", "to_date"])
    .export_fields(vec![
        ExportField::new("ID", "id"),
        ExportField::new("Filename", "filename"),
        ExportField::new("From Date", "from_date"),
        ExportField::new("To Date", "to_date"),
        ExportField::new("Total Records", "total_records"),
        ExportField::new("Unique Employees", "unique_employees"),
        ExportField::new("Created At", "created_at"),
    ])
}

/// Columns taken from the first row's fields, headed by the field names.
///
/// For payloads with no preset; every field is searched.
pub fn generic(rows: &[Row]) -> ExplorerConfig {
    let columns: Vec<Column> = rows
        .first()
        .map(|row| row.keys().map(|key| Column::new(key, key)).collect())
        .unwrap_or_default();
    ExplorerConfig::new(columns)
}

// =============================================================================
// Shapes
// =============================================================================

/// Record shapes with a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Attendance records.
    Attendance,
    /// Raw MCID punches.
    McidPunches,
    /// Operational summaries.
    Operational,
    /// Stored files.
    Files,
}

impl Shape {
    /// Every shape.
    pub const ALL: [Shape; 4] = [
        Shape::Attendance,
        Shape::McidPunches,
        Shape::Operational,
        Shape::Files,
    ];

    /// Name used on the command line and in export filenames.
    pub fn name(self) -> &'static str {
        match self {
            Shape::Attendance => "attendance",
            Shape::McidPunches => "mcid",
            Shape::Operational => "operational",
            Shape::Files => "files",
        }
    }

    /// Explorer configuration for this shape.
    pub fn config(self) -> ExplorerConfig {
        match self {
            Shape::Attendance => attendance(),
            Shape::McidPunches => mcid_punches(),
            Shape::Operational => operational_summary(),
            Shape::Files => files(),
        }
    }

    /// Row normalizer for this shape.
    pub fn normalizer(self) -> fn(&Row) -> Row {
        match self {
            Shape::Attendance => normalize::attendance_row,
            Shape::McidPunches => normalize::mcid_punch_row,
            Shape::Operational => normalize::operational_row,
            Shape::Files => normalize::file_row,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown shape '{}'", s))
    }
}

// =============================================================================
// Cell renderers
// =============================================================================

fn or_placeholder(value: Option<&Value>) -> String {
    match value {
        Some(v) if !v.is_falsy() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Count cell: thousands separators, `0` when absent.
fn count(value: Option<&Value>) -> String {
    match value {
        Some(Value::Number(n)) => group_thousands(*n),
        Some(Value::Null) | None => "0".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Formats `n` with `,` between thousands and at most three fraction digits.
pub fn group_thousands(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }

    let text = format!("{:.3}", n.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if n < 0.0 && (grouped != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

/// Timestamp cell in the given zone; dash when absent or unparseable.
///
/// Accepts RFC 3339 and offset-less ISO timestamps (read as UTC).
pub fn timestamp<Tz>(value: Option<&Value>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let Some(text) = value.and_then(Value::as_str).filter(|s| !s.is_empty()) else {
        return PLACEHOLDER.to_string();
    };

    let parsed = DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.to_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc()))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.and_utc()));

    match parsed {
        Ok(dt) => dt.with_timezone(zone).format(TIMESTAMP_FORMAT).to_string(),
        Err(_) => PLACEHOLDER.to_string(),
    }
}

/// Actions offered for a stored file: download needs a blob URL.
pub fn file_actions(row: &Row) -> &'static str {
    if row.get("blob_url").is_some_and(|url| !url.is_falsy()) {
        "Download | Process"
    } else {
        "Process"
    }
}
