//! Response envelopes.
//!
//! The backend wraps results in a loose JSON object. A successful HTTP status
//! can still carry `{"error": "...", "details": "..."}`, and the record
//! array sits under `data`, `data.data`, `employees` or `files` depending on
//! the endpoint.

use serde_json::Value as Json;

use crate::error::ApiError;
use crate::model::Row;
use crate::normalize;

/// Rejects envelopes whose `error` field is set.
///
/// An empty or `null` `error` is treated as no error.
pub fn check_envelope(body: Json) -> Result<Json, ApiError> {
    let Json::Object(obj) = &body else {
        return Ok(body);
    };

    let message = match obj.get("error") {
        None | Some(Json::Null) | Some(Json::Bool(false)) => return Ok(body),
        Some(Json::String(s)) if s.is_empty() => return Ok(body),
        Some(Json::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    let details = obj.get("details").and_then(|d| match d {
        Json::Null => None,
        Json::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    });

    log::warn!("backend reported error: {}", message);
    Err(ApiError::backend(message, details))
}

/// Message text from an error body, for non-2xx responses.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let Ok(Json::Object(obj)) = serde_json::from_str::<Json>(body) else {
        return None;
    };
    ["error", "detail", "message"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(Json::as_str))
        .map(str::to_string)
}

// =============================================================================
// MCID data
// =============================================================================

/// Counters reported by an MCID fetch.
///
/// Each counter is read on its own; a missing or malformed value reads as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Punches newly saved.
    pub saved_count: u64,
    /// Punches already stored.
    pub already_similar_count: u64,
    /// Duplicates within the fetched batch.
    pub duplicate_in_batch_count: u64,
    /// Punches fetched.
    pub count: u64,
    /// Older servers report fetched punches under this name.
    pub total_punches: u64,
    /// Distinct employees in the batch.
    pub distinct_employees: u64,
    /// Older servers report employees under this name.
    pub total_employees: u64,
}

impl FetchStats {
    fn from_body(body: &Json) -> Self {
        let read = |key: &str| counter(body, key).unwrap_or(0);
        Self {
            saved_count: read("saved_count"),
            already_similar_count: read("already_similar_count"),
            duplicate_in_batch_count: read("duplicate_in_batch_count"),
            count: read("count"),
            total_punches: read("total_punches"),
            distinct_employees: read("distinct_employees"),
            total_employees: read("total_employees"),
        }
    }

    /// Punches fetched, falling back to `total_punches`.
    pub fn punches(&self) -> u64 {
        if self.count > 0 {
            self.count
        } else {
            self.total_punches
        }
    }

    /// Distinct employees, falling back to `total_employees`.
    pub fn employees(&self) -> u64 {
        if self.distinct_employees > 0 {
            self.distinct_employees
        } else {
            self.total_employees
        }
    }
}

/// Result of an MCID fetch: normalized punches plus counters.
#[derive(Debug, Clone, PartialEq)]
pub struct McidFetch {
    /// Normalized punch rows.
    pub rows: Vec<Row>,
    /// Fetch counters.
    pub stats: FetchStats,
}

impl McidFetch {
    pub(crate) fn from_envelope(body: Json) -> Self {
        let stats = FetchStats::from_body(&body);
        let rows = match body {
            Json::Object(mut obj) => match obj.remove("data") {
                Some(data @ Json::Array(_)) => normalize::rows_with(data, normalize::mcid_punch_row),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        Self { rows, stats }
    }
}

/// Result of MCID processing: per-employee operational summaries.
#[derive(Debug, Clone, PartialEq)]
pub struct McidProcess {
    /// Operational summary rows.
    pub rows: Vec<Row>,
    /// Employees processed.
    pub total_employees: u64,
    /// Punches processed.
    pub total_punches: u64,
}

impl McidProcess {
    pub(crate) fn from_envelope(body: Json) -> Self {
        let total_employees = counter(&body, "total_employees").unwrap_or(0);
        let total_punches = counter(&body, "total_punches").unwrap_or(0);
        let rows = take_array(body, "employees")
            .iter()
            .map(normalize::operational_row)
            .collect();
        Self {
            rows,
            total_employees,
            total_punches,
        }
    }
}

// =============================================================================
// Files
// =============================================================================

/// One page of stored files.
#[derive(Debug, Clone, PartialEq)]
pub struct FileList {
    /// File metadata rows.
    pub files: Vec<Row>,
    /// Total stored files, when reported.
    pub total_count: Option<u64>,
    /// Files in this page, when reported.
    pub returned_count: Option<u64>,
    /// Offset of this page, when reported.
    pub offset: Option<u64>,
}

impl FileList {
    pub(crate) fn from_envelope(body: Json) -> Self {
        let total_count = counter(&body, "total_count");
        let returned_count = counter(&body, "returned_count");
        let offset = counter(&body, "offset");
        let files = take_array(body, "files")
            .iter()
            .map(normalize::file_row)
            .collect();
        Self {
            files,
            total_count,
            returned_count,
            offset,
        }
    }
}

/// A single object, either bare or under `data`.
pub(crate) fn single_record(body: Json) -> Result<Row, ApiError> {
    match body {
        Json::Object(mut obj) => match obj.remove("data") {
            Some(Json::Object(data)) => Ok(Row::from(data)),
            Some(other) => {
                obj.insert("data".to_string(), other);
                Ok(Row::from(obj))
            }
            None => Ok(Row::from(obj)),
        },
        other => Err(ApiError::parse_with_body("expected a JSON object", other.to_string())),
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Reads a top-level counter.
///
/// Accepts integers, non-negative floats (truncated) and numeric strings.
/// Anything else is `None`.
fn counter(body: &Json, key: &str) -> Option<u64> {
    match body.get(key)? {
        Json::Number(n) => n.as_u64().or_else(|| whole(n.as_f64()?)),
        Json::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| whole(s.parse().ok()?))
        }
        _ => None,
    }
}

fn whole(n: f64) -> Option<u64> {
    (n.is_finite() && n >= 0.0).then(|| n.trunc() as u64)
}

/// Rows under `key`, or rows found the usual way when `key` is absent.
fn take_array(body: Json, key: &str) -> Vec<Row> {
    match body {
        Json::Object(mut obj) => match obj.remove(key) {
            Some(items @ Json::Array(_)) => normalize::collection(items),
            _ => normalize::collection(Json::Object(obj)),
        },
        other => normalize::collection(other),
    }
}
