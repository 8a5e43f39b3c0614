//! Field paths and the shared value accessor.

use std::fmt;

use super::Row;
use super::Value;

/// A field name, or a dot-delimited path into nested records (`a.b.c`).
///
/// Search, sort and rendering all read row values through [`resolve`], so a
/// path that does not match the row shape simply yields "no value".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// Creates a new field path.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the path walks into nested records.
    pub fn is_nested(&self) -> bool {
        self.0.contains('.')
    }

    /// Iterates over the `.`-separated segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

impl From<&FieldPath> for FieldPath {
    fn from(path: &FieldPath) -> Self {
        path.clone()
    }
}

impl PartialEq<str> for FieldPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FieldPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Resolves `path` against `row`.
///
/// Plain names are a direct lookup. Dotted paths walk one nested record per
/// segment; a missing key or a non-record intermediate returns `None`.
pub fn resolve<'a>(row: &'a Row, path: &FieldPath) -> Option<&'a Value> {
    if !path.is_nested() {
        return row.get(path.as_str());
    }

    let mut segments = path.segments();
    let mut current = row.get(segments.next()?)?;
    for segment in segments {
        current = current.as_record()?.get(segment)?;
    }
    Some(current)
}

/// Resolves `path` and folds `Null` into "absent".
///
/// This is the "no value" test shared by search, sort and rendering.
pub fn resolve_present<'a>(row: &'a Row, path: &FieldPath) -> Option<&'a Value> {
    resolve(row, path).filter(|value| !value.is_null())
}
