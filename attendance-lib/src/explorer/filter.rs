//! Filter stage: case-insensitive free-text search.

use crate::model::FieldPath;
use crate::model::Row;
use crate::model::Value;
use crate::model::resolve_present;

/// Keeps the rows that match `term`.
///
/// When search is disabled or the term is empty every row is kept in its
/// original order. Otherwise a row is kept if any considered field's
/// lowercased display form contains the lowercased term. With `keys` only
/// those fields are considered; without, every field of the row is.
/// Absent and null fields never match.
pub fn filter_rows<'a>(
    rows: &'a [Row],
    term: &str,
    searchable: bool,
    keys: Option<&[FieldPath]>,
) -> Vec<&'a Row> {
    if !searchable || term.is_empty() {
        return rows.iter().collect();
    }

    let needle = term.to_lowercase();
    rows.iter()
        .filter(|row| matches(row, &needle, keys))
        .collect()
}

/// Returns `true` if `row` matches the already lowercased `needle`.
pub fn matches(row: &Row, needle: &str, keys: Option<&[FieldPath]>) -> bool {
    match keys {
        Some(keys) => keys
            .iter()
            .filter_map(|key| resolve_present(row, key))
            .any(|value| contains(value, needle)),
        None => row
            .values()
            .filter(|value| !value.is_null())
            .any(|value| contains(value, needle)),
    }
}

fn contains(value: &Value, needle: &str) -> bool {
    value.to_string().to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            Row::new().set("empcode", "E1").set("name", "Bob").set("status", "P"),
            Row::new().set("empcode", "E2").set("name", "Amy").set("status", "Absent"),
            Row::new().set("empcode", "E3").set("name", Value::Null).set("punches", 12),
        ]
    }

    fn names(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.get("empcode").unwrap().to_string()).collect()
    }

    #[test]
    fn test_empty_term_is_identity() {
        let rows = rows();
        let filtered = filter_rows(&rows, "", true, None);
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().zip(&rows).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn test_not_searchable_is_identity() {
        let rows = rows();
        assert_eq!(filter_rows(&rows, "bob", false, None).len(), 3);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let rows = rows();
        assert_eq!(names(&filter_rows(&rows, "BO", true, None)), ["E1"]);
    }

    #[test]
    fn test_all_fields_searched_without_keys() {
        let rows = rows();
        assert_eq!(names(&filter_rows(&rows, "absent", true, None)), ["E2"]);
        assert_eq!(names(&filter_rows(&rows, "12", true, None)), ["E3"]);
    }

    #[test]
    fn test_search_keys_restrict_fields() {
        let rows = rows();
        let keys = [FieldPath::from("empcode"), FieldPath::from("name")];
        assert!(filter_rows(&rows, "absent", true, Some(&keys)).is_empty());
        assert_eq!(names(&filter_rows(&rows, "amy", true, Some(&keys))), ["E2"]);
    }

    #[test]
    fn test_null_never_matches() {
        let rows = rows();
        let keys = [FieldPath::from("name")];
        assert!(filter_rows(&rows, "null", true, Some(&keys)).is_empty());
    }

    #[test]
    fn test_unknown_key_matches_nothing() {
        let rows = rows();
        let keys = [FieldPath::from("nope")];
        assert!(filter_rows(&rows, "e", true, Some(&keys)).is_empty());
    }
}
