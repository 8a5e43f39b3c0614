//! Sort stage: type-aware, stable, nulls last.

use std::cmp::Ordering;

use crate::model::Row;
use crate::model::Value;
use crate::model::resolve_present;

use super::Direction;
use super::SortState;
use super::locale_cmp;

/// Sorts the filtered rows by `sort`; without a sort the order is kept.
pub fn sort_rows<'a>(rows: &[&'a Row], sort: Option<&SortState>) -> Vec<&'a Row> {
    let mut sorted = rows.to_vec();
    let Some(sort) = sort else {
        return sorted;
    };

    merge_sort(&mut sorted, &|a: &&Row, b: &&Row| {
        compare(
            resolve_present(a, &sort.key),
            resolve_present(b, &sort.key),
            sort.direction,
        )
    });
    sorted
}

/// Compares two accessed values.
///
/// Precedence:
/// 1. absent or null sorts last in both directions; two absents are equal
/// 2. two strings use [`locale_cmp`]
/// 3. two numbers compare numerically
/// 4. anything else compares display forms with [`locale_cmp`]
///
/// `Desc` reverses steps 2-4 only.
pub fn compare(a: Option<&Value>, b: Option<&Value>, direction: Direction) -> Ordering {
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Greater,
        (Some(_), None) => return Ordering::Less,
        (Some(a), Some(b)) => (a, b),
    };

    let ordering = match (a, b) {
        (Value::String(a), Value::String(b)) => locale_cmp(a, b),
        (Value::Number(a), Value::Number(b)) => compare_numbers(*a, *b),
        _ => locale_cmp(&a.to_string(), &b.to_string()),
    };

    match direction {
        Direction::Asc => ordering,
        Direction::Desc => ordering.reverse(),
    }
}

/// Sign of `a - b`; NaN differences compare equal.
fn compare_numbers(a: f64, b: f64) -> Ordering {
    let diff = a - b;
    if diff < 0.0 {
        Ordering::Less
    } else if diff > 0.0 {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Stable top-down merge sort.
///
/// Elements that compare equal keep their input order. Unlike the standard
/// library sort, it tolerates comparators that are not a strict total order
/// (the mixed-type fallback can produce cycles) without panicking.
fn merge_sort<T: Copy, F>(items: &mut [T], compare: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    let len = items.len();
    if len <= 1 {
        return;
    }

    let mid = len / 2;
    merge_sort(&mut items[..mid], compare);
    merge_sort(&mut items[mid..], compare);

    let mut merged = Vec::with_capacity(len);
    let (mut left, mut right) = (0, mid);
    while left < mid && right < len {
        // Take from the right half only when strictly smaller.
        if compare(&items[right], &items[left]) == Ordering::Less {
            merged.push(items[right]);
            right += 1;
        } else {
            merged.push(items[left]);
            left += 1;
        }
    }
    merged.extend_from_slice(&items[left..mid]);
    merged.extend_from_slice(&items[right..len]);
    items.copy_from_slice(&merged);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: Vec<Value>) -> Vec<Row> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| Row::new().set("v", v).set("i", i))
            .collect()
    }

    fn sorted_values(rows: &[Row], sort: SortState) -> Vec<Value> {
        let refs: Vec<&Row> = rows.iter().collect();
        sort_rows(&refs, Some(&sort))
            .into_iter()
            .map(|r| r.get("v").cloned().unwrap_or_default())
            .collect()
    }

    fn sorted_indexes(rows: &[Row], sort: SortState) -> Vec<Value> {
        let refs: Vec<&Row> = rows.iter().collect();
        sort_rows(&refs, Some(&sort))
            .into_iter()
            .map(|r| r.get("i").cloned().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_no_sort_keeps_order() {
        let rows = rows(vec![3.into(), 1.into(), 2.into()]);
        let refs: Vec<&Row> = rows.iter().collect();
        let sorted = sort_rows(&refs, None);
        assert!(sorted.iter().zip(&refs).all(|(a, b)| std::ptr::eq(*a, *b)));
    }

    #[test]
    fn test_null_last_ascending() {
        let rows = rows(vec![Value::Null, 5.into(), 2.into()]);
        assert_eq!(
            sorted_values(&rows, SortState::asc("v")),
            [Value::from(2), Value::from(5), Value::Null]
        );
    }

    #[test]
    fn test_null_last_descending() {
        let rows = rows(vec![Value::Null, 5.into(), 2.into()]);
        assert_eq!(
            sorted_values(&rows, SortState::desc("v")),
            [Value::from(5), Value::from(2), Value::Null]
        );
    }

    #[test]
    fn test_absent_field_sorts_with_nulls() {
        let rows = vec![
            Row::new().set("i", 0),
            Row::new().set("v", "b").set("i", 1),
            Row::new().set("v", Value::Null).set("i", 2),
            Row::new().set("v", "a").set("i", 3),
        ];
        assert_eq!(
            sorted_indexes(&rows, SortState::desc("v")),
            [Value::from(1), Value::from(3), Value::from(0), Value::from(2)]
        );
    }

    #[test]
    fn test_numeric_not_lexicographic() {
        let rows = rows(vec![10.into(), (-2.5).into(), 9.into(), 0.25.into()]);
        assert_eq!(
            sorted_values(&rows, SortState::asc("v")),
            [Value::from(-2.5), Value::from(0.25), Value::from(9), Value::from(10)]
        );
    }

    #[test]
    fn test_strings_locale_order() {
        let rows = rows(vec!["bob".into(), "Amy".into(), "carl".into()]);
        assert_eq!(
            sorted_values(&rows, SortState::asc("v")),
            [Value::from("Amy"), Value::from("bob"), Value::from("carl")]
        );
    }

    #[test]
    fn test_mixed_types_compare_as_strings() {
        let rows = rows(vec![10.into(), "9".into(), true.into()]);
        assert_eq!(
            sorted_values(&rows, SortState::asc("v")),
            [Value::from(10), Value::from("9"), Value::from(true)]
        );
    }

    #[test]
    fn test_stable_in_both_directions() {
        let rows = rows(vec!["x".into(), "a".into(), "x".into(), "a".into(), "x".into()]);
        assert_eq!(
            sorted_indexes(&rows, SortState::asc("v")),
            [1, 3, 0, 2, 4].map(Value::from)
        );
        assert_eq!(
            sorted_indexes(&rows, SortState::desc("v")),
            [0, 2, 4, 1, 3].map(Value::from)
        );
    }

    #[test]
    fn test_inconsistent_mixed_order_does_not_panic() {
        // 9 < 10 numerically, "10" < "5" < "9" as text: a cycle.
        let values: Vec<Value> = (0..64)
            .map(|i| match i % 3 {
                0 => Value::from(9),
                1 => Value::from(10),
                _ => Value::from("5"),
            })
            .collect();
        let rows = rows(values);
        assert_eq!(sorted_values(&rows, SortState::asc("v")).len(), 64);
    }

    #[test]
    fn test_merge_sort_matches_std_on_total_order() {
        let mut ours: Vec<i32> = (0..100).map(|i| (i * 37) % 23 - 11).collect();
        let mut theirs = ours.clone();
        merge_sort(&mut ours, &|a: &i32, b: &i32| a.cmp(b));
        theirs.sort();
        assert_eq!(ours, theirs);
    }
}
