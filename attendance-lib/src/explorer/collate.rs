//! Locale-style string ordering.
//!
//! Approximates the default collation of a browser's `localeCompare`:
//! letters compare case-insensitively first, then lowercase sorts before
//! uppercase at the first case difference, then code-point order breaks any
//! remaining tie. Accents are not folded, and punctuation keeps its code-point
//! position instead of sorting ahead of digits: `:` sorts after `9`.

use std::cmp::Ordering;

/// Compares two strings the way a user expects names and codes to sort.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use attendance_lib::explorer::locale_cmp;
///
/// assert_eq!(locale_cmp("amy", "Bob"), Ordering::Less);
/// assert_eq!(locale_cmp("amy", "Amy"), Ordering::Less);
/// ```
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    folded(a)
        .cmp(folded(b))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Lowercase first at the first position where the two strings differ in case.
fn case_order(a: &str, b: &str) -> Ordering {
    for (x, y) in a.chars().zip(b.chars()) {
        if x == y {
            continue;
        }
        match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
