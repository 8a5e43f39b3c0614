//! Explorer state.

use crate::model::FieldPath;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    /// Header indicator for this direction.
    pub fn indicator(self) -> &'static str {
        match self {
            Direction::Asc => "↑",
            Direction::Desc => "↓",
        }
    }
}

/// The active sort: which field, which way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    /// Field being sorted on.
    pub key: FieldPath,
    /// Sort direction.
    pub direction: Direction,
}

impl SortState {
    /// Creates an ascending sort on `key`.
    pub fn asc(key: impl Into<FieldPath>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Asc,
        }
    }

    /// Creates a descending sort on `key`.
    pub fn desc(key: impl Into<FieldPath>) -> Self {
        Self {
            key: key.into(),
            direction: Direction::Desc,
        }
    }
}

/// Mutable state of one explorer.
///
/// Only the explorer's state-transition methods change it; deriving views
/// never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerState {
    /// Current free-text search term.
    pub search_term: String,
    /// Current sort, if any.
    pub sort: Option<SortState>,
    /// Current page, 1-based.
    pub current_page: usize,
}

impl Default for ExplorerState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort: None,
            current_page: 1,
        }
    }
}
