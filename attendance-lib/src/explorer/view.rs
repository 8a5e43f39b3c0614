//! The derivation pipeline: filter, then sort, then page.

use crate::model::Row;

use super::ExplorerConfig;
use super::ExplorerState;
use super::filter::filter_rows;
use super::page::page_range;
use super::page::total_pages;
use super::sort::sort_rows;

/// The three dependent views derived from raw rows and explorer state.
///
/// All views borrow the caller's rows; nothing is copied.
#[derive(Debug, Clone)]
pub struct ExplorerView<'a> {
    /// Rows matching the search term, in input order.
    pub filtered: Vec<&'a Row>,
    /// Filtered rows in sort order.
    pub sorted: Vec<&'a Row>,
    /// The current page window of `sorted`.
    pub page: Vec<&'a Row>,
    /// The page the state asked for.
    pub current_page: usize,
    /// `ceil(sorted.len() / page_size)`.
    pub total_pages: usize,
}

impl ExplorerView<'_> {
    /// Number of rows after filtering.
    pub fn total_count(&self) -> usize {
        self.sorted.len()
    }
}

/// Derives the views for `rows` under `state`.
///
/// Pure: the same rows, configuration and state always give the same views,
/// so callers re-run it after every state change.
pub fn derive<'a>(rows: &'a [Row], config: &ExplorerConfig, state: &ExplorerState) -> ExplorerView<'a> {
    let filtered = filter_rows(
        rows,
        &state.search_term,
        config.is_searchable(),
        config.search_key_list(),
    );
    let sorted = sort_rows(&filtered, state.sort.as_ref());

    let range = page_range(state.current_page, config.page_size(), sorted.len());
    let page = sorted[range].to_vec();
    let total_pages = total_pages(sorted.len(), config.page_size());

    ExplorerView {
        filtered,
        sorted,
        page,
        current_page: state.current_page,
        total_pages,
    }
}
