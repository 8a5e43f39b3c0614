//! Tabular data explorer.
//!
//! Turns a loosely-typed row collection into a searched, sorted and
//! paginated view. State lives in [`Explorer`]; the views are recomputed
//! from the raw rows by the pure [`derive`] pipeline after every change:
//!
//! ```text
//! rows ──filter(search term)──▶ filtered ──sort(key, direction)──▶ sorted ──page(n)──▶ page
//! ```
//!
//! # Example
//!
//! ```
//! use attendance_lib::explorer::{Column, Explorer, ExplorerConfig};
//! use attendance_lib::model::Row;
//!
//! let rows = vec![
//!     Row::new().set("empcode", "E1").set("name", "Bob").set("work_time", "8:30"),
//!     Row::new().set("empcode", "E2").set("name", "Amy").set("work_time", "7:15"),
//! ];
//! let config = ExplorerConfig::new(vec![
//!     Column::new("empcode", "Employee Code"),
//!     Column::new("name", "Name"),
//!     Column::new("work_time", "Work Time"),
//! ]);
//!
//! let mut explorer = Explorer::with_rows(config, rows);
//! explorer.toggle_sort("name");
//! let names: Vec<String> = explorer
//!     .view()
//!     .page
//!     .iter()
//!     .map(|row| row.get("name").unwrap().to_string())
//!     .collect();
//! assert_eq!(names, ["Amy", "Bob"]);
//!
//! explorer.set_search_term("bob");
//! assert_eq!(explorer.total_count(), 1);
//! assert_eq!(explorer.total_pages(), 1);
//! ```

mod collate;
mod column;
mod config;
mod filter;
mod page;
mod render;
mod sort;
mod state;
mod view;

use std::io;
use std::path::Path;
use std::sync::Arc;

pub use collate::locale_cmp;
pub use column::*;
pub use config::*;
pub use filter::filter_rows;
pub use page::clamp_page;
pub use page::page_range;
pub use page::total_pages;
pub use render::*;
pub use sort::compare;
pub use sort::sort_rows;
pub use state::*;
pub use view::*;

use crate::error::ExportError;
use crate::export;
use crate::model::FieldPath;
use crate::model::Row;

/// Search, sort and pagination state over a shared, read-only row collection.
///
/// The rows belong to the caller (typically whoever fetched them); the
/// explorer only reads them. Only [`set_search_term`](Self::set_search_term),
/// [`toggle_sort`](Self::toggle_sort) and [`set_page`](Self::set_page) (plus
/// the page-step helpers) mutate state.
#[derive(Debug, Clone)]
pub struct Explorer {
    config: ExplorerConfig,
    rows: Arc<[Row]>,
    state: ExplorerState,
}

impl Explorer {
    /// Creates an explorer with no rows.
    pub fn new(config: ExplorerConfig) -> Self {
        Self::with_rows(config, Vec::new())
    }

    /// Creates an explorer over `rows`.
    pub fn with_rows(config: ExplorerConfig, rows: impl Into<Arc<[Row]>>) -> Self {
        Self {
            config,
            rows: rows.into(),
            state: ExplorerState::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Returns the configuration.
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Returns the current state.
    pub fn state(&self) -> &ExplorerState {
        &self.state
    }

    /// Returns the raw rows.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Replaces the raw rows, e.g. after a new fetch completes.
    ///
    /// State is kept; a page past the new end renders empty until the caller
    /// moves back.
    pub fn set_rows(&mut self, rows: impl Into<Arc<[Row]>>) {
        self.rows = rows.into();
        log::debug!("explorer rows replaced: {} rows", self.rows.len());
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Replaces the search term and returns to page 1.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.search_term = term.into();
        self.state.current_page = 1;
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Toggle sort for a column.
    ///
    /// If the column is already sorted, flips the direction. If sorting a
    /// different column, sorts it ascending. Columns that are not sortable,
    /// and keys with no column, leave the state untouched and return `None`.
    /// Returns the new sort state.
    pub fn toggle_sort(&mut self, key: impl Into<FieldPath>) -> Option<SortState> {
        let key = key.into();
        if !self.config.column(&key).is_some_and(|c| c.sortable) {
            return None;
        }

        let next = match &self.state.sort {
            Some(current) if current.key == key => SortState {
                key,
                direction: current.direction.toggled(),
            },
            _ => SortState::asc(key),
        };
        self.state.sort = Some(next.clone());
        Some(next)
    }

    /// Clears the sort; rows return to filter order.
    pub fn clear_sort(&mut self) {
        self.state.sort = None;
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Moves to page `page`, clamped into `[1, total_pages]`.
    ///
    /// Returns the page actually stored.
    pub fn set_page(&mut self, page: usize) -> usize {
        self.state.current_page = clamp_page(page, self.total_pages());
        self.state.current_page
    }

    /// Moves one page forward, stopping at the last page.
    pub fn next_page(&mut self) -> usize {
        self.set_page(self.state.current_page.saturating_add(1))
    }

    /// Moves one page back, stopping at page 1.
    pub fn prev_page(&mut self) -> usize {
        self.set_page(self.state.current_page.saturating_sub(1))
    }

    /// Returns `true` if there is a page before the current one.
    pub fn has_prev(&self) -> bool {
        self.state.current_page > 1
    }

    /// Returns `true` if there is a page after the current one.
    pub fn has_next(&self) -> bool {
        self.state.current_page < self.total_pages()
    }

    /// Number of rows matching the current search.
    pub fn total_count(&self) -> usize {
        filter_rows(
            &self.rows,
            &self.state.search_term,
            self.config.is_searchable(),
            self.config.search_key_list(),
        )
        .len()
    }

    /// `ceil(total_count / page_size)`; zero when nothing matches.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count(), self.config.page_size())
    }

    // -------------------------------------------------------------------------
    // Derived views
    // -------------------------------------------------------------------------

    /// Derives the filtered, sorted and paged views from the current state.
    pub fn view(&self) -> ExplorerView<'_> {
        derive(&self.rows, &self.config, &self.state)
    }

    /// Rows on the current page, in sort order.
    pub fn page_rows(&self) -> Vec<&Row> {
        self.view().page
    }

    /// Every row matching the search, in sort order.
    pub fn sorted_rows(&self) -> Vec<&Row> {
        self.view().sorted
    }

    /// Renders the current page.
    pub fn render(&self) -> RenderedTable {
        render(&self.view(), &self.config, &self.state)
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Exports every filtered row, in sort order, as a CSV document.
    ///
    /// Fails with [`ExportError::Empty`] when no rows match.
    pub fn export_csv(&self) -> Result<String, ExportError> {
        let view = self.view();
        export::to_csv_string(&view.sorted, &self.config.export_field_list())
    }

    /// Writes the CSV export to `writer`, returning the number of records.
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<usize, ExportError> {
        let view = self.view();
        export::write_csv(writer, &view.sorted, &self.config.export_field_list())
    }

    /// Writes the CSV export to a file. No file is created when nothing matches.
    pub fn write_csv_file(&self, path: impl AsRef<Path>) -> Result<usize, ExportError> {
        let view = self.view();
        export::write_csv_file(path, &view.sorted, &self.config.export_field_list())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    fn config() -> ExplorerConfig {
        ExplorerConfig::new(vec![
            Column::new("empcode", "Employee Code"),
            Column::new("name", "Name"),
            Column::new("date", "Date"),
            Column::new("remark", "Remark").not_sortable(),
        ])
    }

    fn numbered(count: usize) -> Vec<Row> {
        (0..count)
            .map(|i| Row::new().set("empcode", format!("E{:03}", i)).set("n", i))
            .collect()
    }

    #[test]
    fn test_toggle_twice_returns_to_ascending() {
        let mut explorer = Explorer::new(config());

        assert_eq!(explorer.toggle_sort("name"), Some(SortState::asc("name")));
        assert_eq!(explorer.toggle_sort("name"), Some(SortState::desc("name")));
        assert_eq!(explorer.toggle_sort("name"), Some(SortState::asc("name")));
    }

    #[test]
    fn test_toggle_other_column_starts_ascending() {
        let mut explorer = Explorer::new(config());
        explorer.toggle_sort("name");
        explorer.toggle_sort("name");

        assert_eq!(explorer.toggle_sort("date"), Some(SortState::asc("date")));
        assert_eq!(explorer.state().sort, Some(SortState::asc("date")));
    }

    #[test]
    fn test_toggle_not_sortable_is_noop() {
        let mut explorer = Explorer::new(config());
        explorer.toggle_sort("name");

        assert_eq!(explorer.toggle_sort("remark"), None);
        assert_eq!(explorer.state().sort, Some(SortState::asc("name")));
    }

    #[test]
    fn test_toggle_unknown_column_is_noop() {
        let mut explorer = Explorer::new(config());

        assert_eq!(explorer.toggle_sort("salary"), None);
        assert_eq!(explorer.state().sort, None);
    }

    #[test]
    fn test_search_resets_page() {
        let mut explorer = Explorer::with_rows(config(), numbered(50));
        assert_eq!(explorer.set_page(3), 3);

        explorer.set_search_term("E0");
        assert_eq!(explorer.state().current_page, 1);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut explorer = Explorer::with_rows(config(), numbered(45));

        assert_eq!(explorer.set_page(0), 1);
        assert_eq!(explorer.set_page(99), 3);
        assert_eq!(explorer.set_page(2), 2);
    }

    #[test]
    fn test_set_page_without_rows_is_inert() {
        let mut explorer = Explorer::new(config());

        assert_eq!(explorer.total_pages(), 0);
        assert_eq!(explorer.set_page(5), 1);
        assert!(explorer.view().page.is_empty());
    }

    #[test]
    fn test_page_steps() {
        let mut explorer = Explorer::with_rows(config(), numbered(45));

        assert!(!explorer.has_prev());
        assert_eq!(explorer.prev_page(), 1);
        assert_eq!(explorer.next_page(), 2);
        assert_eq!(explorer.next_page(), 3);
        assert_eq!(explorer.next_page(), 3);
        assert!(!explorer.has_next());
    }

    #[test]
    fn test_stale_page_after_rows_shrink_is_empty() {
        let mut explorer = Explorer::with_rows(config(), numbered(45));
        explorer.set_page(3);
        explorer.set_rows(numbered(5));

        assert!(explorer.view().page.is_empty());
        assert_eq!(explorer.set_page(explorer.state().current_page), 1);
    }

    #[test]
    fn test_view_is_pure() {
        let explorer = Explorer::with_rows(config(), numbered(30));
        let first = explorer.view().page.len();
        let second = explorer.view().page.len();

        assert_eq!(first, second);
        assert_eq!(explorer.state(), &ExplorerState::default());
    }

    #[test]
    fn test_clear_sort_restores_filter_order() {
        let rows = vec![
            Row::new().set("empcode", "E3").set("name", "Cal"),
            Row::new().set("empcode", "E1").set("name", "Amy"),
            Row::new().set("empcode", "E2").set("name", "Bob"),
        ];
        let mut explorer = Explorer::with_rows(config(), rows);
        explorer.set_search_term("e");
        explorer.toggle_sort("name");
        assert_eq!(explorer.sorted_rows()[0].get("empcode"), Some(&Value::from("E1")));

        explorer.clear_sort();
        assert_eq!(explorer.state().sort, None);
        let view = explorer.view();
        assert_eq!(view.sorted, view.filtered);
        let codes: Vec<String> = view
            .sorted
            .iter()
            .map(|row| row.get("empcode").map(Value::to_string).unwrap_or_default())
            .collect();
        assert_eq!(codes, ["E3", "E1", "E2"]);
    }

    #[test]
    fn test_page_and_sorted_rows() {
        let mut explorer = Explorer::with_rows(config(), numbered(25));
        explorer.toggle_sort("empcode");
        explorer.toggle_sort("empcode");
        explorer.set_page(2);

        let sorted = explorer.sorted_rows();
        assert_eq!(sorted.len(), 25);
        assert_eq!(sorted[0].get("empcode"), Some(&Value::from("E024")));

        let page = explorer.page_rows();
        assert_eq!(page.len(), 5);
        assert_eq!(page[0].get("empcode"), Some(&Value::from("E004")));
    }

    #[test]
    fn test_render_headers_and_placeholder_cells() {
        let rows = vec![Row::new().set("empcode", "E1").set("name", Value::Null)];
        let mut explorer = Explorer::with_rows(config(), rows);
        explorer.toggle_sort("empcode");
        explorer.toggle_sort("empcode");

        let table = explorer.render();
        assert_eq!(table.headers[0].indicator, Some(Direction::Desc));
        assert_eq!(table.headers[0].text(), "Employee Code ↓");
        assert_eq!(table.headers[1].indicator, None);
        assert!(!table.headers[3].sortable);
        assert_eq!(
            table.body,
            TableBody::Rows(vec![vec!["E1".into(), "-".into(), "-".into(), "-".into()]])
        );
        assert_eq!(table.pagination, None);
    }

    #[test]
    fn test_render_empty_page() {
        let explorer = Explorer::new(config());

        assert_eq!(
            explorer.render().body,
            TableBody::Empty {
                colspan: 4,
                message: NO_DATA.to_string()
            }
        );
    }

    #[test]
    fn test_render_pagination_info() {
        let mut explorer = Explorer::with_rows(config(), numbered(45));
        explorer.set_page(2);

        let pagination = explorer.render().pagination.unwrap();
        assert_eq!(pagination.label(), "Page 2 of 3 (45 total)");
        assert!(pagination.has_prev);
        assert!(pagination.has_next);
    }

    #[test]
    fn test_render_text_layout() {
        let rows = vec![
            Row::new().set("empcode", "E1").set("name", "Bob"),
            Row::new().set("empcode", "E22").set("name", "Amy"),
        ];
        let columns = vec![Column::new("empcode", "Code"), Column::new("name", "Name")];
        let mut explorer = Explorer::with_rows(ExplorerConfig::new(columns), rows);
        explorer.toggle_sort("name");

        let expected = "\
Code  Name ↑
----  ------
E22   Amy
E1    Bob
";
        assert_eq!(explorer.render().to_text(), expected);
    }

    #[test]
    fn test_render_text_aligns_wide_characters() {
        let rows = vec![
            Row::new().set("name", "山田太郎").set("empcode", "E1"),
            Row::new().set("name", "Bob").set("empcode", "E2"),
        ];
        let columns = vec![Column::new("name", "Name"), Column::new("empcode", "Code")];
        let explorer = Explorer::with_rows(ExplorerConfig::new(columns), rows);

        let expected = "\
Name      Code
--------  ----
山田太郎  E1
Bob       E2
";
        assert_eq!(explorer.render().to_text(), expected);
    }
}
