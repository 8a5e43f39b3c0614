//! Rendering the current page into display cells.
//!
//! The explorer does not draw anything itself. It hands callers a
//! [`RenderedTable`]: header cells with sort affordances, the body cells of
//! the current page, and pagination info. [`RenderedTable::to_text`] lays it
//! out as aligned plain text for terminals.

use std::fmt::Write as _;

use unicode_width::UnicodeWidthStr;

use crate::model::FieldPath;

use super::Direction;
use super::ExplorerConfig;
use super::ExplorerState;
use super::ExplorerView;

/// Text of the single placeholder row shown for an empty page.
pub const NO_DATA: &str = "No data available";

/// Gap between text columns.
const COLUMN_GAP: &str = "  ";

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    /// Column key.
    pub key: FieldPath,
    /// Display label.
    pub label: String,
    /// Whether clicking toggles sorting (pointer affordance).
    pub sortable: bool,
    /// Sort indicator, only on the column currently sorted.
    pub indicator: Option<Direction>,
}

impl HeaderCell {
    /// Label with the sort indicator appended when sorted.
    pub fn text(&self) -> String {
        match self.indicator {
            Some(direction) => format!("{} {}", self.label, direction.indicator()),
            None => self.label.clone(),
        }
    }
}

/// Body of the rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// One cell per column for each row on the page.
    Rows(Vec<Vec<String>>),
    /// The page is empty: one placeholder row spanning all columns.
    Empty {
        /// Number of columns spanned.
        colspan: usize,
        /// Placeholder text.
        message: String,
    },
}

/// Pagination controls state; present only when there is more than one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Current page, 1-based.
    pub current_page: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Number of rows after filtering.
    pub total_count: usize,
    /// Whether "Previous" is enabled.
    pub has_prev: bool,
    /// Whether "Next" is enabled.
    pub has_next: bool,
}

impl PaginationInfo {
    /// `Page 2 of 3 (45 total)`.
    pub fn label(&self) -> String {
        format!(
            "Page {} of {} ({} total)",
            self.current_page, self.total_pages, self.total_count
        )
    }
}

/// A fully rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    /// Header cells, one per column.
    pub headers: Vec<HeaderCell>,
    /// Body cells.
    pub body: TableBody,
    /// Pagination controls, if more than one page.
    pub pagination: Option<PaginationInfo>,
}

/// Renders the current page of `view`.
pub fn render(view: &ExplorerView<'_>, config: &ExplorerConfig, state: &ExplorerState) -> RenderedTable {
    let headers = config
        .columns()
        .iter()
        .map(|column| HeaderCell {
            key: column.key.clone(),
            label: column.header.clone(),
            sortable: column.sortable,
            indicator: state
                .sort
                .as_ref()
                .filter(|sort| sort.key == column.key)
                .map(|sort| sort.direction),
        })
        .collect();

    let body = if view.page.is_empty() {
        TableBody::Empty {
            colspan: config.columns().len(),
            message: NO_DATA.to_string(),
        }
    } else {
        TableBody::Rows(
            view.page
                .iter()
                .map(|row| config.columns().iter().map(|c| c.render_cell(row)).collect())
                .collect(),
        )
    };

    let pagination = (view.total_pages > 1).then(|| PaginationInfo {
        current_page: view.current_page,
        total_pages: view.total_pages,
        total_count: view.total_count(),
        has_prev: view.current_page > 1,
        has_next: view.current_page < view.total_pages,
    });

    RenderedTable {
        headers,
        body,
        pagination,
    }
}

impl RenderedTable {
    /// Lays the table out as left-aligned plain text.
    ///
    /// Each column is as wide as its widest cell, measured in terminal
    /// columns so wide characters keep the table aligned. The empty
    /// placeholder row is written once under the header. The pagination
    /// label, when present, ends the output.
    pub fn to_text(&self) -> String {
        let header_text: Vec<String> = self.headers.iter().map(HeaderCell::text).collect();
        let mut widths: Vec<usize> = header_text.iter().map(|h| h.width()).collect();
        if let TableBody::Rows(rows) = &self.body {
            for row in rows {
                for (width, cell) in widths.iter_mut().zip(row) {
                    *width = (*width).max(cell.width());
                }
            }
        }

        let mut out = String::new();
        push_line(&mut out, &header_text, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);

        match &self.body {
            TableBody::Rows(rows) => {
                for row in rows {
                    push_line(&mut out, row, &widths);
                }
            }
            TableBody::Empty { message, .. } => {
                out.push_str(message);
                out.push('\n');
            }
        }

        if let Some(pagination) = &self.pagination {
            let _ = writeln!(out, "{}", pagination.label());
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.width());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);
    out.push_str(line.trim_end());
    out.push('\n');
}
