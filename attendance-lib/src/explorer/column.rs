//! Column descriptors.

use std::fmt;
use std::sync::Arc;

use crate::model::FieldPath;
use crate::model::Row;
use crate::model::Value;

/// Custom cell renderer: receives the accessed value (`None` when absent)
/// and the whole row, returns the cell text.
pub type Renderer = Arc<dyn Fn(Option<&Value>, &Row) -> String + Send + Sync>;

/// A table column definition.
///
/// Columns are plain data read by the [`Explorer`](super::Explorer). The key
/// is not validated against any row shape: an unresolvable key yields "no
/// value" for every row.
///
/// # Example
///
/// ```
/// use attendance_lib::explorer::Column;
///
/// let columns = vec![
///     Column::new("empcode", "Employee Code"),
///     Column::new("remark", "Remark").not_sortable(),
///     Column::new("total_records", "Total Records")
///         .render(|value, _row| value.map(|v| v.to_string()).unwrap_or_else(|| "0".into())),
/// ];
/// assert!(!columns[1].sortable);
/// ```
#[derive(Clone)]
pub struct Column {
    /// Field name or dotted path read from each row.
    pub key: FieldPath,
    /// Header text displayed at the top.
    pub header: String,
    /// Whether clicking the header toggles sorting. Defaults to `true`.
    pub sortable: bool,
    /// Optional custom renderer.
    pub render: Option<Renderer>,
}

impl Column {
    /// Create a new sortable column with the given key and header.
    pub fn new(key: impl Into<FieldPath>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            sortable: true,
            render: None,
        }
    }

    /// Set whether this column is sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Mark this column as not sortable.
    pub fn not_sortable(self) -> Self {
        self.sortable(false)
    }

    /// Set a custom renderer for this column's cells.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(Option<&Value>, &Row) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Render one cell: the custom renderer when present, otherwise the
    /// value's display form with `-` for absent or null values.
    pub fn render_cell(&self, row: &Row) -> String {
        let value = row.resolve(&self.key);
        match &self.render {
            Some(render) => render(value, row),
            None => match value {
                Some(value) if !value.is_null() => value.to_string(),
                _ => PLACEHOLDER.to_string(),
            },
        }
    }
}

/// Cell text for absent or null values.
pub const PLACEHOLDER: &str = "-";

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("sortable", &self.sortable)
            .field("render", &self.render.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
