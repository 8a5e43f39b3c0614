//! Explorer configuration.

use crate::export::ExportField;
use crate::model::FieldPath;

use super::Column;

/// Rows per page. Fixed for every explorer.
pub const PAGE_SIZE: usize = 20;

/// Immutable configuration handed to an [`Explorer`](super::Explorer) at
/// construction.
///
/// # Example
///
/// ```
/// use attendance_lib::explorer::{Column, ExplorerConfig, PAGE_SIZE};
///
/// let config = ExplorerConfig::new(vec![
///     Column::new("empcode", "Employee Code"),
///     Column::new("name", "Name"),
/// ])
/// .search_keys(["empcode", "name"]);
///
/// assert_eq!(config.page_size(), PAGE_SIZE);
/// assert!(config.is_searchable());
/// ```
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    columns: Vec<Column>,
    page_size: usize,
    searchable: bool,
    search_keys: Option<Vec<FieldPath>>,
    export_fields: Option<Vec<ExportField>>,
}

impl ExplorerConfig {
    /// Creates a searchable configuration over the given columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            page_size: PAGE_SIZE,
            searchable: true,
            search_keys: None,
            export_fields: None,
        }
    }

    /// Enables or disables free-text search.
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Restricts free-text search to these fields.
    ///
    /// Without an allow-list every field of each row is searched.
    pub fn search_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<FieldPath>,
    {
        self.search_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the fields written by CSV export.
    ///
    /// Without this, export writes one field per column.
    pub fn export_fields(mut self, fields: Vec<ExportField>) -> Self {
        self.export_fields = Some(fields);
        self
    }

    /// Returns the column definitions.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the column whose key equals `key`.
    pub fn column(&self, key: &FieldPath) -> Option<&Column> {
        self.columns.iter().find(|c| &c.key == key)
    }

    /// Returns the page size.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns `true` if free-text search is enabled.
    pub fn is_searchable(&self) -> bool {
        self.searchable
    }

    /// Returns the search allow-list, if any.
    pub fn search_key_list(&self) -> Option<&[FieldPath]> {
        self.search_keys.as_deref()
    }

    /// Returns the fields written by export: the explicit list, or one per column.
    pub fn export_field_list(&self) -> Vec<ExportField> {
        match &self.export_fields {
            Some(fields) => fields.clone(),
            None => self
                .columns
                .iter()
                .map(|c| ExportField::new(c.header.clone(), c.key.clone()))
                .collect(),
        }
    }
}
