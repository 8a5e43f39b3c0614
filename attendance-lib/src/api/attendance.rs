//! `/inout/` endpoints: attendance records.

use std::future::Future;
use std::future::IntoFuture;
use std::pin::Pin;

use super::DateRange;
use super::request::with_empcode;
use crate::AttendanceClient;
use crate::error::ApiError;
use crate::model::Row;
use crate::normalize;

/// Attendance endpoints, bound to a client.
#[derive(Debug, Clone, Copy)]
pub struct AttendanceApi<'a> {
    client: &'a AttendanceClient,
}

impl AttendanceClient {
    /// Attendance endpoints.
    pub fn attendance(&self) -> AttendanceApi<'_> {
        AttendanceApi { client: self }
    }
}

impl<'a> AttendanceApi<'a> {
    /// Pulls records for `range` from the upstream device feed and stores them.
    pub async fn fetch_and_save(&self, range: &DateRange) -> Result<Vec<Row>, ApiError> {
        let body = self.client.get_json("/inout/list/", range.query()).await?;
        Ok(normalize::rows_with(body, normalize::attendance_row))
    }

    /// Searches stored records without saving anything.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let rows = client.attendance().search(&range).empcode("E1").await?;
    /// ```
    pub fn search(&self, range: &DateRange) -> SearchBuilder<'a> {
        SearchBuilder {
            client: self.client,
            range: *range,
            empcode: None,
        }
    }

    /// Records of one employee.
    pub async fn filter(&self, empcode: &str, range: &DateRange) -> Result<Vec<Row>, ApiError> {
        let mut query = vec![("empcode", empcode.trim().to_string())];
        query.extend(range.query());
        let body = self.client.get_json("/inout/filter/", query).await?;
        Ok(normalize::rows_with(body, normalize::attendance_row))
    }

    /// Filters by employee when `empcode` is non-blank, otherwise searches
    /// the whole range. Rows come back normalized.
    pub async fn load(&self, range: &DateRange, empcode: &str) -> Result<Vec<Row>, ApiError> {
        let empcode = empcode.trim();
        let rows = if empcode.is_empty() {
            self.search(range).await?
        } else {
            self.filter(empcode, range).await?
        };
        log::info!("loaded {} attendance records for {}", rows.len(), range);
        Ok(rows)
    }
}

/// Builder for attendance searches bound to a client.
pub struct SearchBuilder<'a> {
    client: &'a AttendanceClient,
    range: DateRange,
    empcode: Option<String>,
}

impl SearchBuilder<'_> {
    /// Restricts the search to one employee.
    pub fn empcode(mut self, empcode: impl Into<String>) -> Self {
        self.empcode = Some(empcode.into());
        self
    }
}

impl<'a> IntoFuture for SearchBuilder<'a> {
    type Output = Result<Vec<Row>, ApiError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let query = with_empcode(self.range.query(), self.empcode.as_deref());
            let body = self.client.get_json("/inout/search/", query).await?;
            Ok(normalize::rows_with(body, normalize::attendance_row))
        })
    }
}
