//! `/mcid/` endpoints: stored MCID records.
//!
//! Rows are returned as the backend sends them.

use std::future::Future;
use std::future::IntoFuture;
use std::pin::Pin;

use super::DateRange;
use super::request::with_empcode;
use crate::AttendanceClient;
use crate::error::ApiError;
use crate::model::Row;
use crate::normalize;

/// MCID record endpoints, bound to a client.
#[derive(Debug, Clone, Copy)]
pub struct McidApi<'a> {
    client: &'a AttendanceClient,
}

impl AttendanceClient {
    /// MCID record endpoints.
    pub fn mcid(&self) -> McidApi<'_> {
        McidApi { client: self }
    }
}

impl<'a> McidApi<'a> {
    /// Export of every MCID record in `range`.
    pub async fn export(&self, range: &DateRange) -> Result<Vec<Row>, ApiError> {
        let body = self.client.get_json("/mcid/export/", range.query()).await?;
        Ok(normalize::collection(body))
    }

    /// Records of one employee.
    pub async fn record(&self, empcode: &str, range: &DateRange) -> Result<Vec<Row>, ApiError> {
        let mut query = vec![("empcode", empcode.trim().to_string())];
        query.extend(range.query());
        let body = self.client.get_json("/mcid/record/", query).await?;
        Ok(normalize::collection(body))
    }

    /// Records in `range`, optionally for one employee.
    pub fn records(&self, range: &DateRange) -> RecordsBuilder<'a> {
        RecordsBuilder {
            client: self.client,
            range: *range,
            empcode: None,
        }
    }
}

/// Builder for MCID record listings bound to a client.
pub struct RecordsBuilder<'a> {
    client: &'a AttendanceClient,
    range: DateRange,
    empcode: Option<String>,
}

impl RecordsBuilder<'_> {
    /// Restricts the listing to one employee.
    pub fn empcode(mut self, empcode: impl Into<String>) -> Self {
        self.empcode = Some(empcode.into());
        self
    }
}

impl<'a> IntoFuture for RecordsBuilder<'a> {
    type Output = Result<Vec<Row>, ApiError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let query = with_empcode(self.range.query(), self.empcode.as_deref());
            let body = self.client.get_json("/mcid/records/", query).await?;
            Ok(normalize::collection(body))
        })
    }
}
