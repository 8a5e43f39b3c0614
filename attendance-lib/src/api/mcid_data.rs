//! `/mcid-data/` endpoints: MCID punch import and processing.

use std::future::Future;
use std::future::IntoFuture;
use std::pin::Pin;

use super::DateRange;
use super::McidFetch;
use super::McidProcess;
use super::request::with_empcode;
use crate::AttendanceClient;
use crate::error::ApiError;

/// MCID data endpoints, bound to a client.
#[derive(Debug, Clone, Copy)]
pub struct McidDataApi<'a> {
    client: &'a AttendanceClient,
}

impl AttendanceClient {
    /// MCID data endpoints.
    pub fn mcid_data(&self) -> McidDataApi<'_> {
        McidDataApi { client: self }
    }
}

impl<'a> McidDataApi<'a> {
    /// Fetches punches for `range` and saves them, returning the punches and
    /// the save counters.
    pub async fn fetch(&self, range: &DateRange) -> Result<McidFetch, ApiError> {
        let body = self.client.get_json("/mcid-data/fetch/", range.query()).await?;
        let fetch = McidFetch::from_envelope(body);
        log::info!(
            "mcid fetch {}: {} rows, {} saved",
            range,
            fetch.rows.len(),
            fetch.stats.saved_count
        );
        Ok(fetch)
    }

    /// Computes per-employee operational summaries for `range`.
    pub fn process(&self, range: &DateRange) -> ProcessBuilder<'a> {
        ProcessBuilder {
            client: self.client,
            range: *range,
            empcode: None,
        }
    }
}

/// Builder for MCID processing bound to a client.
pub struct ProcessBuilder<'a> {
    client: &'a AttendanceClient,
    range: DateRange,
    empcode: Option<String>,
}

impl ProcessBuilder<'_> {
    /// Restricts processing to one employee.
    pub fn empcode(mut self, empcode: impl Into<String>) -> Self {
        self.empcode = Some(empcode.into());
        self
    }
}

impl<'a> IntoFuture for ProcessBuilder<'a> {
    type Output = Result<McidProcess, ApiError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send + 'a>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let query = with_empcode(self.range.query(), self.empcode.as_deref());
            let body = self.client.get_json("/mcid-data/process/", query).await?;
            Ok(McidProcess::from_envelope(body))
        })
    }
}
