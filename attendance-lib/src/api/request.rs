//! Request execution
//!
//! Every endpoint is a `GET` with query parameters that answers JSON.

use reqwest::header::ACCEPT;
use reqwest::header::HeaderValue;
use serde_json::Value as Json;
use url::Url;

use super::envelope::check_envelope;
use super::envelope::error_message;
use crate::AttendanceClient;
use crate::error::ApiError;

/// Query string pairs.
pub(crate) type Query = Vec<(&'static str, String)>;

impl AttendanceClient {
    /// Joins `path` onto the base URL and appends `query`.
    pub(crate) fn endpoint(&self, path: &str, query: &[(&'static str, String)]) -> Url {
        let mut url = self.inner.base_url.clone();
        let joined = format!("{}{}", url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url.set_query(None);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    /// Sends a `GET` and returns the checked JSON envelope.
    ///
    /// Non-2xx statuses become [`ApiError::Http`]; a 2xx body with an
    /// `error` field becomes [`ApiError::Backend`].
    pub(crate) async fn get_json(&self, path: &str, query: Query) -> Result<Json, ApiError> {
        let url = self.endpoint(path, &query);
        log::debug!("GET {}", url);

        let mut request = self
            .inner
            .http_client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        log::debug!("{} {} ({} bytes)", status.as_u16(), url.path(), body.len());

        if !status.is_success() {
            let message = error_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or(body);
            log::warn!("{} failed: HTTP {}: {}", url.path(), status.as_u16(), message);
            return Err(ApiError::http(status.as_u16(), message));
        }

        let json: Json = serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body.as_str()))?;
        check_envelope(json)
    }
}

/// Adds `empcode` to `query` when it is non-blank.
pub(crate) fn with_empcode(mut query: Query, empcode: Option<&str>) -> Query {
    if let Some(empcode) = empcode.map(str::trim).filter(|e| !e.is_empty()) {
        query.push(("empcode", empcode.to_string()));
    }
    query
}
