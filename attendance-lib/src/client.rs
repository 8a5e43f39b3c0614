//! Main AttendanceClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::error::ApiError;

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "ATTENDANCE_API_BASE_URL";

/// Connection settings for the attendance backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
    /// Connection timeout.
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base URL taken from `ATTENDANCE_API_BASE_URL` when set.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url,
            ..Self::default()
        }
    }
}

/// Client for the attendance backend.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. Endpoints are grouped the way the backend groups
/// them: [`attendance`](Self::attendance), [`mcid_data`](Self::mcid_data),
/// [`files`](Self::files) and [`mcid`](Self::mcid).
///
/// The client never retries; a failed call is reported once.
///
/// # Example
///
/// ```ignore
/// use attendance_lib::AttendanceClient;
/// use attendance_lib::api::DateRange;
///
/// let client = AttendanceClient::builder()
///     .url("http://localhost:8000")
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let range = DateRange::parse("01/05/2024", "07/05/2024")?;
/// let rows = client.attendance().load(&range, "").await?;
/// ```
#[derive(Clone)]
pub struct AttendanceClient {
    pub(crate) inner: Arc<AttendanceClientInner>,
}

pub(crate) struct AttendanceClientInner {
    pub(crate) base_url: Url,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
}

impl AttendanceClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> AttendanceClientBuilder<Missing> {
        AttendanceClientBuilder::new()
    }

    /// Creates a client from a [`ClientConfig`].
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let mut builder = Self::builder().url(config.base_url);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        builder.build()
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }
}

impl std::fmt::Debug for AttendanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttendanceClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing an [`AttendanceClient`].
///
/// The base URL is required; `build` only exists once it is set.
pub struct AttendanceClientBuilder<U> {
    url: U,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl AttendanceClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the backend base URL.
    pub fn url(self, url: impl Into<String>) -> AttendanceClientBuilder<Set<String>> {
        AttendanceClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for AttendanceClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> AttendanceClientBuilder<U> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl AttendanceClientBuilder<Set<String>> {
    /// Builds the [`AttendanceClient`].
    ///
    /// Fails if the base URL does not parse or the HTTP client cannot be
    /// created.
    pub fn build(self) -> Result<AttendanceClient, ApiError> {
        let base_url = parse_base_url(&self.url.0)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        log::debug!("attendance client for {}", base_url);
        Ok(AttendanceClient {
            inner: Arc::new(AttendanceClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

/// Parses a base URL, rejecting anything that cannot carry endpoint paths.
fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let url = Url::parse(raw.trim())?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}
