//! API error types

/// Errors that can occur while talking to the attendance backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP error response from the backend.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The backend answered successfully but reported an error in the body.
    #[error("{message}")]
    Backend {
        /// The `error` field of the response envelope.
        message: String,
        /// The `details` field, if present.
        details: Option<String>,
    },

    /// Network error during API call.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid base URL or endpoint path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse API response.
    #[error("Response parse error: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl ApiError {
    /// Creates a new HTTP error.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates an error reported inside a successful response envelope.
    pub fn backend(message: impl Into<String>, details: Option<String>) -> Self {
        Self::Backend {
            message: message.into(),
            details,
        }
    }

    /// Creates a new parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse error with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns the backend's `details` text if available.
    pub fn details(&self) -> Option<&str> {
        match self {
            Self::Backend { details, .. } => details.as_deref(),
            _ => None,
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_displays_message_only() {
        let err = ApiError::backend("No records for range", Some("from_date > to_date".into()));
        assert_eq!(err.to_string(), "No records for range");
        assert_eq!(err.details(), Some("from_date > to_date"));
    }
}
