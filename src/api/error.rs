//! Error types for the Content Management API client
//!
//! Every failed request is funneled through a single handler in
//! [`crate::api::client`] which maps the HTTP status and the API's error body
//! onto one of these variants.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when interacting with the Content Management API
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Access token missing, expired or revoked (401)
    #[error("Access token invalid: {0}")]
    Unauthorized(String),

    /// Token is valid but lacks access to the resource (403)
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Requested resource was not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// The `X-Contentful-Version` sent with an update is stale (409)
    #[error("Version mismatch: {0}")]
    VersionMismatch(String),

    /// The payload was rejected by server-side validation (422)
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Error message from the API
        message: String,
        /// Raw `details` object describing the failing fields
        details: Option<serde_json::Value>,
    },

    /// Rate limit exceeded and retries (if enabled) were exhausted (429)
    #[error("Rate limit exceeded - please try again later")]
    RateLimited {
        /// Seconds until the limit resets, from `X-Contentful-RateLimit-Reset`
        reset_secs: Option<u64>,
    },

    /// Server error (5xx)
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Any other non-success response
    #[error("API error ({status}{}): {message}", fmt_error_id(.id))]
    Api {
        /// HTTP status code
        status: u16,
        /// Error identifier from `sys.id` of the error body
        id: Option<String>,
        /// Error message from the API
        message: String,
        /// Value of the `x-contentful-request-id` response header
        request_id: Option<String>,
    },

    /// Failed to decode the response body
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The configured host or a built path is not a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The entity's `sys` lacks a link needed to address it
    #[error("Entity is missing the sys.{0} link")]
    MissingLink(&'static str),

    /// Asset file processing did not finish within the allowed checks
    #[error("Asset {asset_id} is taking longer than expected to process (locale {locale})")]
    ProcessingTimeout {
        /// Asset being processed
        asset_id: String,
        /// Locale whose file was never given a url
        locale: String,
    },
}

fn fmt_error_id(id: &Option<String>) -> String {
    id.as_deref().map(|i| format!(" {}", i)).unwrap_or_default()
}

impl ApiError {
    /// HTTP status of the failed response, if the error came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::PermissionDenied(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::VersionMismatch(_) => Some(409),
            ApiError::ValidationFailed { .. } => Some(422),
            ApiError::RateLimited { .. } => Some(429),
            ApiError::ServerError { status, .. } | ApiError::Api { status, .. } => Some(*status),
            ApiError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the request may succeed if sent again unchanged
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::RateLimited { .. } | ApiError::ServerError { .. }
        )
    }
}

/// Error body returned by the API
///
/// ```json
/// { "sys": { "type": "Error", "id": "NotFound" }, "message": "...", "requestId": "..." }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Error identity
    pub sys: Option<ErrorSys>,
    /// Human readable message
    pub message: Option<String>,
    /// Structured details (validation errors, etc.)
    pub details: Option<serde_json::Value>,
    /// Request id echoed in the body
    pub request_id: Option<String>,
}

/// `sys` block of an error body
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorSys {
    /// Always `"Error"`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Error identifier such as `NotFound` or `VersionMismatch`
    pub id: Option<String>,
}

impl ApiErrorResponse {
    /// Get the error message, falling back to the error id
    pub fn get_message(&self) -> String {
        self.message
            .clone()
            .or_else(|| self.error_id())
            .unwrap_or_else(|| "Unknown error".to_string())
    }

    /// Error identifier from `sys.id`
    pub fn error_id(&self) -> Option<String> {
        self.sys.as_ref().and_then(|s| s.id.clone())
    }
}

/// Result type alias for Content Management API operations
pub type Result<T> = std::result::Result<T, ApiError>;
