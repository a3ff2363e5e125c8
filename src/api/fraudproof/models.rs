use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body FastAPI returns for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: Option<serde_json::Value>,
    pub message: Option<String>,
}

/// Comprehensive error type for backend calls
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other non-success HTTP status
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// 2xx response that is not JSON
    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),
    /// Body did not match the expected shape
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
    /// Backend answered but reported its own failure in the body
    #[error("Backend Error: {0}")]
    Backend(String),
    /// Request exceeded the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// Connection refused, DNS failure and similar
    #[error("Request Error: {0}")]
    RequestError(String),
}

impl ApiError {
    /// Transport-level failure, as opposed to a protocol error
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::RequestError(_) | ApiError::Timeout(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(e.to_string())
        } else if e.is_decode() {
            ApiError::DeserializationError(e.to_string())
        } else {
            ApiError::RequestError(format!("Request failed: {}", e))
        }
    }
}
