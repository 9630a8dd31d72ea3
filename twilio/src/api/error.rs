use thiserror::Error;

use tfplug::TfplugError;

/// Twilio error code for a missing resource
pub const NOT_FOUND_CODE: i64 = 20404;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error (HTTP {status}){}: {message}", .code.map(|c| format!(" code {}", c)).unwrap_or_default())]
    ApiError {
        status: u16,
        code: Option<i64>,
        message: String,
        more_info: Option<String>,
    },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Authentication failed")]
    AuthError,

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    #[error("Too many requests, rate limited")]
    RateLimited,

    #[error("Service unavailable, retry later")]
    ServiceUnavailable,
}

impl ApiError {
    /// HTTP 404 or Twilio error 20404
    pub fn is_not_found(&self) -> bool {
        match self {
            ApiError::ApiError { status, code, .. } => {
                *status == 404 || *code == Some(NOT_FOUND_CODE)
            }
            _ => false,
        }
    }

    /// Programmable Chat answers 403 instead of 404 once the parent service
    /// is gone
    pub fn is_missing_chat_service(&self) -> bool {
        matches!(
            self,
            ApiError::ApiError { status: 403, message, .. } if message == "Service instance not found"
        )
    }
}

impl From<ApiError> for TfplugError {
    fn from(err: ApiError) -> Self {
        if err.is_not_found() {
            TfplugError::NotFound(err.to_string())
        } else {
            TfplugError::Remote(err.to_string())
        }
    }
}

/// Conversion for the chat family, where a deleted service shows up as 403
pub fn chat_error(err: ApiError) -> TfplugError {
    if err.is_missing_chat_service() {
        TfplugError::NotFound(err.to_string())
    } else {
        err.into()
    }
}
