//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication required; the stored token has been dropped
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected by backend validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local rule rejected the operation before any request
    #[error(transparent)]
    App(#[from] AppError),
}

impl ClientError {
    /// Shared error code for UI handling
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Http(_) => ErrorCode::NetworkError,
            Self::Serialization(_) => ErrorCode::InvalidFormat,
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Api { status, .. } => http::StatusCode::from_u16(*status)
                .map(ErrorCode::from_http_status)
                .unwrap_or(ErrorCode::Unknown),
            Self::Config(_) => ErrorCode::InvalidRequest,
            Self::App(e) => e.code,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::App(e) => e,
            other => AppError::with_message(other.code(), other.to_string()),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(ClientError::Unauthorized.code(), ErrorCode::NotAuthenticated);
        assert_eq!(
            ClientError::Api {
                status: 409,
                message: "exists".into()
            }
            .code(),
            ErrorCode::AlreadyExists
        );
        let app = AppError::new(ErrorCode::MenuHasOrders);
        assert_eq!(ClientError::from(app).code(), ErrorCode::MenuHasOrders);
    }

    #[test]
    fn test_into_app_error_keeps_local_error() {
        let local = AppError::validation("bad email");
        let back: AppError = ClientError::App(local.clone()).into();
        assert_eq!(back.code, ErrorCode::ValidationFailed);
        assert_eq!(back.message, local.message);

        let remote: AppError = ClientError::NotFound("Order 4".into()).into();
        assert_eq!(remote.code, ErrorCode::NotFound);
        assert!(remote.message.contains("Order 4"));
    }
}
