//! # API Error Types
//!
//! Typed error handling for the jebs-api backend.
//! Every handler operation returns `Result<T, ApiError>`.

use thiserror::Error;

/// Core error type for all request-handling operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or unusable credential (e.g. no Stripe key)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed or missing request fields
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Collaborator answered with a non-success status
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Transport failure talking to a collaborator
    #[error("Network error: {0}")]
    Network(String),

    /// Request or response body could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Shorthand for a provider error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::Configuration(_)
            | ApiError::Provider { .. }
            | ApiError::Network(_)
            | ApiError::Serialization(_) => 500,
        }
    }

    /// Message placed in the `error` field of the JSON response.
    ///
    /// Unlike `Display`, this carries no variant prefix: callers see the
    /// collaborator's own text.
    pub fn public_message(&self) -> &str {
        match self {
            ApiError::Configuration(msg)
            | ApiError::Validation(msg)
            | ApiError::Network(msg)
            | ApiError::Serialization(msg) => msg,
            ApiError::Provider { message, .. } => message,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}

/// Result type alias for request-handling operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::Validation("x".into()).status_code(), 400);
        assert_eq!(ApiError::Configuration("x".into()).status_code(), 500);
        assert_eq!(ApiError::provider("stripe", "declined").status_code(), 500);
        assert_eq!(ApiError::Network("timeout".into()).status_code(), 500);
    }

    #[test]
    fn test_public_message_drops_prefix() {
        let err = ApiError::provider("resend", "domain not verified");
        assert_eq!(err.public_message(), "domain not verified");
        assert_eq!(
            err.to_string(),
            "Provider error [resend]: domain not verified"
        );
    }

    #[test]
    fn test_from_serde_error() {
        let err: ApiError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert!(matches!(err, ApiError::Serialization(_)));
        assert_eq!(err.status_code(), 500);
    }
}
