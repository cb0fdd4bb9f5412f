//! Normalized API error taxonomy.
//!
//! Every failure reaching the store or a UI caller is one of these four
//! kinds, and its `Display` output is the user-facing message. The store
//! records `to_string()` of whatever it catches, so the mapping from
//! failure to message lives entirely here and in the transport adapter.

use thiserror::Error;

/// Fixed message for connectivity failures (no response received).
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Fallback when the server reports an error without a message field.
pub const SERVER_FALLBACK_MESSAGE: &str = "Something went wrong. Please try again.";

/// Fixed message for unclassified failures.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// Failure of an API operation, normalized to a user-facing message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server responded with an error status or a `success: false`
    /// envelope. The message is the server's, or the fixed fallback.
    #[error("{message}")]
    Server {
        /// HTTP status of the response that reported the failure.
        status: u16,
        /// Resolved user-facing message.
        message: String,
    },

    /// No response was received (timeout or connection failure).
    #[error("{}", NETWORK_MESSAGE)]
    Network,

    /// A client-side authentication precondition failed, e.g. refreshing
    /// with no stored refresh token.
    #[error("{0}")]
    Auth(String),

    /// Anything that fits none of the above; detail kept for logs.
    #[error("{}", UNEXPECTED_MESSAGE)]
    Unexpected(String),
}

impl ApiError {
    /// Builds a server-reported failure, falling back to the generic
    /// message when the body carried none.
    #[must_use]
    pub fn server(status: u16, message: Option<String>) -> Self {
        Self::Server {
            status,
            message: message.unwrap_or_else(|| SERVER_FALLBACK_MESSAGE.to_string()),
        }
    }

    /// Whether this is a server-reported authorization failure.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Server { status: 401, .. })
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_server_message_passes_through() {
        let err = ApiError::server(404, Some("Not found".to_string()));
        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_server_fallback_message() {
        let err = ApiError::server(500, None);
        assert_eq!(err.to_string(), SERVER_FALLBACK_MESSAGE);
    }

    #[test]
    fn test_network_message_is_fixed() {
        assert_eq!(ApiError::Network.to_string(), NETWORK_MESSAGE);
    }

    #[test]
    fn test_unexpected_hides_detail_from_display() {
        let err = ApiError::Unexpected("decode: missing field".to_string());
        assert_eq!(err.to_string(), UNEXPECTED_MESSAGE);
    }

    #[test]
    fn test_unauthorized_detection() {
        assert!(ApiError::server(401, None).is_unauthorized());
        assert!(!ApiError::server(403, None).is_unauthorized());
        assert!(!ApiError::Network.is_unauthorized());
    }
}
