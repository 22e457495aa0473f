//! Error types shared by the API client and the pages.
//!
//! Every failure ends up as a short message in a toast or inline banner,
//! so each variant knows how to describe itself to an administrator.

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsoleError {
    /// The request never reached the server or the response never arrived
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    /// The response body was not the JSON we expected
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Input rejected before any network call
    #[error("{0}")]
    Validation(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl ConsoleError {
    /// Builds a server error from a failed response body, keeping the
    /// server-provided message when the body carries one.
    pub fn from_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
            error: Option<String>,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        ConsoleError::Server { status, message }
    }

    /// Message suitable for a toast: the server's own words when available,
    /// a generic sentence otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ConsoleError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            ConsoleError::Server { status: 401, .. } | ConsoleError::Server { status: 403, .. } => {
                "You are not authorized to perform this action".to_string()
            }
            ConsoleError::Server { .. } => "Something went wrong. Please try again".to_string(),
            ConsoleError::Network(_) => {
                "Could not reach the server. Check your connection and try again".to_string()
            }
            ConsoleError::Decode(_) => "The server sent an unexpected response".to_string(),
            ConsoleError::Validation(message) => message.clone(),
            ConsoleError::Storage(_) => "Browser storage is not available".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_preferred() {
        let error = ConsoleError::from_response(400, r#"{"message": "Screenshot is unreadable"}"#);
        assert_eq!(error.user_message(), "Screenshot is unreadable");
    }

    #[test]
    fn test_error_key_is_accepted() {
        let error = ConsoleError::from_response(409, r#"{"error": "Request already reviewed"}"#);
        assert_eq!(error.user_message(), "Request already reviewed");
    }

    #[test]
    fn test_generic_fallback_without_body_message() {
        let error = ConsoleError::from_response(500, "<html>oops</html>");
        assert_eq!(
            error,
            ConsoleError::Server {
                status: 500,
                message: None
            }
        );
        assert_eq!(error.user_message(), "Something went wrong. Please try again");
    }

    #[test]
    fn test_blank_server_message_is_ignored() {
        let error = ConsoleError::from_response(401, r#"{"message": "  "}"#);
        assert_eq!(
            error.user_message(),
            "You are not authorized to perform this action"
        );
    }

    #[test]
    fn test_network_error_never_leaks_details() {
        let error = ConsoleError::Network("TypeError: Failed to fetch".into());
        assert!(!error.user_message().contains("TypeError"));
        assert!(error.to_string().contains("Failed to fetch"));
    }
}
