//! Error taxonomy for the session guard and the REST client.
//!
//! ERROR HANDLING
//! ==============
//! Authentication-affecting errors ([`AuthError`]) always clear the token
//! store (fail closed). Data-load errors never clear the token or navigate
//! (fail soft); they only surface as a warning toast.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;

/// Why the current session is not authenticated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Neither durable storage nor the cookie holds a token.
    #[error("no session token")]
    NoToken,
    /// The backend answered the validation call with a non-success status.
    #[error("session token rejected")]
    InvalidToken,
    /// The validation call did not settle within its bound.
    #[error("token validation timed out")]
    ValidationTimeout,
    /// The validation call failed at the transport level.
    #[error("token validation failed: {0}")]
    ValidationNetwork(String),
}

/// Failure of a single REST call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },
    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl ApiError {
    /// Build a [`ApiError::Status`] from a non-success response, lifting the
    /// server's `{message}` field when the body carries one.
    #[must_use]
    pub fn from_error_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty());
        Self::Status { status, message }
    }

    /// The server-provided message, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Everything the redirect controller can observe while guarding a page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    /// A non-auth endpoint failed after authentication succeeded.
    #[error("failed to load {resource}: {source}")]
    DataLoad { resource: &'static str, source: ApiError },
    /// Page setup failed for a reason unrelated to authentication.
    #[error("initialization failed: {0}")]
    Initialization(String),
}

impl SessionError {
    #[must_use]
    pub fn is_auth_timeout(&self) -> bool {
        matches!(self, Self::Auth(AuthError::ValidationTimeout))
    }
}

/// Storage or cookie access failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("storage unavailable: {0}")]
pub struct StorageError(pub String);

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be an absolute path, got '{value}'")]
    RelativePath { key: &'static str, value: String },
}
