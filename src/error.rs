//! Error types and handling for the `Tripcast` service

use serde_json::Value;
use thiserror::Error;

/// Main error type for the `Tripcast` service
#[derive(Error, Debug)]
pub enum TripcastError {
    /// Configuration-related errors, including missing credentials
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// A looked-up resource does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// A remote service answered with a non-success status
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        status: u16,
        message: String,
        /// Response body as sent by the remote service, when it was JSON
        body: Option<Value>,
    },

    /// Transport-level API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Unparseable remote payloads
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TripcastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(status: u16, message: S, body: Option<Value>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
            body,
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// HTTP status code this error maps to at the endpoint boundary
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            TripcastError::Validation { .. } => 400,
            TripcastError::NotFound { .. } => 404,
            TripcastError::Upstream { status, .. } => *status,
            TripcastError::Config { .. }
            | TripcastError::Api { .. }
            | TripcastError::Parse { .. }
            | TripcastError::General { .. } => 500,
        }
    }

    /// True for credential or plan failures reported by a remote service
    #[must_use]
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            TripcastError::Upstream {
                status: 401 | 403,
                ..
            }
        )
    }

    /// Get the message shown to API clients
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripcastError::Config { message }
            | TripcastError::Validation { message }
            | TripcastError::NotFound { message }
            | TripcastError::Upstream { message, .. }
            | TripcastError::Api { message }
            | TripcastError::Parse { message }
            | TripcastError::General { message } => message.clone(),
        }
    }
}

impl From<reqwest::Error> for TripcastError {
    fn from(err: reqwest::Error) -> Self {
        TripcastError::api(err.to_string())
    }
}
