//! Error handling for the news portal client

use std::fmt;
use thiserror::Error;

/// Unified error type for the news portal client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// JWT decoding errors
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// The API answered with a non-success status
    #[error("API error: {status}")]
    Api {
        /// HTTP status code
        status: u16,
        /// The `message` field of the response body, if any
        message: Option<String>,
    },

    /// A successful login response carried no token
    #[error("Login response did not include a token")]
    MissingToken {
        /// The `message` field of the response body, if any
        message: Option<String>,
    },

    /// Token storage errors
    #[error("Storage error: {0}")]
    Store(String),

    /// Filesystem errors from file-backed storage
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request of the same kind is still pending
    #[error("A request is already in flight")]
    RequestInFlight,
}

impl Error {
    /// Create a new storage error
    pub fn store<T: fmt::Display>(msg: T) -> Self {
        Error::Store(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// The message reported by the API, when this is an API error carrying one
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } | Error::MissingToken { message } => message.as_deref(),
            _ => None,
        }
    }

    /// Whether the request never produced an HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(e) if !e.is_decode() && e.status().is_none())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
