//! Error types for surreal-http

use serde_json::Value;
use thiserror::Error;

/// Errors returned by the SurrealDB HTTP clients
#[derive(Error, Debug)]
pub enum Error {
    /// `create`/`change` was called without any field to set.
    ///
    /// Raised locally, before any request is sent.
    #[error("Must set at least one value")]
    EmptyValues,

    /// The server answered with HTTP 403
    #[error("Authentication failed: {0}")]
    Authentication(Value),

    /// Any other non-successful response, including malformed success bodies
    #[error("Query failed: {0}")]
    Query(Value),

    /// A [`Reference`](crate::Reference) was rendered with a format modifier
    #[error("Format specifiers are not supported: {spec:?}")]
    UnsupportedFormat {
        /// The rejected modifier
        spec: String,
    },

    /// Namespace or database cannot be sent as an HTTP header value
    #[error("Invalid header value for {name}: {value:?}")]
    InvalidHeader {
        /// Header name
        name: &'static str,
        /// Offending value
        value: String,
    },

    /// A JSON value other than an object was converted into [`Fields`](crate::Fields)
    #[error("Fields must be built from a JSON object, got: {0}")]
    InvalidFields(Value),

    /// A result row did not match the requested type
    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Transport-level failure reported by the HTTP client
    #[error("HTTP error: {0}")]
    Http(String),
}

impl Error {
    /// Server payload carried by `Authentication` and `Query` errors.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Error::Authentication(payload) | Error::Query(payload) => Some(payload),
            _ => None,
        }
    }

    /// True for errors raised before anything was sent over the wire.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::EmptyValues
                | Error::UnsupportedFormat { .. }
                | Error::InvalidHeader { .. }
                | Error::InvalidFields(_)
                | Error::Config(_)
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}
