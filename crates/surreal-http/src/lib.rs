//! Surreal-HTTP: SurrealDB client over the HTTP `/sql` endpoint
//!
//! Translates method calls into SurrealQL statements, posts them with the
//! `NS`/`DB` headers and basic auth, and classifies the JSON answer into
//! rows or typed errors.
//!
//! ## Key Components
//!
//! - `SurrealClient`: async client, suspends while a request is in flight
//! - `blocking::SurrealClient`: same operations, blocks the calling thread
//! - `statement`: pure SurrealQL builders shared by both clients
//! - `Reference`: `table:id` link embedded in field maps
//! - `fakes`: scripted in-memory transport for tests
//!
//! `WHERE` and `FETCH` fragments are passed through verbatim and string
//! values are quoted without escaping. Do not feed untrusted input into
//! either.

pub mod blocking;
mod client;
mod config;
mod error;
pub mod fakes;
mod reference;
pub mod response;
mod session;
pub mod statement;
pub mod transport;
mod value;

pub use client::SurrealClient;
pub use config::{ClientConfig, DEFAULT_URL};
pub use error::Error;
pub use reference::Reference;
pub use session::{Credentials, Session};
pub use statement::{Select, Verb};
pub use transport::{HttpTransport, SqlRequest, SqlResponse, Transport};
pub use value::{FieldValue, Fields};

/// Crate version, as published
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for surreal-http operations
pub type Result<T> = std::result::Result<T, Error>;
