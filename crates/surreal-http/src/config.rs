//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::Result;

/// Default SQL endpoint of a local SurrealDB instance
pub const DEFAULT_URL: &str = "http://localhost:8000/sql";

/// Connection settings shared by the async and blocking clients.
///
/// Everything is optional. Credentials, namespace and database can be set
/// later with `signin`/`signup` and `use_ns_db`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// SQL endpoint URL
    pub url: String,
    /// Basic auth username
    pub username: String,
    /// Basic auth password
    pub password: String,
    /// Value of the `NS` header
    pub namespace: String,
    /// Value of the `DB` header
    pub database: String,
    /// Request timeout in milliseconds; `None` keeps the HTTP client default.
    /// Zero is rejected by [`ClientConfig::validate`].
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            url: DEFAULT_URL.to_string(),
            username: String::new(),
            password: String::new(),
            namespace: String::new(),
            database: String::new(),
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Config pointing at `url`, everything else default
    pub fn new(url: impl Into<String>) -> Self {
        ClientConfig {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set basic auth credentials
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Set custom namespace
    pub fn with_namespace(mut self, ns: impl Into<String>) -> Self {
        self.namespace = ns.into();
        self
    }

    /// Set custom database
    pub fn with_database(mut self, db: impl Into<String>) -> Self {
        self.database = db.into();
        self
    }

    /// Set the SQL endpoint URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set a request timeout.
    ///
    /// Sub-millisecond remainders round up. A zero timeout would fail every
    /// request and is rejected.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        let millis = u64::try_from(timeout.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX);
        self.timeout_ms = Some(millis);
        Ok(self)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Check settings that can only be wrong at runtime, e.g. a
    /// deserialized `timeout_ms` of zero.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == Some(0) {
            return Err(Error::Config("timeout must be greater than zero".to_string()));
        }
        Ok(())
    }

    /// Create from environment variables
    ///
    /// Reads (all optional):
    /// - SURREALDB_URL (default: "http://localhost:8000/sql")
    /// - SURREALDB_USERNAME
    /// - SURREALDB_PASSWORD
    /// - SURREALDB_NAMESPACE
    /// - SURREALDB_DATABASE
    /// - SURREALDB_TIMEOUT_SECS
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = ClientConfig::default();
        let timeout_ms = match lookup("SURREALDB_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    Error::Config(format!("SURREALDB_TIMEOUT_SECS={raw:?}: {e}"))
                })?;
                if secs == 0 {
                    return Err(Error::Config(
                        "SURREALDB_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Some(secs.saturating_mul(1_000))
            }
            None => None,
        };

        Ok(ClientConfig {
            url: lookup("SURREALDB_URL").unwrap_or(defaults.url),
            username: lookup("SURREALDB_USERNAME").unwrap_or_default(),
            password: lookup("SURREALDB_PASSWORD").unwrap_or_default(),
            namespace: lookup("SURREALDB_NAMESPACE").unwrap_or_default(),
            database: lookup("SURREALDB_DATABASE").unwrap_or_default(),
            timeout_ms,
        })
    }
}
