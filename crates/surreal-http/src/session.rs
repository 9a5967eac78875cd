//! Connection context shared by both client flavours
//!
//! Holds the endpoint, the `NS`/`DB` header values and the basic auth
//! credentials. Each call snapshots it into an owned [`SqlRequest`], so later
//! changes never reach a request that is already built.

use crate::config::ClientConfig;
use crate::transport::SqlRequest;

/// Basic auth credentials
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Mutable connection context of a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    url: String,
    namespace: String,
    database: String,
    credentials: Credentials,
}

impl Session {
    pub fn new(config: &ClientConfig) -> Self {
        Session {
            url: config.url.clone(),
            namespace: config.namespace.clone(),
            database: config.database.clone(),
            credentials: Credentials {
                username: config.username.clone(),
                password: config.password.clone(),
            },
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Replace the stored credentials
    pub fn set_credentials(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.credentials = Credentials {
            username: username.into(),
            password: password.into(),
        };
    }

    /// Replace namespace and database
    pub fn use_ns_db(&mut self, namespace: impl Into<String>, database: impl Into<String>) {
        self.namespace = namespace.into();
        self.database = database.into();
    }

    /// Headers sent with every request, in wire order
    pub fn headers(&self) -> [(&'static str, &str); 3] {
        [
            ("Content-Type", "application/json"),
            ("NS", self.namespace.as_str()),
            ("DB", self.database.as_str()),
        ]
    }

    /// Snapshot the context into a request carrying `statement`
    pub fn request(&self, statement: impl Into<String>) -> SqlRequest {
        SqlRequest {
            url: self.url.clone(),
            namespace: self.namespace.clone(),
            database: self.database.clone(),
            username: self.credentials.username.clone(),
            password: self.credentials.password.clone(),
            body: statement.into(),
        }
    }
}
