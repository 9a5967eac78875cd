//! Async SurrealDB client
//!
//! Every network operation suspends the calling task while the request is
//! in flight. Calls issued one after another by the same caller are sent in
//! order. Concurrent calls through `&self` share the transport's connection
//! pool and are not serialised.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::response;
use crate::session::Session;
use crate::statement::{self, Select, Verb};
use crate::transport::{HttpTransport, Transport};
use crate::value::Fields;
use crate::Result;

/// Async client for the SurrealDB `/sql` endpoint
///
/// The client owns its transport. Dropping it, including on an early return
/// or `?`, releases the underlying connections.
///
/// # Example
/// ```no_run
/// use surreal_http::{ClientConfig, Fields, SurrealClient};
///
/// # async fn run() -> surreal_http::Result<()> {
/// let db = SurrealClient::new(
///     ClientConfig::default()
///         .with_credentials("root", "root")
///         .with_namespace("test")
///         .with_database("test"),
/// )?;
///
/// db.create("users:1", &Fields::new().set("name", "John Doe").set("age", 42))
///     .await?;
/// let users = db.select("users").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SurrealClient<T: Transport = HttpTransport> {
    session: Session,
    transport: T,
}

impl SurrealClient<HttpTransport> {
    /// Create a client backed by `reqwest`
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client from `SURREALDB_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> SurrealClient<T> {
    /// Create a client on top of a custom transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "SurrealDB client created"
        );
        SurrealClient {
            session: Session::new(&config),
            transport,
        }
    }

    /// Current connection context
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Headers sent with the next request
    pub fn headers(&self) -> [(&'static str, &str); 3] {
        self.session.headers()
    }

    /// Sign in with new credentials.
    ///
    /// Nothing is sent; the credentials are checked by the next query.
    pub fn signin(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.session.set_credentials(username, password);
    }

    /// Sign up with new credentials. Behaves like [`signin`](Self::signin).
    pub fn signup(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.session.set_credentials(username, password);
    }

    /// Switch namespace and database for subsequent calls
    pub fn use_ns_db(&mut self, namespace: impl Into<String>, database: impl Into<String>) {
        self.session.use_ns_db(namespace, database);
        debug!(
            namespace = %self.session.namespace(),
            database = %self.session.database(),
            "Switched namespace/database"
        );
    }

    /// Execute a raw SurrealQL statement.
    ///
    /// Returns the rows of the first statement's result.
    #[instrument(
        skip_all,
        fields(namespace = %self.session.namespace(), database = %self.session.database())
    )]
    pub async fn query(&self, statement: &str) -> Result<Vec<Value>> {
        debug!(statement, "Executing SurrealQL");
        let response = self.transport.post(self.session.request(statement)).await?;
        response::classify(&response)
    }

    /// Execute a raw statement and deserialize every row into `R`
    pub async fn query_as<R: DeserializeOwned>(&self, statement: &str) -> Result<Vec<R>> {
        self.query(statement)
            .await?
            .into_iter()
            .map(|row| {
                serde_json::from_value(row).map_err(|e| Error::Deserialization(e.to_string()))
            })
            .collect()
    }

    /// Select all rows from a table or a single record
    pub async fn select(&self, target: &str) -> Result<Vec<Value>> {
        self.query(&statement::select(target, None, None)).await
    }

    /// Select with a projection, `WHERE` condition and/or `FETCH` clause
    pub async fn select_with(&self, target: &str, select: &Select) -> Result<Vec<Value>> {
        self.query(&select.build(target)).await
    }

    /// `CREATE {target} SET ...`
    ///
    /// Fails with [`Error::EmptyValues`] before sending anything when
    /// `fields` is empty.
    pub async fn create(&self, target: &str, fields: &Fields) -> Result<Vec<Value>> {
        let query = statement::create_or_update(Verb::Create, target, fields)?;
        self.query(&query).await
    }

    /// `UPDATE {target} SET ...`
    ///
    /// Fails with [`Error::EmptyValues`] before sending anything when
    /// `fields` is empty.
    pub async fn change(&self, target: &str, fields: &Fields) -> Result<Vec<Value>> {
        let query = statement::create_or_update(Verb::Update, target, fields)?;
        self.query(&query).await
    }

    /// Alias of [`change`](Self::change)
    pub async fn update(&self, target: &str, fields: &Fields) -> Result<Vec<Value>> {
        self.change(target, fields).await
    }

    /// Delete a record, a whole table, or the rows matching `condition`
    pub async fn delete(&self, target: &str, condition: Option<&str>) -> Result<Vec<Value>> {
        self.query(&statement::delete(target, condition)).await
    }

    /// Close the client and release its connections
    pub async fn close(self) -> Result<()> {
        self.transport.close().await?;
        info!("SurrealDB client closed");
        Ok(())
    }
}
