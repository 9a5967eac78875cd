//! Blocking SurrealDB client
//!
//! Same operations as [`crate::SurrealClient`], but each call occupies the
//! calling thread until the round trip completes. Statement building and
//! response classification are shared with the async client.
//!
//! Do not create or drop a [`BlockingHttpTransport`] from inside an async
//! runtime; `reqwest::blocking` panics there.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::Error;
use crate::response;
use crate::session::Session;
use crate::statement::{self, Select, Verb};
use crate::transport::{SqlRequest, SqlResponse, USER_AGENT};
use crate::value::Fields;
use crate::Result;

/// Sends statements to the server, blocking the calling thread
pub trait BlockingTransport: Send + Sync {
    /// Issue a single POST. Transport failures are returned as [`Error::Http`].
    fn post(&self, request: SqlRequest) -> Result<SqlResponse>;

    /// Release held connections. Dropping the transport has the same effect.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// `reqwest::blocking`-backed transport
#[derive(Debug, Clone)]
pub struct BlockingHttpTransport {
    client: reqwest::blocking::Client,
}

impl BlockingHttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(BlockingHttpTransport {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured client
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        BlockingHttpTransport { client }
    }
}

impl BlockingTransport for BlockingHttpTransport {
    fn post(&self, request: SqlRequest) -> Result<SqlResponse> {
        let headers = request.header_map()?;
        let response = self
            .client
            .post(&request.url)
            .headers(headers)
            .basic_auth(&request.username, Some(&request.password))
            .body(request.body)
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;
        debug!(status, bytes = body.len(), "SQL endpoint answered");
        Ok(SqlResponse { status, body })
    }
}

/// Blocking client for the SurrealDB `/sql` endpoint
///
/// Dropping the client releases its connections, on every exit path.
#[derive(Debug)]
pub struct SurrealClient<T: BlockingTransport = BlockingHttpTransport> {
    session: Session,
    transport: T,
}

impl SurrealClient<BlockingHttpTransport> {
    /// Create a client backed by `reqwest::blocking`
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = BlockingHttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client from `SURREALDB_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: BlockingTransport> SurrealClient<T> {
    /// Create a client on top of a custom transport
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "SurrealDB blocking client created"
        );
        SurrealClient {
            session: Session::new(&config),
            transport,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn headers(&self) -> [(&'static str, &str); 3] {
        self.session.headers()
    }

    /// Replace credentials; checked lazily by the next query
    pub fn signin(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.session.set_credentials(username, password);
    }

    pub fn signup(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.session.set_credentials(username, password);
    }

    pub fn use_ns_db(&mut self, namespace: impl Into<String>, database: impl Into<String>) {
        self.session.use_ns_db(namespace, database);
        debug!(
            namespace = %self.session.namespace(),
            database = %self.session.database(),
            "Switched namespace/database"
        );
    }

    /// Execute a raw SurrealQL statement
    #[instrument(
        skip_all,
        fields(namespace = %self.session.namespace(), database = %self.session.database())
    )]
    pub fn query(&self, statement: &str) -> Result<Vec<Value>> {
        debug!(statement, "Executing SurrealQL");
        let response = self.transport.post(self.session.request(statement))?;
        response::classify(&response)
    }

    pub fn query_as<R: DeserializeOwned>(&self, statement: &str) -> Result<Vec<R>> {
        self.query(statement)?
            .into_iter()
            .map(|row| {
                serde_json::from_value(row).map_err(|e| Error::Deserialization(e.to_string()))
            })
            .collect()
    }

    pub fn select(&self, target: &str) -> Result<Vec<Value>> {
        self.query(&statement::select(target, None, None))
    }

    pub fn select_with(&self, target: &str, select: &Select) -> Result<Vec<Value>> {
        self.query(&select.build(target))
    }

    /// `CREATE {target} SET ...`; empty `fields` fail without a request
    pub fn create(&self, target: &str, fields: &Fields) -> Result<Vec<Value>> {
        let query = statement::create_or_update(Verb::Create, target, fields)?;
        self.query(&query)
    }

    /// `UPDATE {target} SET ...`; empty `fields` fail without a request
    pub fn change(&self, target: &str, fields: &Fields) -> Result<Vec<Value>> {
        let query = statement::create_or_update(Verb::Update, target, fields)?;
        self.query(&query)
    }

    pub fn update(&self, target: &str, fields: &Fields) -> Result<Vec<Value>> {
        self.change(target, fields)
    }

    pub fn delete(&self, target: &str, condition: Option<&str>) -> Result<Vec<Value>> {
        self.query(&statement::delete(target, condition))
    }

    /// Close the client and release its connections
    pub fn close(self) -> Result<()> {
        self.transport.close()?;
        info!("SurrealDB blocking client closed");
        Ok(())
    }
}
