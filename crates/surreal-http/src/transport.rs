//! HTTP transport for the async client
//!
//! [`Transport`] is the seam between statement execution and the wire.
//! [`HttpTransport`] posts through a pooled `reqwest::Client`; tests swap in
//! [`crate::fakes::FakeTransport`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Error;
use crate::Result;

pub(crate) const USER_AGENT: &str = concat!("surreal-http/", env!("CARGO_PKG_VERSION"));

/// One POST to the SQL endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlRequest {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
    /// Raw SurrealQL, sent as-is
    pub body: String,
}

impl SqlRequest {
    /// Headers in wire order
    pub fn headers(&self) -> [(&'static str, &str); 3] {
        [
            ("Content-Type", "application/json"),
            ("NS", self.namespace.as_str()),
            ("DB", self.database.as_str()),
        ]
    }

    pub(crate) fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let context = [
            ("NS", HeaderName::from_static("ns"), &self.namespace),
            ("DB", HeaderName::from_static("db"), &self.database),
        ];
        for (name, header_name, value) in context {
            let header = HeaderValue::from_str(value).map_err(|_| Error::InvalidHeader {
                name,
                value: value.clone(),
            })?;
            headers.insert(header_name, header);
        }
        Ok(headers)
    }
}

/// Raw HTTP answer: status code and body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResponse {
    pub status: u16,
    pub body: String,
}

impl SqlResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        SqlResponse {
            status,
            body: body.into(),
        }
    }
}

/// Sends statements to the server without blocking the calling thread
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a single POST. Transport failures are returned as [`Error::Http`].
    async fn post(&self, request: SqlRequest) -> Result<SqlResponse>;

    /// Release held connections. Dropping the transport has the same effect.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// `reqwest`-backed async transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(HttpTransport {
            client: builder.build()?,
        })
    }

    /// Wrap an already configured client
    pub fn from_client(client: reqwest::Client) -> Self {
        HttpTransport { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: SqlRequest) -> Result<SqlResponse> {
        let headers = request.header_map()?;
        let response = self
            .client
            .post(&request.url)
            .headers(headers)
            .basic_auth(&request.username, Some(&request.password))
            .body(request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, bytes = body.len(), "SQL endpoint answered");
        Ok(SqlResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(namespace: &str, database: &str) -> SqlRequest {
        SqlRequest {
            url: "http://localhost:8000/sql".into(),
            namespace: namespace.into(),
            database: database.into(),
            username: String::new(),
            password: String::new(),
            body: "INFO FOR DB;".into(),
        }
    }

    #[test]
    fn header_map_carries_context() {
        let headers = request("test", "main").header_map().unwrap();
        assert_eq!(headers.get("content-type").unwrap(), "application/json");
        assert_eq!(headers.get("NS").unwrap(), "test");
        assert_eq!(headers.get("DB").unwrap(), "main");
    }

    #[test]
    fn empty_context_is_sent_as_empty_headers() {
        let headers = request("", "").header_map().unwrap();
        assert_eq!(headers.get("ns").unwrap(), "");
        assert_eq!(headers.get("db").unwrap(), "");
    }

    #[test]
    fn unencodable_namespace_is_rejected() {
        let err = request("bad\nns", "main").header_map().unwrap_err();
        assert!(matches!(err, Error::InvalidHeader { name: "NS", .. }));
    }

    #[test]
    fn user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("surreal-http/"));
    }
}
