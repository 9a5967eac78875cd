//! In-memory transport fake (testing only)
//!
//! [`FakeTransport`] implements both [`Transport`] and [`BlockingTransport`].
//! It answers from a script of canned responses and records every request.
//! Clones share state, so a test can keep one handle while the client owns
//! another.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::blocking::BlockingTransport;
use crate::error::Error;
use crate::transport::{SqlRequest, SqlResponse, Transport};
use crate::Result;

#[derive(Debug, Default)]
struct FakeState {
    queued: VecDeque<SqlResponse>,
    fallback: Option<SqlResponse>,
    requests: Vec<SqlRequest>,
    closed: bool,
}

/// Scripted transport recording all requests
#[derive(Debug, Clone, Default)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    /// Fake with no script; every post fails with [`Error::Http`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fake answering every request with `status` and `body`
    pub fn responding(status: u16, body: impl Into<String>) -> Self {
        let fake = Self::new();
        fake.state().fallback = Some(SqlResponse::new(status, body));
        fake
    }

    /// Fake answering every request with `status` and a JSON body
    pub fn responding_json(status: u16, body: Value) -> Self {
        Self::responding(status, body.to_string())
    }

    /// Fake answering every request with a successful statement result
    pub fn ok(rows: Value) -> Self {
        Self::responding_json(200, json!([{"status": "OK", "time": "1ms", "result": rows}]))
    }

    /// Queue a response served before the fallback
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        self.state().queued.push_back(SqlResponse::new(status, body));
    }

    /// Number of posts seen so far
    pub fn call_count(&self) -> usize {
        self.state().requests.len()
    }

    /// All requests seen so far, oldest first
    pub fn requests(&self) -> Vec<SqlRequest> {
        self.state().requests.clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<SqlRequest> {
        self.state().requests.last().cloned()
    }

    /// Whether `close` was called
    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    /// True once every other handle (e.g. the one owned by a client) is dropped
    pub fn is_released(&self) -> bool {
        Arc::strong_count(&self.state) == 1
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        // A panicking test thread must not hide the recorded requests.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn answer(&self, request: SqlRequest) -> Result<SqlResponse> {
        let mut state = self.state();
        if state.closed {
            return Err(Error::Http("transport is closed".to_string()));
        }
        state.requests.push(request);
        state
            .queued
            .pop_front()
            .or_else(|| state.fallback.clone())
            .ok_or_else(|| Error::Http("no scripted response".to_string()))
    }

    fn mark_closed(&self) {
        self.state().closed = true;
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn post(&self, request: SqlRequest) -> Result<SqlResponse> {
        self.answer(request)
    }

    async fn close(&self) -> Result<()> {
        self.mark_closed();
        Ok(())
    }
}

impl BlockingTransport for FakeTransport {
    fn post(&self, request: SqlRequest) -> Result<SqlResponse> {
        self.answer(request)
    }

    fn close(&self) -> Result<()> {
        self.mark_closed();
        Ok(())
    }
}
