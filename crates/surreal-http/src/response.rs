//! Response classification
//!
//! Turns a raw [`SqlResponse`] into result rows or a typed error. Shared by
//! both clients.
//!
//! The endpoint answers with a JSON array holding one entry per statement:
//! `[{"status": "OK", "time": "...", "result": [...]}]`. Only the first entry
//! is inspected.

use serde_json::Value;
use tracing::warn;

use crate::error::Error;
use crate::transport::SqlResponse;
use crate::Result;

const STATUS_OK: u16 = 200;
const STATUS_FORBIDDEN: u16 = 403;

/// Decoded body, or the raw text as a JSON string when it is not JSON
fn payload(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

/// Result rows of the first statement, if it succeeded
fn first_ok_result(decoded: &Value) -> Option<Vec<Value>> {
    let first = decoded.as_array()?.first()?;
    if first.get("status").and_then(Value::as_str) != Some("OK") {
        return None;
    }
    Some(match first.get("result") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(rows)) => rows.clone(),
        Some(single) => vec![single.clone()],
    })
}

/// Classify a response.
///
/// - 200 with a first entry whose `status` is `"OK"`: its `result` rows
///   (empty when absent; a non-array result becomes a single row)
/// - 403: [`Error::Authentication`]
/// - anything else, including 200 with a non-OK or malformed body:
///   [`Error::Query`]
pub fn classify(response: &SqlResponse) -> Result<Vec<Value>> {
    let body = payload(&response.body);

    match response.status {
        STATUS_OK => match first_ok_result(&body) {
            Some(rows) => Ok(rows),
            None => {
                warn!("Statement did not succeed");
                Err(Error::Query(body))
            }
        },
        STATUS_FORBIDDEN => {
            warn!("SurrealDB rejected the credentials");
            Err(Error::Authentication(body))
        }
        status => {
            warn!(status, "SQL endpoint returned an error status");
            Err(Error::Query(body))
        }
    }
}
