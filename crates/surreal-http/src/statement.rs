//! SurrealQL statement builder
//!
//! Pure functions shared by the async and blocking clients. Every statement
//! ends with a single `;`.
//!
//! `WHERE` and `FETCH` fragments are inserted verbatim. Callers are
//! responsible for what they pass in; nothing here escapes or validates them.

use crate::error::Error;
use crate::value::Fields;
use crate::Result;

/// Statement verb for `SET`-style writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Create,
    Update,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Create => "CREATE",
            Verb::Update => "UPDATE",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a `SELECT` statement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Select {
    /// Projection; empty means `*`
    pub fields: Vec<String>,
    /// Raw condition placed after `WHERE`
    pub condition: Option<String>,
    /// Raw list placed after `FETCH`
    pub fetch: Option<String>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn fetch(mut self, fetch: impl Into<String>) -> Self {
        self.fetch = Some(fetch.into());
        self
    }

    /// Render against `target`.
    pub fn build(&self, target: &str) -> String {
        let projection = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(", ")
        };
        let mut query = format!("SELECT {projection} FROM {target}");
        if let Some(condition) = non_empty(self.condition.as_deref()) {
            query.push_str(" WHERE ");
            query.push_str(condition);
        }
        if let Some(fetch) = non_empty(self.fetch.as_deref()) {
            query.push_str(" FETCH ");
            query.push_str(fetch);
        }
        query.push(';');
        query
    }
}

fn non_empty(fragment: Option<&str>) -> Option<&str> {
    fragment.filter(|s| !s.is_empty())
}

/// `CREATE`/`UPDATE {target} SET k = v, ...;`
///
/// Fails with [`Error::EmptyValues`] when `fields` is empty.
pub fn create_or_update(verb: Verb, target: &str, fields: &Fields) -> Result<String> {
    if fields.is_empty() {
        return Err(Error::EmptyValues);
    }

    let assignments = fields
        .iter()
        .map(|(key, value)| format!("{key} = {}", value.to_literal()))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("{verb} {target} SET {assignments};"))
}

/// `SELECT * FROM {target} [WHERE ..] [FETCH ..];`
pub fn select(target: &str, condition: Option<&str>, fetch: Option<&str>) -> String {
    Select {
        fields: Vec::new(),
        condition: condition.map(str::to_string),
        fetch: fetch.map(str::to_string),
    }
    .build(target)
}

/// `DELETE {target} [WHERE ..];`
pub fn delete(target: &str, condition: Option<&str>) -> String {
    let mut query = format!("DELETE {target} ");
    if let Some(condition) = non_empty(condition) {
        query.push_str("WHERE ");
        query.push_str(condition);
    }
    query.push(';');
    query
}
