//! Record references across tables
//!
//! A [`Reference`] names a single row as `table:id`. It is embedded in
//! `create`/`change` field maps to link records and rendered bare, so
//! SurrealDB stores it as a record link rather than a string.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::Result;

/// Reference to a row of another table
///
/// Formatting with a modifier returns `fmt::Error`, so `format!("{r:>10}")`
/// and `to_string()` with such a modifier panic. Use [`Reference::render`] for a
/// fallible rendering that reports [`Error::UnsupportedFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    table: String,
    record_id: String,
}

impl Reference {
    /// Create a reference to `record_id` in `table`.
    ///
    /// Neither part is validated.
    pub fn new(table: impl Into<String>, record_id: impl fmt::Display) -> Self {
        Self {
            table: table.into(),
            record_id: record_id.to_string(),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    /// Render with an explicit format spec.
    ///
    /// Only the empty spec is accepted.
    pub fn render(&self, spec: &str) -> Result<String> {
        if !spec.is_empty() {
            return Err(Error::UnsupportedFormat {
                spec: spec.to_string(),
            });
        }
        Ok(format!("{}:{}", self.table, self.record_id))
    }
}

fn has_modifiers(f: &fmt::Formatter<'_>) -> bool {
    f.width().is_some()
        || f.precision().is_some()
        || f.align().is_some()
        || f.sign_plus()
        || f.sign_minus()
        || f.alternate()
        || f.sign_aware_zero_pad()
}

/// Renders `table:record_id`.
///
/// Any modifier (`{:>10}`, `{:#}`, `{:.3}` ...) makes formatting fail.
impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if has_modifiers(f) {
            return Err(fmt::Error);
        }
        write!(f, "{}:{}", self.table, self.record_id)
    }
}

impl Serialize for Reference {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{}:{}", self.table, self.record_id))
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let (table, record_id) = raw
            .split_once(':')
            .ok_or_else(|| serde::de::Error::custom(format!("not a record id: {raw}")))?;
        Ok(Reference::new(table, record_id))
    }
}
