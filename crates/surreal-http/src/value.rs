//! Field values for `CREATE ... SET` and `UPDATE ... SET` statements

use std::fmt;

use serde_json::Value;

use crate::error::Error;
use crate::reference::Reference;
use crate::Result;

/// Value assigned to a field in a `SET` clause
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Any JSON-compatible value
    Json(Value),
    /// Link to another record, rendered bare as `table:id`
    Reference(Reference),
}

impl FieldValue {
    /// SurrealQL literal for this value.
    ///
    /// Strings are wrapped in single quotes without escaping. Everything else
    /// is written in its natural textual form. JSON has no NaN or infinity,
    /// so such floats convert to `Json(Null)` and render as `null`.
    pub fn to_literal(&self) -> String {
        match self {
            FieldValue::Json(Value::String(s)) => format!("'{s}'"),
            FieldValue::Json(other) => other.to_string(),
            FieldValue::Reference(r) => format!("{}:{}", r.table(), r.record_id()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

impl From<Reference> for FieldValue {
    fn from(r: Reference) -> Self {
        FieldValue::Reference(r)
    }
}

impl From<Value> for FieldValue {
    fn from(v: Value) -> Self {
        FieldValue::Json(v)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Json(Value::String(s.to_string()))
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Json(Value::String(s))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Json(Value::Bool(b))
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for FieldValue {
                fn from(n: $t) -> Self {
                    FieldValue::Json(Value::from(n))
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, u8, u16, u32, u64, f32, f64);

/// Ordered field assignments for a `SET` clause.
///
/// Order is the order of insertion; it only changes statement layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: Vec<(String, FieldValue)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, builder style.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a field in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Fields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

/// Builds [`Fields`] from a JSON object, in the object's iteration order.
///
/// Any other value is returned inside [`Error::InvalidFields`].
impl TryFrom<Value> for Fields {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(Error::InvalidFields(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_literals_are_quoted() {
        assert_eq!(FieldValue::from("Education").to_literal(), "'Education'");
        assert_eq!(FieldValue::from(String::from("x")).to_literal(), "'x'");
    }

    #[test]
    fn non_string_literals_are_bare() {
        assert_eq!(FieldValue::from(1).to_literal(), "1");
        assert_eq!(FieldValue::from(2.5).to_literal(), "2.5");
        assert_eq!(FieldValue::from(true).to_literal(), "true");
        assert_eq!(FieldValue::from(Value::Null).to_literal(), "null");
        assert_eq!(FieldValue::from(json!([1, 2])).to_literal(), "[1,2]");
        assert_eq!(
            FieldValue::from(Reference::new("category", "education")).to_literal(),
            "category:education"
        );
    }

    #[test]
    fn embedded_quotes_are_not_escaped() {
        assert_eq!(FieldValue::from("it's").to_literal(), "'it's'");
    }

    #[test]
    fn fields_keep_insertion_order() {
        let fields = Fields::new().set("b", 1).set("a", 2).set("c", 3);
        let keys: Vec<&str> = fields.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn fields_from_json_object() {
        let fields = Fields::try_from(json!({"name": "test"})).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.iter().next().unwrap().1.to_literal(), "'test'");
    }

    #[test]
    fn fields_from_non_object_is_rejected() {
        let err = Fields::try_from(json!("scalar")).unwrap_err();
        assert!(matches!(err, Error::InvalidFields(ref v) if v == "scalar"));
        assert!(err.is_local());
        assert!(Fields::try_from(json!([["name", "test"]])).is_err());
    }

    #[test]
    fn non_finite_floats_render_as_null() {
        assert_eq!(FieldValue::from(f64::NAN).to_literal(), "null");
        assert_eq!(FieldValue::from(f64::INFINITY).to_literal(), "null");
        assert_eq!(FieldValue::from(f32::NEG_INFINITY), FieldValue::Json(Value::Null));
    }
}
