//! Document values.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::{ModelError, Result};
use crate::numeric::is_numeric;

/// Largest integer an f64 holds exactly (2^53 - 1).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

/// A single value inside a configuration document.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Only produced for the drivetrain's module list or read from imports.
    List(Vec<Value>),
    Nested(Document),
}

impl Value {
    /// Short type label used in diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::List(_) => "array",
            Self::Nested(_) => "object",
        }
    }

    /// Boolean coercion used for checkbox state.
    ///
    /// `null`, `false`, zero, NaN and empty text are false; everything else,
    /// including empty lists and documents, is true.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(flag) => *flag,
            Self::Number(number) => *number != 0.0 && !number.is_nan(),
            Self::Text(text) => !text.is_empty(),
            Self::List(_) | Self::Nested(_) => true,
        }
    }

    /// True only for text that would coerce to a number. Values that are
    /// already numbers are not numeric *text*.
    #[must_use]
    pub fn is_numeric_text(&self) -> bool {
        matches!(self, Self::Text(text) if is_numeric(text))
    }

    /// Text written into a form input for this value (`null` is empty,
    /// containers as compact JSON).
    #[must_use]
    pub fn to_field_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(flag) => flag.to_string(),
            Self::Number(number) => format_number(*number),
            Self::Text(text) => text.clone(),
            Self::List(_) | Self::Nested(_) => serde_json::to_string(self).unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Self::Nested(document) => Some(document),
            _ => None,
        }
    }
}

fn is_exact_integer(number: f64) -> bool {
    number.fract() == 0.0 && number.abs() <= MAX_EXACT_INTEGER
}

/// Format a number the way it is shown in a form input: integers without a
/// fractional part, negative zero as `0`.
fn format_number(number: f64) -> String {
    if is_exact_integer(number) {
        format!("{}", number as i64)
    } else {
        format!("{number}")
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Self::Nested(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(flag) => Self::Bool(flag),
            serde_json::Value::Number(number) => number.as_f64().map_or(Self::Null, Self::Number),
            serde_json::Value::String(text) => Self::Text(text),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(map) => Self::Nested(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(flag) => serializer.serialize_bool(*flag),
            Self::Number(number) if is_exact_integer(*number) => {
                serializer.serialize_i64(*number as i64)
            }
            Self::Number(number) => serializer.serialize_f64(*number),
            Self::Text(text) => serializer.serialize_str(text),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Nested(document) => document.serialize(serializer),
        }
    }
}

/// Insertion-ordered mapping from key to value; one configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: IndexMap<String, Value>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse document text. The root must be a JSON object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        match Value::from(value) {
            Value::Nested(document) => Ok(document),
            other => Err(ModelError::NotAnObject(other.type_name())),
        }
    }

    /// Serialize with two-space indentation.
    pub fn to_json_text(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Follow a chain of keys through nested documents.
    #[must_use]
    pub fn get_path(&self, keys: &[&str]) -> Option<&Value> {
        let (last, parents) = keys.split_last()?;
        let mut current = self;
        for key in parents {
            current = current.get(key)?.as_document()?;
        }
        current.get(last)
    }

    /// Insert or replace a value. Existing keys keep their position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Nested document under `key`, created on first use. A non-document
    /// value already stored there is replaced.
    pub fn group_mut(&mut self, key: &str) -> &mut Document {
        let slot = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Value::Nested(Document::new()));
        if !matches!(slot, Value::Nested(_)) {
            *slot = Value::Nested(Document::new());
        }
        match slot {
            Value::Nested(document) => document,
            _ => unreachable!("slot was just set to a nested document"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Value)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_serialize_without_fraction() {
        let mut doc = Document::new();
        doc.insert("a", 5.0);
        doc.insert("b", 0.5);
        doc.insert("c", -0.0);
        assert_eq!(
            serde_json::to_string(&doc).unwrap(),
            r#"{"a":5,"b":0.5,"c":0}"#
        );
    }

    #[test]
    fn pretty_text_uses_two_space_indent() {
        let mut doc = Document::new();
        doc.group_mut("drive").insert("id", 3.0);
        doc.insert("empty", Value::Null);
        insta::assert_snapshot!(doc.to_json_text().unwrap(), @r#"
        {
          "drive": {
            "id": 3
          },
          "empty": null
        }
        "#);
    }

    #[test]
    fn keys_keep_insertion_order() {
        let mut doc = Document::new();
        doc.insert("zeta", 1.0);
        doc.insert("alpha", 2.0);
        doc.insert("zeta", 3.0);
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(doc.get("zeta"), Some(&Value::Number(3.0)));
    }

    #[test]
    fn group_mut_replaces_scalar() {
        let mut doc = Document::new();
        doc.insert("drive", "x");
        doc.group_mut("drive").insert("id", 1.0);
        assert_eq!(doc.get_path(&["drive", "id"]), Some(&Value::Number(1.0)));
    }

    #[test]
    fn root_must_be_object() {
        assert!(matches!(
            Document::from_json_str("[1, 2]"),
            Err(ModelError::NotAnObject("array"))
        ));
        assert!(matches!(
            Document::from_json_str("{\"a\": "),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Text(String::new()).is_truthy());
        assert!(Value::Text("false".to_string()).is_truthy());
        assert!(Value::Number(-1.0).is_truthy());
        assert!(Value::Bool(true).is_truthy());
    }

    #[test]
    fn field_text() {
        assert_eq!(Value::Number(6.75).to_field_text(), "6.75");
        assert_eq!(Value::Number(12.0).to_field_text(), "12");
        assert_eq!(Value::Null.to_field_text(), "");
        assert_eq!(Value::Bool(false).to_field_text(), "false");
    }

    #[test]
    fn numeric_text_requires_string() {
        assert!(Value::Text("3.14".to_string()).is_numeric_text());
        assert!(!Value::Number(42.0).is_numeric_text());
        assert!(!Value::Text("12abc".to_string()).is_numeric_text());
    }
}
