//! Dynamic property records
//!
//! Argument descriptors and connectors address props by name, so props are a
//! string-keyed record of JSON values rather than a fixed struct. Typed prop
//! structs convert in through [`Props::from_serialize`].
//!
//! A key that is missing and a key holding `null` are treated the same way:
//! both are *absent* for readiness checks, and both resolve to `null` when used
//! as an action argument.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Errors from building [`Props`] out of arbitrary values.
#[derive(Debug, thiserror::Error)]
pub enum PropsError {
    /// The value serialized to something other than a JSON object.
    #[error("props must be an object, got {kind}")]
    NotAnObject { kind: &'static str },
    /// The value could not be serialized at all.
    #[error("failed to serialize props: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A string-keyed property record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props {
    values: Map<String, Value>,
}

impl Props {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build props from any serializable struct or map.
    ///
    /// # Example
    /// ```
    /// use dispatch_gate_core::Props;
    ///
    /// #[derive(serde::Serialize)]
    /// struct TodoProps {
    ///     show_todos: bool,
    /// }
    ///
    /// let props = Props::from_serialize(&TodoProps { show_todos: true }).unwrap();
    /// assert_eq!(props.get("show_todos"), Some(&serde_json::json!(true)));
    /// ```
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, PropsError> {
        Self::try_from(serde_json::to_value(value)?)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Insert a value, returning the previous one for that key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    /// Remove a key, returning its value if it was set.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Get the raw value for a key. `null` is returned as `Some(&Value::Null)`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Get a value as a string slice, if it is one.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Look up a key for use as an argument value. Absent keys resolve to `null`.
    pub fn lookup(&self, key: &str) -> Value {
        self.get(key).cloned().unwrap_or(Value::Null)
    }

    /// Whether the key exists and holds something other than `null`.
    pub fn is_present(&self, key: &str) -> bool {
        !matches!(self.get(key), None | Some(Value::Null))
    }

    /// Whether the key exists at all, even if it holds `null`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Number of keys, `null` entries included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the record has no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Iterate over keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    /// Spread a connected value over this record, object-spread style.
    ///
    /// - objects copy each entry, overwriting existing keys
    /// - arrays copy each element under its index (`"0"`, `"1"`, ...)
    /// - strings copy each `char` under its index; indices count Unicode
    ///   scalar values, so an astral character such as an emoji takes one key
    ///   where a UTF-16 split would take two
    /// - `null`, booleans and numbers contribute nothing
    pub fn spread(&mut self, value: Value) {
        match value {
            Value::Object(map) => self.values.extend(map),
            Value::Array(items) => {
                for (index, item) in items.into_iter().enumerate() {
                    self.values.insert(index.to_string(), item);
                }
            }
            Value::String(s) => {
                for (index, ch) in s.chars().enumerate() {
                    self.values
                        .insert(index.to_string(), Value::String(ch.to_string()));
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => {}
        }
    }

    /// Shallow union of `props` and `connected`; connected entries win.
    ///
    /// # Example
    /// ```
    /// use dispatch_gate_core::Props;
    /// use serde_json::json;
    ///
    /// let props = Props::new().with("name", "incoming").with("page", 1);
    /// let merged = Props::merged(&props, json!({ "name": "connected" }));
    ///
    /// assert_eq!(merged.get_str("name"), Some("connected"));
    /// assert_eq!(merged.get("page"), Some(&json!(1)));
    /// assert_eq!(props.get_str("name"), Some("incoming"));
    /// ```
    pub fn merged(props: &Props, connected: Value) -> Props {
        let mut merged = props.clone();
        merged.spread(connected);
        merged
    }

    /// Consume the record, returning the underlying map.
    pub fn into_inner(self) -> Map<String, Value> {
        self.values
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl TryFrom<Value> for Props {
    type Error = PropsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(PropsError::NotAnObject {
                kind: kind_of(&other),
            }),
        }
    }
}

impl From<Map<String, Value>> for Props {
    fn from(values: Map<String, Value>) -> Self {
        Self { values }
    }
}

impl From<Props> for Value {
    fn from(props: Props) -> Self {
        Value::Object(props.values)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
