//! JSON value types.
//!
//! `JsonValue` is the universal in-memory representation produced by
//! parsing and consumed when serializing pure JSON data. Objects preserve
//! insertion order (`IndexMap`), array order is preserved, and numbers are
//! double-precision floats.

use std::fmt;

use indexmap::IndexMap;

/// Ordered object map used by [`JsonValue::Object`].
pub type JsonMap = IndexMap<String, JsonValue>;

/// A dynamic JSON value.
///
/// All variants implement structural equality. Object keys are unique;
/// re-inserting a key keeps its original position and replaces the value,
/// which gives duplicate keys in parsed input last-write-wins semantics.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean (true/false)
    Bool(bool),
    /// JSON number as a double-precision float
    Number(f64),
    /// JSON string with all escapes resolved
    String(String),
    /// JSON array of values
    Array(Vec<JsonValue>),
    /// JSON object with insertion-ordered keys
    Object(JsonMap),
}

impl JsonValue {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    /// Returns true if this is a number value.
    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns the boolean value if this is a Bool, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number value if this is a Number, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the array if this is an Array, None otherwise.
    pub fn as_array(&self) -> Option<&Vec<JsonValue>> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns a reference to the object if this is an Object, None otherwise.
    pub fn as_object(&self) -> Option<&JsonMap> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a value from an object by key.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        match self {
            JsonValue::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        match self {
            JsonValue::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

impl From<f64> for JsonValue {
    fn from(n: f64) -> Self {
        JsonValue::Number(n)
    }
}

impl From<i64> for JsonValue {
    fn from(n: i64) -> Self {
        JsonValue::Number(n as f64)
    }
}

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(arr: Vec<JsonValue>) -> Self {
        JsonValue::Array(arr)
    }
}

impl From<JsonMap> for JsonValue {
    fn from(map: JsonMap) -> Self {
        JsonValue::Object(map)
    }
}

/// Compact JSON rendering. A `JsonValue` is always a finite tree, so this
/// cannot fail or cycle; non-finite numbers render as `null` like the
/// serializer proper.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_compact(self, &mut out);
        f.write_str(&out)
    }
}

fn write_compact(value: &JsonValue, out: &mut String) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(true) => out.push_str("true"),
        JsonValue::Bool(false) => out.push_str("false"),
        JsonValue::Number(n) => crate::stringify::push_number(*n, out),
        JsonValue::String(s) => crate::escape::push_quoted(s, out),
        JsonValue::Array(arr) => {
            out.push('[');
            for (i, v) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_compact(v, out);
            }
            out.push(']');
        }
        JsonValue::Object(map) => {
            out.push('{');
            for (i, (k, v)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                crate::escape::push_quoted(k, out);
                out.push(':');
                write_compact(v, out);
            }
            out.push('}');
        }
    }
}
