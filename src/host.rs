//! Host values: the wider value space accepted by the serializer.
//!
//! Serialization accepts more than pure JSON trees: timestamps, values
//! that serialize to nothing, and containers that can be aliased from more
//! than one place. Containers are shared (`Rc<RefCell<..>>`) precisely so
//! that a value can be reachable from itself; the serializer detects such
//! cycles by container identity instead of recursing forever.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::date::UtcDate;
use crate::value::JsonValue;

/// Shared array container.
pub type HostArray = Rc<RefCell<Vec<HostValue>>>;

/// Shared insertion-ordered object container.
pub type HostObject = Rc<RefCell<IndexMap<String, HostValue>>>;

/// A value as seen by the serializer.
///
/// Everything in [`JsonValue`]'s variants, plus a distinguished date kind,
/// plus `Undefined` for values that serialize to nothing: dropped from
/// objects, `null` inside arrays, and an omitted result at the root.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HostValue {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number; non-finite values serialize as `null`
    Number(f64),
    /// JSON string
    String(String),
    /// UTC timestamp, serialized as a quoted formatted string
    Date(UtcDate),
    /// A value that serializes to nothing
    Undefined,
    /// Shared array
    Array(HostArray),
    /// Shared object
    Object(HostObject),
}

impl HostValue {
    /// Create a shared array from its elements.
    pub fn array(items: Vec<HostValue>) -> Self {
        HostValue::Array(Rc::new(RefCell::new(items)))
    }

    /// Create an empty shared object.
    pub fn object() -> Self {
        HostValue::Object(Rc::new(RefCell::new(IndexMap::new())))
    }

    /// Create a shared object from key/value entries, preserving order.
    pub fn object_from<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, HostValue)>,
        K: Into<String>,
    {
        let map: IndexMap<String, HostValue> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect();
        HostValue::Object(Rc::new(RefCell::new(map)))
    }

    /// Insert into an object value. Returns false if this is not an object.
    pub fn insert(&self, key: impl Into<String>, value: HostValue) -> bool {
        match self {
            HostValue::Object(map) => {
                map.borrow_mut().insert(key.into(), value);
                true
            }
            _ => false,
        }
    }

    /// Push onto an array value. Returns false if this is not an array.
    pub fn push(&self, value: HostValue) -> bool {
        match self {
            HostValue::Array(arr) => {
                arr.borrow_mut().push(value);
                true
            }
            _ => false,
        }
    }

    /// Returns true for values that serialize to nothing.
    pub fn is_omitted(&self) -> bool {
        matches!(self, HostValue::Undefined)
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Null => "null",
            HostValue::Bool(_) => "boolean",
            HostValue::Number(_) => "number",
            HostValue::String(_) => "string",
            HostValue::Date(_) => "date",
            HostValue::Undefined => "undefined",
            HostValue::Array(_) => "array",
            HostValue::Object(_) => "object",
        }
    }
}

impl From<JsonValue> for HostValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => HostValue::Null,
            JsonValue::Bool(b) => HostValue::Bool(b),
            JsonValue::Number(n) => HostValue::Number(n),
            JsonValue::String(s) => HostValue::String(s),
            JsonValue::Array(arr) => {
                HostValue::array(arr.into_iter().map(HostValue::from).collect())
            }
            JsonValue::Object(map) => {
                HostValue::object_from(map.into_iter().map(|(k, v)| (k, HostValue::from(v))))
            }
        }
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        HostValue::Number(n)
    }
}

impl From<i64> for HostValue {
    fn from(n: i64) -> Self {
        HostValue::Number(n as f64)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::String(s.to_string())
    }
}

impl From<UtcDate> for HostValue {
    fn from(d: UtcDate) -> Self {
        HostValue::Date(d)
    }
}
