//! JSON serializer.
//!
//! Converts a [`HostValue`] graph into JSON text. The top-level value is
//! treated as the single slot of a synthetic root holder under the key
//! `""`, so a replacer function is invoked uniformly, root included.
//! Containers currently being serialized are tracked in an identity set
//! keyed by container pointer; re-entering one fails with
//! `Error::CyclicReference` instead of recursing forever.
//!
//! Output is compact by default. With indentation enabled, each nesting
//! level's children are joined with `,\n` and prefixed with one copy of
//! the indent text per level, and keys are followed by `": "` instead of
//! a bare `:`.

use std::collections::HashSet;
use std::rc::Rc;

use crate::date::{format_utc, UtcDate};
use crate::error::{BoxError, Error, Result};
use crate::escape::push_quoted;
use crate::host::{HostArray, HostObject, HostValue};
use crate::limits::Limits;

/// Indentation policy for serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Indent {
    /// Compact output with no interior whitespace.
    #[default]
    None,
    /// Indent with this many spaces per level, clamped to [0, 100].
    Spaces(u32),
    /// Indent with this text verbatim, once per nesting level.
    Text(String),
}

impl Indent {
    /// Resolve to the per-level indent string, or None for compact output.
    fn resolve(&self) -> Option<String> {
        match self {
            Indent::None => None,
            Indent::Spaces(0) => None,
            Indent::Spaces(n) => Some(" ".repeat((*n).min(100) as usize)),
            Indent::Text(t) if t.is_empty() => None,
            Indent::Text(t) => Some(t.clone()),
        }
    }
}

/// The container a value was found in, passed to replacer functions.
///
/// The root value lives in a synthetic holder with one slot under the key
/// `""`; no host object is materialized for it.
#[derive(Clone, Copy)]
pub enum Holder<'a> {
    /// The synthetic root holder.
    Root,
    /// An array being serialized; the key is the decimal index.
    Array(&'a HostArray),
    /// An object being serialized.
    Object(&'a HostObject),
}

/// Replacer function signature: `(holder, key, value)` to substituted
/// value, invoked top-down before type dispatch. Returning
/// `HostValue::Undefined` omits the value; an error aborts serialization.
pub type ReplaceFn<'a> =
    dyn FnMut(Holder<'_>, &str, &HostValue) -> std::result::Result<HostValue, BoxError> + 'a;

/// Replace/filter transform applied during serialization.
pub enum Replacer<'a> {
    /// Whitelist of permitted object keys, serialized in whitelist order.
    Keys(Vec<String>),
    /// Substitution function applied to every value.
    Func(Box<ReplaceFn<'a>>),
}

/// Serialization options.
pub struct StringifyOptions<'a> {
    /// Optional replace/filter transform.
    pub replacer: Option<Replacer<'a>>,
    /// Indentation policy.
    pub indent: Indent,
    /// Date formatting hook; the output is quoted and escaped by the
    /// serializer, so a custom formatter cannot break the output syntax.
    pub date_format: fn(&UtcDate) -> String,
    /// Depth limits.
    pub limits: Limits,
}

impl<'a> Default for StringifyOptions<'a> {
    fn default() -> Self {
        Self {
            replacer: None,
            indent: Indent::None,
            date_format: format_utc,
            limits: Limits::standard(),
        }
    }
}

impl<'a> StringifyOptions<'a> {
    /// Options with a key whitelist.
    pub fn with_keys<K: Into<String>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self {
            replacer: Some(Replacer::Keys(keys.into_iter().map(Into::into).collect())),
            ..Self::default()
        }
    }

    /// Options with a replacer function.
    pub fn with_replacer(f: Box<ReplaceFn<'a>>) -> Self {
        Self {
            replacer: Some(Replacer::Func(f)),
            ..Self::default()
        }
    }

    /// Options with indentation only.
    pub fn with_indent(indent: Indent) -> Self {
        Self {
            indent,
            ..Self::default()
        }
    }

    /// Set the indentation policy.
    pub fn indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// Set the date formatting hook.
    pub fn date_format(mut self, f: fn(&UtcDate) -> String) -> Self {
        self.date_format = f;
        self
    }
}

/// Serialize a value with default options (compact, no replacer).
///
/// Returns `Ok(None)` only when the root value itself serializes to
/// nothing; otherwise the complete document text.
pub fn stringify(value: &HostValue) -> Result<Option<String>> {
    stringify_with(value, StringifyOptions::default())
}

/// Serialize a value with explicit options.
pub fn stringify_with(value: &HostValue, options: StringifyOptions<'_>) -> Result<Option<String>> {
    let indent = options.indent.resolve();
    let mut serializer = Serializer {
        replacer: options.replacer,
        indent,
        date_format: options.date_format,
        max_depth: options.limits.max_depth,
        active: HashSet::new(),
        depth: 0,
    };
    serializer.serialize(Holder::Root, "", value)
}

struct Serializer<'a> {
    replacer: Option<Replacer<'a>>,
    indent: Option<String>,
    date_format: fn(&UtcDate) -> String,
    max_depth: usize,
    // Identity set of containers currently being serialized.
    active: HashSet<usize>,
    depth: usize,
}

impl<'a> Serializer<'a> {
    /// Serialize one value; `None` means the value is omitted.
    fn serialize(
        &mut self,
        holder: Holder<'_>,
        key: &str,
        value: &HostValue,
    ) -> Result<Option<String>> {
        let substituted;
        let value = match &mut self.replacer {
            Some(Replacer::Func(f)) => {
                substituted = f(holder, key, value).map_err(|source| Error::Replacer {
                    key: key.to_string(),
                    source,
                })?;
                &substituted
            }
            _ => value,
        };

        match value {
            HostValue::Undefined => Ok(None),
            HostValue::Null => Ok(Some("null".to_string())),
            HostValue::Bool(true) => Ok(Some("true".to_string())),
            HostValue::Bool(false) => Ok(Some("false".to_string())),
            HostValue::Number(n) => {
                let mut out = String::new();
                push_number(*n, &mut out);
                Ok(Some(out))
            }
            HostValue::String(s) => {
                let mut out = String::new();
                push_quoted(s, &mut out);
                Ok(Some(out))
            }
            HostValue::Date(d) => {
                let mut out = String::new();
                push_quoted(&(self.date_format)(d), &mut out);
                Ok(Some(out))
            }
            HostValue::Array(arr) => self.serialize_array(arr).map(Some),
            HostValue::Object(obj) => self.serialize_object(obj).map(Some),
        }
    }

    /// Mark a container as being serialized, failing on a cycle or on
    /// excessive depth.
    fn enter(&mut self, id: usize) -> Result<()> {
        if !self.active.insert(id) {
            return Err(Error::CyclicReference);
        }
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::DepthExceeded {
                depth: self.depth,
                limit: self.max_depth,
            });
        }
        Ok(())
    }

    fn leave(&mut self, id: usize) {
        self.active.remove(&id);
        self.depth -= 1;
    }

    fn serialize_array(&mut self, arr: &HostArray) -> Result<String> {
        let id = Rc::as_ptr(arr) as usize;
        self.enter(id)?;

        // Snapshot the elements so the RefCell borrow is not held across
        // replacer callbacks. Element clones are cheap (containers are Rc).
        let items: Vec<HostValue> = arr.borrow().clone();

        let mut children = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let rendered = self.serialize(Holder::Array(arr), &index.to_string(), item)?;
            // Omitted entries render as null to keep indices stable.
            children.push(rendered.unwrap_or_else(|| "null".to_string()));
        }

        self.leave(id);
        Ok(self.join(children, '[', ']'))
    }

    fn serialize_object(&mut self, obj: &HostObject) -> Result<String> {
        let id = Rc::as_ptr(obj) as usize;
        self.enter(id)?;

        let whitelist: Option<Vec<String>> = match &self.replacer {
            Some(Replacer::Keys(keys)) => Some(keys.clone()),
            _ => None,
        };

        // Snapshot entries for the same reason as arrays; whitelisted keys
        // missing from the object are simply absent from the snapshot.
        let entries: Vec<(String, HostValue)> = {
            let map = obj.borrow();
            match &whitelist {
                Some(keys) => keys
                    .iter()
                    .filter_map(|k| map.get(k).map(|v| (k.clone(), v.clone())))
                    .collect(),
                None => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            }
        };

        let colon = if self.indent.is_some() { ": " } else { ":" };
        let mut children = Vec::with_capacity(entries.len());
        for (key, item) in &entries {
            // Keys whose value serializes to nothing are dropped entirely.
            if let Some(rendered) = self.serialize(Holder::Object(obj), key, item)? {
                let mut line = String::new();
                push_quoted(key, &mut line);
                line.push_str(colon);
                line.push_str(&rendered);
                children.push(line);
            }
        }

        self.leave(id);
        Ok(self.join(children, '{', '}'))
    }

    /// Join rendered children inside container punctuation, applying the
    /// indentation policy.
    fn join(&self, children: Vec<String>, open: char, close: char) -> String {
        match &self.indent {
            Some(ind) if !children.is_empty() => {
                let joined = children.join(",\n");
                let indented: Vec<String> = joined
                    .lines()
                    .map(|line| format!("{ind}{line}"))
                    .collect();
                format!("{open}\n{}\n{close}", indented.join("\n"))
            }
            _ => format!("{open}{}{close}", children.join(",")),
        }
    }
}

/// Append the JSON rendering of a number. Non-finite values render as
/// `null`. Integral values in the exactly-representable window render
/// without a fractional part; everything else uses shortest round-trip
/// formatting.
pub(crate) fn push_number(n: f64, out: &mut String) {
    if !n.is_finite() {
        out.push_str("null");
        return;
    }
    // 2^53: beyond this, f64 cannot represent every integer exactly.
    if n == n.trunc() && n.abs() <= 9_007_199_254_740_992.0 {
        let mut buf = itoa::Buffer::new();
        out.push_str(buf.format(n as i64));
    } else {
        let mut buf = ryu::Buffer::new();
        out.push_str(buf.format_finite(n));
    }
}
