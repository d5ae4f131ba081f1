//! dynjson - a from-scratch JSON parsing and serialization engine.
//!
//! This crate converts between textual JSON and an in-memory dynamic value
//! model without delegating to any pre-existing JSON implementation. It is
//! built for untrusted input: an explicit tokenizer feeds a recursive
//! descent parser (text is never interpreted as anything but data), nesting
//! depth is bounded on both the parse and serialize paths, and the
//! serializer detects cyclic value graphs instead of looping.
//!
//! # Architecture
//!
//! The crate is organized into focused modules:
//!
//! - [`value`] - `JsonValue`, the dynamic value tree produced by parsing
//! - [`host`] - `HostValue`, the wider value space accepted by stringify
//! - [`escape`] - shared character escaping tables
//! - [`limits`] - nesting depth limits
//! - [`lexer`] - tokenizer with escape and surrogate handling
//! - [`validate`] - syntactic validation over the token stream
//! - [`parser`] - recursive descent parser with reviver support
//! - [`stringify`] - serializer with replacer, indentation, and cycle
//!   detection
//! - [`date`] - UTC timestamp values and their default formatting
//! - [`error`] - the crate error type
//!
//! # Example
//!
//! ```
//! use dynjson::{parse, stringify, HostValue, JsonValue};
//!
//! let value = parse(r#"{"b":2,"a":1}"#).unwrap();
//! assert_eq!(value.get("a"), Some(&JsonValue::Number(1.0)));
//!
//! // Insertion order is preserved on the way back out.
//! let text = stringify(&HostValue::from(value)).unwrap();
//! assert_eq!(text.as_deref(), Some(r#"{"b":2,"a":1}"#));
//! ```

// Untrusted-input code must avoid unwrap/expect/panic in library code.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod date;
pub mod error;
pub mod escape;
pub mod host;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod stringify;
pub mod validate;
pub mod value;

// Re-export commonly used types
pub use date::UtcDate;
pub use error::{Error, Result};
pub use host::{HostArray, HostObject, HostValue};
pub use limits::Limits;
pub use parser::{parse, parse_with_limits, parse_with_reviver};
pub use stringify::{stringify, stringify_with, Holder, Indent, Replacer, StringifyOptions};
pub use validate::validate;
pub use value::{JsonMap, JsonValue};
