//! Error handling for dynjson.
//!
//! Every failure is synchronous and raised at the point of detection: a
//! caller receives either a complete result or an error, never a truncated
//! string or a half-built value tree. Reviver and replacer failures are
//! carried through unmodified as error sources.

use thiserror::Error;

/// Error type boxed inside reviver/replacer failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced by parsing and serialization.
#[derive(Debug, Error)]
pub enum Error {
    /// The input text is not well-formed JSON.
    #[error("syntax error at byte {position}: {message}")]
    Syntax {
        /// Byte offset into the input where the error was detected.
        position: usize,
        /// Human-readable description of what was expected or found.
        message: String,
    },

    /// A container was reached again while it was still being serialized.
    #[error("cyclic reference detected during stringify")]
    CyclicReference,

    /// Input or output nesting exceeded the configured limit.
    #[error("nesting depth {depth} exceeds limit {limit}")]
    DepthExceeded {
        /// Depth at which the limit was hit.
        depth: usize,
        /// The configured maximum.
        limit: usize,
    },

    /// A reviver callback failed; the parse was aborted.
    #[error("reviver failed for key {key:?}")]
    Reviver {
        /// The key the reviver was invoked with.
        key: String,
        /// The underlying failure, propagated unmodified.
        #[source]
        source: BoxError,
    },

    /// A replacer callback failed; the stringify was aborted.
    #[error("replacer failed for key {key:?}")]
    Replacer {
        /// The key the replacer was invoked with.
        key: String,
        /// The underlying failure, propagated unmodified.
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Shorthand for a syntax error at a byte position.
    pub(crate) fn syntax(position: usize, message: impl Into<String>) -> Self {
        Error::Syntax {
            position,
            message: message.into(),
        }
    }

    /// Returns true if this is a syntax error.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    /// Returns the byte position for syntax errors, None otherwise.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
