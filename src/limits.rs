//! Nesting depth limits shared by the parser and the serializer.
//!
//! Recursion depth is bounded only by input nesting, so both directions
//! enforce an explicit maximum and fail with `Error::DepthExceeded` instead
//! of overflowing the call stack.

/// Default maximum nesting depth for parsing and serialization.
pub const DEFAULT_MAX_DEPTH: usize = 500;

/// Depth limits for JSON processing.
///
/// The default is generous enough for any hand-authored document while
/// keeping pathological inputs (one million open brackets) from reaching
/// the stack guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth for arrays and objects.
    pub max_depth: usize,
}

impl Limits {
    /// Standard limits.
    pub const fn standard() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limits with a custom maximum depth.
    pub const fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_limits() {
        assert_eq!(Limits::standard().max_depth, 500);
        assert_eq!(Limits::default(), Limits::standard());
    }

    #[test]
    fn test_custom_depth() {
        assert_eq!(Limits::with_max_depth(8).max_depth, 8);
    }
}
