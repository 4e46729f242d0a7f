//! Error types for the math layout crate
//!
//! All of these are raised while an atom tree is being built. Layout over a
//! finished tree never fails.

use crate::atom::AtomClass;
use thiserror::Error;

/// Errors that can occur while constructing atoms
#[derive(Error, Debug)]
pub enum MathError {
    /// A symbol was used where a different category is required
    #[error("symbol '{name}' has class {found:?}, expected {expected}")]
    InvalidSymbolCategory {
        name: String,
        expected: String,
        found: AtomClass,
    },

    /// The symbol name is not present in the registry
    #[error("unknown symbol: {0}")]
    SymbolNotFound(String),

    /// Unrecognized measurement-unit code
    #[error("invalid unit: {0}")]
    InvalidUnit(String),

    /// An accent source that does not resolve to exactly one accent symbol
    #[error("malformed accent source: {0}")]
    MalformedAccentSource(String),

    /// A row was required to contain at least one element
    #[error("empty row: {0}")]
    EmptyRow(String),

    /// Diagnostic dump failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for math construction
pub type MathResult<T> = Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::SymbolNotFound("foo".to_string());
        assert_eq!(err.to_string(), "unknown symbol: foo");

        let err = MathError::InvalidSymbolCategory {
            name: "plus".to_string(),
            expected: "Accent".to_string(),
            found: AtomClass::BinaryOperator,
        };
        assert_eq!(
            err.to_string(),
            "symbol 'plus' has class BinaryOperator, expected Accent"
        );
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: MathError = json_err.into();
        assert!(matches!(err, MathError::Serialization(_)));
    }
}
