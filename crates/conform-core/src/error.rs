//! # Error Types
//!
//! Two families of errors exist in conform and they never mix:
//!
//! - [`ErrorCode`]: the stable, machine-readable outcome of a failed
//!   validation. Only two codes exist. They are data, not Rust errors:
//!   the engine returns them inside a violation list.
//! - [`SchemaError`] and [`ValueError`]: programmer or configuration
//!   errors raised while building schemas or converting subjects. These
//!   use `thiserror` and propagate with `?`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation error code attached to every violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    /// The subject's runtime kind does not match the schema: wrong
    /// primitive type, literal mismatch, non-array/non-object for a
    /// composite, wrong tuple length, or no union alternative matched.
    InvalidType,
    /// The subject has the right kind but a declared bound (`min`, `max`,
    /// `minLength`, `maxLength`) is violated.
    InvalidRange,
}

impl ErrorCode {
    /// The wire name of the code (`"invalidType"` / `"invalidRange"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidType => "invalidType",
            ErrorCode::InvalidRange => "invalidRange",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when a schema is malformed or cannot be loaded.
///
/// A malformed schema is a programmer error, not a validation failure.
/// These checks run when a schema document is deserialized and when
/// [`crate::Schema::check`] is called on a hand-built schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A union was declared with no alternatives.
    #[error("union schema must declare at least one alternative")]
    EmptyUnion,

    /// A record `key` schema was not a string schema.
    #[error("record key schema must be of type 'string', found '{found}'")]
    NonStringRecordKey {
        /// Tag of the offending key schema.
        found: &'static str,
    },

    /// A lower bound exceeds its upper bound.
    #[error("{field}: lower bound {lower} exceeds upper bound {upper}")]
    InvertedBounds {
        /// Name of the bound pair (`min/max`).
        field: &'static str,
        /// Declared lower bound.
        lower: f64,
        /// Declared upper bound.
        upper: f64,
    },

    /// A minimum length exceeds its maximum length.
    #[error("{field}: minimum length {lower} exceeds maximum length {upper}")]
    InvertedLengths {
        /// Name of the bound pair (`minLength/maxLength`).
        field: &'static str,
        /// Declared minimum length.
        lower: usize,
        /// Declared maximum length.
        upper: usize,
    },

    /// A numeric bound is NaN or infinite.
    #[error("{field}: bound must be finite, got {value}")]
    NonFiniteBound {
        /// Name of the bound (`min` or `max`).
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A schema document could not be read or parsed.
    #[error("schema load error for '{source_name}': {reason}")]
    Load {
        /// File path or other identifier of the document.
        source_name: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// IO error reading a schema document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error converting a foreign document value into a subject [`crate::Value`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    /// A YAML mapping used a key that has no string form.
    #[error("unsupported YAML map key type: {0}")]
    UnsupportedKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_wire_names() {
        assert_eq!(ErrorCode::InvalidType.as_str(), "invalidType");
        assert_eq!(ErrorCode::InvalidRange.to_string(), "invalidRange");
        assert_eq!(
            serde_json::to_value(ErrorCode::InvalidRange).unwrap(),
            serde_json::json!("invalidRange")
        );
        let parsed: ErrorCode = serde_json::from_str("\"invalidType\"").unwrap();
        assert_eq!(parsed, ErrorCode::InvalidType);
    }

    #[test]
    fn schema_error_display_includes_context() {
        let err = SchemaError::InvertedBounds {
            field: "min/max",
            lower: 5.0,
            upper: 1.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("min/max"));
        assert!(msg.contains('5'));

        let err = SchemaError::NonStringRecordKey { found: "number" };
        assert!(err.to_string().contains("'number'"));
    }
}
