//! # Standard Validation Adapter
//!
//! Exposes a schema through the vendor-neutral "standard validation"
//! shape used by form and RPC libraries:
//!
//! ```json
//! { "value": <subject> }
//! { "issues": [ { "message": "invalidType", "path": ["users", 3] } ] }
//! ```
//!
//! Issues map one-to-one onto the engine's violations: `message` is the
//! error code and `path` is the violation path unchanged. Validation is
//! always synchronous.

use std::borrow::Cow;

use serde::Serialize;

use conform_core::{ErrorPath, Schema, Value};

use crate::parse::parse;
use crate::validate::InvalidSubject;

/// Protocol version implemented by [`StandardSchema`].
pub const STANDARD_VERSION: u8 = 1;

/// Vendor name reported by [`StandardSchema`].
pub const VENDOR: &str = "conform";

/// One problem reported through the standard protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub message: String,
    pub path: ErrorPath,
}

impl From<&InvalidSubject<'_, '_>> for Issue {
    fn from(violation: &InvalidSubject<'_, '_>) -> Self {
        Self {
            message: violation.code.as_str().to_string(),
            path: violation.path.clone(),
        }
    }
}

/// Outcome of [`StandardSchema::validate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StandardResult<'v> {
    Success { value: Cow<'v, Value> },
    Failure { issues: Vec<Issue> },
}

impl<'v> StandardResult<'v> {
    pub fn is_success(&self) -> bool {
        matches!(self, StandardResult::Success { .. })
    }

    /// The issues of a failure; empty for a success.
    pub fn issues(&self) -> &[Issue] {
        match self {
            StandardResult::Success { .. } => &[],
            StandardResult::Failure { issues } => issues,
        }
    }
}

/// A schema viewed through the standard validation protocol.
#[derive(Debug, Clone, Copy)]
pub struct StandardSchema<'s> {
    schema: &'s Schema,
}

impl<'s> StandardSchema<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    pub fn version(&self) -> u8 {
        STANDARD_VERSION
    }

    pub fn vendor(&self) -> &'static str {
        VENDOR
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Validate `subject`, reporting failures as issues.
    pub fn validate<'v>(&self, subject: &'v Value) -> StandardResult<'v> {
        match parse(self.schema, subject) {
            Ok(value) => StandardResult::Success { value },
            Err(violations) => StandardResult::Failure {
                issues: violations.iter().map(Issue::from).collect(),
            },
        }
    }
}

/// Access to the standard protocol view of a schema.
pub trait AsStandard {
    fn standard(&self) -> StandardSchema<'_>;
}

impl AsStandard for Schema {
    fn standard(&self) -> StandardSchema<'_> {
        StandardSchema::new(self)
    }
}
