//! # conform-builder — Chained Schema Construction
//!
//! Builds [`Schema`](conform_core::Schema) values in code instead of from
//! JSON or YAML documents:
//!
//! ```
//! use conform_builder::{array, number, object, string};
//! use conform_core::Value;
//!
//! let users = array(object([
//!     ("email", string().min_length(3).into_schema()),
//!     ("age", number().min(0.0).optional().into_schema()),
//! ]));
//!
//! let subject = Value::from(serde_json::json!([{"email": "a@b"}]));
//! assert!(users.parse(&subject).is_ok());
//! ```
//!
//! ## Crate Policy
//!
//! - A builder is a thin wrapper over the schema value; the result is
//!   equal to the document-loaded schema with the same fields.
//! - Builders never validate on their own. [`Builder::check`] reports
//!   malformed trees, and [`Builder::parse`] delegates to the engine.

pub mod builder;

pub use builder::{
    array, boolean, literal, marker, number, object, record, string, tuple, union, Builder,
};
