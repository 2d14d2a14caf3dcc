//! # conform-engine — Recursive Validation Engine
//!
//! Decides whether an untyped [`Value`](conform_core::Value) conforms to a
//! [`Schema`](conform_core::Schema) and, if not, reports every violation
//! with the rejecting sub-schema, the offending value, and its path.
//!
//! ## Entry Point (`parse`)
//!
//! [`parse`] runs the [`validate`] walk from the root and returns either the
//! subject (borrowed, no copy) or a [`Violations`] list. Only two error
//! codes exist, `invalidType` and `invalidRange`.
//!
//! ## Layers
//!
//! - [`verify`]: leaf type and range checks, shared `optional`/`nullable`
//!   short-circuit.
//! - [`validate`]: exhaustive dispatch on the schema variant, recursion
//!   into array elements, tuple positions, object properties, record
//!   entries, and union alternatives.
//! - [`parse`]: the two-case result protocol.
//! - [`standard`]: `{value}` / `{issues}` adapter for the standard
//!   validation protocol.
//!
//! ## Crate Policy
//!
//! - Validation is pure: no I/O, no shared state, no panics on any subject.
//! - Schemas are only borrowed; the engine never mutates or clones them.
//! - Every violation is returned. Nothing is swallowed or only logged.

pub mod parse;
pub mod standard;
pub mod validate;
pub mod verify;

pub use parse::{parse, ParseResult, Violations};
pub use standard::{AsStandard, Issue, StandardResult, StandardSchema};
pub use validate::{conforms, validate, InvalidSubject};
pub use verify::{admits_absent, verify, Leaf};
