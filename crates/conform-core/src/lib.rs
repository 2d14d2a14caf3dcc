//! # conform-core — Foundational Types for conform
//!
//! This crate defines the data every other conform crate works on. It has
//! no behavior beyond construction, conversion, and well-formedness checks;
//! validation itself lives in `conform-engine`.
//!
//! ## Key Design Principles
//!
//! 1. **One closed `SchemaKind` enum.** Nine variants, exhaustive `match`
//!    everywhere. Adding a variant forces every consumer to handle it.
//!
//! 2. **`Value` distinguishes `Undefined` from `Null`.** Absent properties
//!    and explicit nulls are different subjects; `optional` and `nullable`
//!    admit them independently.
//!
//! 3. **Paths are values.** `ErrorPath::child` always allocates, so no
//!    violation ever aliases another's path.
//!
//! 4. **Malformed schemas never load.** Deserialization checks every node
//!    (non-empty unions, string record keys, ordered finite bounds).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `conform-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod path;
pub mod schema;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{ErrorCode, SchemaError, ValueError};
pub use path::{make_error_path, ErrorPath, PathSegment};
pub use schema::{Brand, Literal, Properties, Schema, SchemaKind};
pub use value::{Map, Value, UNDEFINED};
