//! # conform-schema
//!
//! Reference schema registry and JSON Schema catalog.
//!
//! This crate provides:
//! - [`SchemaRegistry`]: loads and validates the canonical `schema.json` for an
//!   `(entity, model)` pair
//! - [`JsonSchemas`]: name-addressable JSON Schemas for every persisted or
//!   emitted type (`conform schema <type>`, external tooling)
//!
//! ## Validation layers
//!
//! A `schema.json` is first checked structurally against the `schemars`-generated
//! schema of [`conform_core::entities::ReferenceSchema`] via `jsonschema`, then
//! semantically (non-empty table name, unique columns, ...). Every problem is
//! collected before failing so authors can fix a file in one pass.

mod catalog;
mod error;
mod registry;
mod validate;

pub use catalog::JsonSchemas;
pub use error::SchemaError;
pub use registry::SchemaRegistry;
pub use validate::semantic_problems;
