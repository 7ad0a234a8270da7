//! Entity structs for the conformance engine.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so that the
//! persisted files can be round-tripped and validated against their schemas.

mod categorical;
mod conformance;
mod domain;
mod report;
mod schema;

pub use categorical::{CategoricalField, CategoricalValue};
pub use conformance::{ColumnDiff, StructuralConformance};
pub use domain::{DomainLocation, DomainRecord, DomainRef};
pub use report::{CategoricalsFile, DomainsFile, DomainsSummary};
pub use schema::{ReferenceSchema, SchemaField};
