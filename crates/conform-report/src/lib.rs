//! # conform-report
//!
//! Persistence for scan results and schema documentation.
//!
//! - [`ReportWriter`]: replaces `domains.json` and `categoricals.json` as a
//!   pair, atomically, under the table's single-writer lock
//! - [`ReportReader`]: loads the persisted pair
//! - [`generate_schema_markdown`]: pure `schema.md` rendering
//! - [`build_domains_file`] / [`build_categoricals_file`]: assemble the
//!   persisted roots from per-domain results

mod build;
mod error;
pub mod lock;
mod markdown;
mod reader;
mod writer;

pub use build::{build_categoricals_file, build_domains_file};
pub use error::ReportError;
pub use markdown::generate_schema_markdown;
pub use reader::ReportReader;
pub use writer::ReportWriter;
