//! Field Coverage
//!
//! Extracts the serialized field tree of a schema description and measures how much
//! of one field tree (a specification) another tree (an implementation) supports.
//!
//! ## Features
//!
//! - **Extraction**: Dotted field names from nested records and sequences of records
//! - **Tag Handling**: Untagged and skip-marked (`"-"`) fields are left out along with their contents
//! - **Comparison**: Lock-step, per-level diff into supported and unsupported names
//! - **Suggestions**: Fuzzy near-miss candidates for unsupported names
//! - **Reports**: Text or JSON, with checksums of both trees
//!
//! ## Architecture
//!
//! ```text
//! RecordType ──walk_record──▶ SchemaVisitor ─┬─ FieldCollector ─▶ Vec<Field>
//!                                            └─ ExtractStats
//!
//! reference: Vec<Field> ─┐
//!                        ├─ compare ─▶ ComparisonReport ─▶ CoverageReport
//! candidate: Vec<Field> ─┘
//! ```

pub mod checksum;
pub mod compare;
pub mod config;
pub mod demo;
pub mod error;
pub mod extract;
pub mod field;
pub mod report;
pub mod schema;
pub mod suggest;

pub use checksum::Checksum;
pub use compare::{compare, ComparisonReport, FieldComparator};
pub use config::{CoverageConfig, OutputFormat};
pub use error::{CoverageError, Result};
pub use extract::{extract, extract_record, ExtractStats, FieldExtractor, SchemaVisitor};
pub use field::{load_fields, Field, FieldListing};
pub use report::CoverageReport;
pub use schema::{FieldDecl, OtherKind, RecordType, ScalarKind, TypeKind};
pub use suggest::Suggestion;
