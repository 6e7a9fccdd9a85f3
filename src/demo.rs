//! Built-in demonstration data
//!
//! A description of the Linux container runtime spec, plus a hand-written pair of
//! field trees, embedded from `fixtures/` at compile time.

use include_dir::{include_dir, Dir};

use crate::error::{CoverageError, Result};
use crate::field::{fields_from_json_str, Field};
use crate::schema::RecordType;

static FIXTURES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/fixtures");

/// File names of the embedded fixtures
pub const LINUX_SPEC: &str = "linux_spec.json";
pub const REFERENCE_TREE: &str = "reference_tree.json";
pub const CANDIDATE_TREE: &str = "candidate_tree.json";

fn fixture(name: &str) -> Result<&'static str> {
    FIXTURES
        .get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| CoverageError::MissingFixture(name.to_string()))
}

/// The Linux runtime spec description
pub fn linux_spec() -> Result<RecordType> {
    RecordType::from_json_str(fixture(LINUX_SPEC)?)
}

/// Reference side of the demonstration comparison
pub fn reference_tree() -> Result<Vec<Field>> {
    fields_from_json_str(fixture(REFERENCE_TREE)?)
}

/// Candidate side of the demonstration comparison
pub fn candidate_tree() -> Result<Vec<Field>> {
    fields_from_json_str(fixture(CANDIDATE_TREE)?)
}
