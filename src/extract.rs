//! Field-tree extraction
//!
//! Walks a [`RecordType`] in declaration order and reports every field that carries
//! a serialization name. Records and sequences of records are descended into using
//! the field's qualified name as the new prefix; anything else is a leaf.
//!
//! The walk is separated from what is done with each field through
//! [`SchemaVisitor`]. [`FieldCollector`] builds the flat field list, and
//! [`ExtractStats`] counts declarations for reporting.
//!
//! Extraction flattens: nested fields are emitted as siblings *after* their parent
//! in the returned sequence, and the parent's `children` stays empty.

use tracing::{debug, trace};

use crate::error::{CoverageError, Result};
use crate::field::Field;
use crate::schema::{FieldDecl, RecordType, TypeKind};

/// Default tag name meaning "never serialize this field"
pub const DEFAULT_SKIP_MARKER: &str = "-";

/// Callbacks driven by [`walk_record`].
pub trait SchemaVisitor {
    /// Called for every field that has a serialization name, before its nested
    /// record (if any) is walked.
    fn field(&mut self, qualified_name: &str, decl: &FieldDecl, depth: usize);

    /// Called for every field dropped because it has no serialization name or is
    /// skip-marked. Its nested content is not walked.
    fn omitted(&mut self, _decl: &FieldDecl, _depth: usize) {}
}

/// Walk `record` depth-first in declaration order.
///
/// `prefix` qualifies the names of the record's own fields; pass `""` at the root.
pub fn walk_record<V: SchemaVisitor>(
    prefix: &str,
    record: &RecordType,
    skip_marker: &str,
    visitor: &mut V,
) {
    walk_at_depth(prefix, record, skip_marker, visitor, 0);
}

fn walk_at_depth<V: SchemaVisitor>(
    prefix: &str,
    record: &RecordType,
    skip_marker: &str,
    visitor: &mut V,
    depth: usize,
) {
    for decl in &record.fields {
        // The marker is compared against the whole tag: "-," still names a field "-".
        let local = match decl.tag.as_deref() {
            Some(tag) if tag != skip_marker => decl.serialization_name(),
            _ => None,
        };
        let local = match local {
            Some(name) => name,
            None => {
                visitor.omitted(decl, depth);
                continue;
            }
        };

        let qualified = Field::qualify(prefix, local);
        visitor.field(&qualified, decl, depth);

        match &decl.ty {
            TypeKind::Record(nested) => {
                walk_at_depth(&qualified, nested, skip_marker, visitor, depth + 1);
            }
            TypeKind::Sequence { element } => {
                if let TypeKind::Record(nested) = element.as_ref() {
                    walk_at_depth(&qualified, nested, skip_marker, visitor, depth + 1);
                }
            }
            TypeKind::Scalar { .. } | TypeKind::Other { .. } => {}
        }
    }
}

/// Visitor that collects every emitted field into a flat list
#[derive(Debug, Default)]
pub struct FieldCollector {
    fields: Vec<Field>,
}

impl FieldCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

impl SchemaVisitor for FieldCollector {
    fn field(&mut self, qualified_name: &str, decl: &FieldDecl, depth: usize) {
        trace!(field = %qualified_name, declared = %decl.name, depth, "emit field");
        self.fields.push(Field::leaf(qualified_name));
    }

    fn omitted(&mut self, decl: &FieldDecl, depth: usize) {
        trace!(declared = %decl.name, tag = ?decl.tag, depth, "omit field");
    }
}

/// Declaration statistics gathered during a walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    /// Fields emitted into the field list
    pub emitted: usize,
    /// Fields dropped for lacking a serialization name or being skip-marked
    pub omitted: usize,
    /// Emitted fields whose nested record was walked
    pub nested: usize,
    /// Emitted fields tagged `omitempty`
    pub optional: usize,
    /// Deepest nesting level reached (0 = root record)
    pub max_depth: usize,
}

impl ExtractStats {
    /// Gather statistics for `record` with the given skip marker
    pub fn collect(record: &RecordType, skip_marker: &str) -> Self {
        let mut stats = Self::default();
        walk_record("", record, skip_marker, &mut stats);
        stats
    }
}

impl SchemaVisitor for ExtractStats {
    fn field(&mut self, _qualified_name: &str, decl: &FieldDecl, depth: usize) {
        self.emitted += 1;
        self.max_depth = self.max_depth.max(depth);
        if decl.options().contains("omitempty") {
            self.optional += 1;
        }
        let descends = match &decl.ty {
            TypeKind::Record(_) => true,
            TypeKind::Sequence { element } => matches!(element.as_ref(), TypeKind::Record(_)),
            _ => false,
        };
        if descends {
            self.nested += 1;
        }
    }

    fn omitted(&mut self, _decl: &FieldDecl, depth: usize) {
        self.omitted += 1;
        self.max_depth = self.max_depth.max(depth);
    }
}

/// Extracts flat, dotted field lists from schema descriptions
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    skip_marker: String,
}

impl FieldExtractor {
    /// Create an extractor using the default skip marker
    pub fn new() -> Self {
        Self {
            skip_marker: DEFAULT_SKIP_MARKER.to_string(),
        }
    }

    /// Use a different skip marker
    pub fn with_skip_marker(mut self, marker: impl Into<String>) -> Self {
        self.skip_marker = marker.into();
        self
    }

    pub fn skip_marker(&self) -> &str {
        &self.skip_marker
    }

    /// Extract the fields of any type kind; fails unless it is a record
    pub fn extract(&self, prefix: &str, schema_type: &TypeKind) -> Result<Vec<Field>> {
        match schema_type {
            TypeKind::Record(record) => Ok(self.extract_record(prefix, record)),
            other => Err(CoverageError::ContractViolation {
                operation: "extract",
                found: other.to_string(),
            }),
        }
    }

    /// Extract the fields of a record
    pub fn extract_record(&self, prefix: &str, record: &RecordType) -> Vec<Field> {
        let mut collector = FieldCollector::new();
        walk_record(prefix, record, &self.skip_marker, &mut collector);
        let fields = collector.into_fields();
        debug!(record = %record.name, prefix, count = fields.len(), "extracted fields");
        fields
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract with the default skip marker; fails unless `schema_type` is a record
pub fn extract(prefix: &str, schema_type: &TypeKind) -> Result<Vec<Field>> {
    FieldExtractor::new().extract(prefix, schema_type)
}

/// Extract a record with the default skip marker
pub fn extract_record(prefix: &str, record: &RecordType) -> Vec<Field> {
    FieldExtractor::new().extract_record(prefix, record)
}
