//! Schema description types
//!
//! A language-neutral description of a record type: an ordered list of declared
//! fields, each with an optional serialization tag and a type kind. Descriptions
//! can be built in code or loaded from JSON:
//!
//! ```json
//! {
//!   "name": "Process",
//!   "fields": [
//!     { "name": "Terminal", "tag": "terminal,omitempty", "type": { "kind": "scalar", "scalar": "bool" } },
//!     { "name": "Args", "tag": "args", "type": { "kind": "sequence", "element": { "kind": "scalar" } } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::Result;

/// Scalar leaf kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    Bool,
    Int,
    Uint,
    Float,
    #[default]
    String,
}

/// Kinds the extractor never descends into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtherKind {
    Map,
    Pointer,
    Function,
    Channel,
    Interface,
    Complex,
    Array,
    UnsafePointer,
}

/// Type of a declared field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeKind {
    /// Scalar leaf (bool, number, string)
    Scalar {
        #[serde(default)]
        scalar: ScalarKind,
    },
    /// Nested record
    Record(RecordType),
    /// Sequence of some element type
    Sequence { element: Box<TypeKind> },
    /// Map, pointer, function, channel and friends
    Other { other: OtherKind },
}

impl TypeKind {
    pub fn scalar(kind: ScalarKind) -> Self {
        TypeKind::Scalar { scalar: kind }
    }

    pub fn string() -> Self {
        Self::scalar(ScalarKind::String)
    }

    pub fn record(record: RecordType) -> Self {
        TypeKind::Record(record)
    }

    pub fn sequence_of(element: TypeKind) -> Self {
        TypeKind::Sequence {
            element: Box::new(element),
        }
    }

    pub fn other(kind: OtherKind) -> Self {
        TypeKind::Other { other: kind }
    }

    /// The record behind this kind, if it is one
    pub fn as_record(&self) -> Option<&RecordType> {
        match self {
            TypeKind::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Short kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeKind::Scalar { .. } => "scalar",
            TypeKind::Record(_) => "record",
            TypeKind::Sequence { .. } => "sequence",
            TypeKind::Other { other } => other.kind_name(),
        }
    }
}

impl OtherKind {
    pub fn kind_name(&self) -> &'static str {
        match self {
            OtherKind::Map => "map",
            OtherKind::Pointer => "pointer",
            OtherKind::Function => "function",
            OtherKind::Channel => "channel",
            OtherKind::Interface => "interface",
            OtherKind::Complex => "complex",
            OtherKind::Array => "array",
            OtherKind::UnsafePointer => "unsafe_pointer",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Scalar { scalar } => write!(f, "scalar({:?})", scalar),
            TypeKind::Record(record) => write!(f, "record({})", record.name),
            TypeKind::Sequence { element } => write!(f, "sequence({})", element),
            TypeKind::Other { other } => f.write_str(other.kind_name()),
        }
    }
}

/// A record type: an ordered list of declared fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordType {
    /// Type name, informational only
    pub name: String,
    /// Declared fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldDecl>,
}

impl RecordType {
    /// Create an empty record
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a declared field (builder style)
    pub fn field(mut self, decl: FieldDecl) -> Self {
        self.fields.push(decl);
        self
    }

    /// Parse a record description from JSON text
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a record description from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// A single declared field of a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Declared (source) name of the field
    pub name: String,
    /// Raw serialization tag, e.g. `"ociVersion,omitempty"` or `"-"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Type of the field
    #[serde(rename = "type")]
    pub ty: TypeKind,
}

impl FieldDecl {
    /// Declare a tagged field
    pub fn new(name: impl Into<String>, tag: impl Into<String>, ty: TypeKind) -> Self {
        Self {
            name: name.into(),
            tag: Some(tag.into()),
            ty,
        }
    }

    /// Declare a field without any serialization tag
    pub fn untagged(name: impl Into<String>, ty: TypeKind) -> Self {
        Self {
            name: name.into(),
            tag: None,
            ty,
        }
    }

    /// Serialization name from the tag; `None` when untagged or the name part is empty
    pub fn serialization_name(&self) -> Option<&str> {
        let (name, _) = parse_tag(self.tag.as_deref()?);
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Options following the serialization name
    pub fn options(&self) -> TagOptions<'_> {
        self.tag
            .as_deref()
            .map(|tag| parse_tag(tag).1)
            .unwrap_or_default()
    }
}

/// The comma-separated options following a tag's name, without the leading comma
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagOptions<'a>(&'a str);

impl<'a> TagOptions<'a> {
    /// Raw option text
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the option list contains `option` exactly, bounded by commas
    pub fn contains(&self, option: &str) -> bool {
        !self.0.is_empty() && self.0.split(',').any(|o| o == option)
    }
}

/// Split a serialization tag into its name and options
pub fn parse_tag(tag: &str) -> (&str, TagOptions<'_>) {
    match tag.split_once(',') {
        Some((name, options)) => (name, TagOptions(options)),
        None => (tag, TagOptions::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tag() {
        let (name, opts) = parse_tag("ociVersion,omitempty");
        assert_eq!(name, "ociVersion");
        assert!(opts.contains("omitempty"));
        assert!(!opts.contains("omit"));

        let (name, opts) = parse_tag("hostname");
        assert_eq!(name, "hostname");
        assert!(opts.is_empty());
        assert!(!opts.contains(""));
    }

    #[test]
    fn test_tag_options_multiple() {
        let (_, opts) = parse_tag("uid,string,omitempty");
        assert!(opts.contains("string"));
        assert!(opts.contains("omitempty"));
        assert_eq!(opts.as_str(), "string,omitempty");
    }

    #[test]
    fn test_serialization_name() {
        assert_eq!(
            FieldDecl::new("Version", "ociVersion,omitempty", TypeKind::string())
                .serialization_name(),
            Some("ociVersion")
        );
        assert_eq!(FieldDecl::untagged("Spec", TypeKind::string()).serialization_name(), None);
        assert_eq!(
            FieldDecl::new("Anon", ",omitempty", TypeKind::string()).serialization_name(),
            None
        );
        assert!(FieldDecl::untagged("Spec", TypeKind::string()).options().is_empty());
    }

    #[test]
    fn test_record_from_json() {
        let record = RecordType::from_json_str(
            r#"{
                "name": "Process",
                "fields": [
                    { "name": "Terminal", "tag": "terminal", "type": { "kind": "scalar", "scalar": "bool" } },
                    { "name": "Args", "tag": "args", "type": { "kind": "sequence", "element": { "kind": "scalar" } } },
                    { "name": "User", "tag": "user", "type": { "kind": "record", "name": "User", "fields": [] } },
                    { "name": "Env", "type": { "kind": "other", "other": "map" } }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(record.fields.len(), 4);
        assert_eq!(record.fields[0].ty, TypeKind::scalar(ScalarKind::Bool));
        assert_eq!(record.fields[1].ty, TypeKind::sequence_of(TypeKind::string()));
        assert_eq!(record.fields[2].ty.as_record().map(|r| r.name.as_str()), Some("User"));
        assert_eq!(record.fields[3].ty.kind_name(), "map");
        assert!(record.fields[3].tag.is_none());
    }

    #[test]
    fn test_type_kind_display() {
        let ty = TypeKind::sequence_of(TypeKind::record(RecordType::new("Mount")));
        assert_eq!(ty.to_string(), "sequence(record(Mount))");
    }
}
