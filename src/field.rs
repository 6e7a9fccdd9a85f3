//! Field tree types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::Result;

/// Separator between the local names of a qualified field name
pub const NAME_SEPARATOR: char = '.';

/// A single named node in a field tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    /// Qualified dotted name (e.g., "process.user.uid")
    pub name: String,
    /// Fields declared directly under this one; empty for leaves
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Field>,
}

impl Field {
    /// Create a leaf field
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Create a field with children
    pub fn with_children(name: impl Into<String>, children: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Qualify `local` under `prefix`; an empty prefix yields `local` unchanged
    pub fn qualify(prefix: &str, local: &str) -> String {
        if prefix.is_empty() {
            local.to_string()
        } else {
            format!("{}{}{}", prefix, NAME_SEPARATOR, local)
        }
    }

    /// Last segment of the qualified name
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(NAME_SEPARATOR)
            .map(|(_, local)| local)
            .unwrap_or(&self.name)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        1 + count_nodes(&self.children)
    }
}

/// Total number of nodes in a forest
pub fn count_nodes(fields: &[Field]) -> usize {
    fields.iter().map(Field::node_count).sum()
}

/// Depth-first names of every node, parents before children
pub fn depth_first_names(fields: &[Field]) -> Vec<&str> {
    let mut names = Vec::with_capacity(fields.len());
    collect_names(fields, &mut names);
    names
}

fn collect_names<'a>(fields: &'a [Field], names: &mut Vec<&'a str>) {
    for field in fields {
        names.push(&field.name);
        collect_names(&field.children, names);
    }
}

/// Depth-first listing of a field forest, one name per line
pub struct FieldListing<'a>(pub &'a [Field]);

impl fmt::Display for FieldListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for name in depth_first_names(self.0) {
            writeln!(f, "{}", name)?;
        }
        Ok(())
    }
}

/// Parse a field forest from JSON text
pub fn fields_from_json_str(content: &str) -> Result<Vec<Field>> {
    Ok(serde_json::from_str(content)?)
}

/// Load a field forest from a JSON file
pub fn load_fields(path: impl AsRef<Path>) -> Result<Vec<Field>> {
    let content = std::fs::read_to_string(path)?;
    fields_from_json_str(&content)
}
