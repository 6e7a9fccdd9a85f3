//! Checksums for field trees
//!
//! A field tree's checksum is the SHA256 of its depth-first name listing, so two
//! trees with the same names in the same order always hash alike.

use sha2::{Digest, Sha256};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::field::{Field, FieldListing};

/// SHA256 checksum of a field tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(String);

impl Checksum {
    /// Compute checksum from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Compute checksum of a field forest
    pub fn of_fields(fields: &[Field]) -> Self {
        Self::from_bytes(FieldListing(fields).to_string().as_bytes())
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for display
    pub fn short(&self) -> &str {
        self.0.get(..12).unwrap_or(&self.0)
    }

    /// Verify that a field forest matches this checksum
    pub fn verify(&self, fields: &[Field]) -> bool {
        *self == Self::of_fields(fields)
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
