//! Field-tree comparison
//!
//! Diffs a reference tree (what a specification declares) against a candidate tree
//! (what an implementation supports) by name, level by level:
//!
//! - a reference field whose name appears among the candidate's fields at the same
//!   level is *supported*, and their children are compared in turn;
//! - otherwise it is *unsupported*, and its children are not enumerated.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

use crate::field::Field;

/// Names classified by a comparison, in walk order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Reference names matched in the candidate
    pub supported: Vec<String>,
    /// Reference names with no match at the same level of the candidate
    pub unsupported: Vec<String>,
}

impl ComparisonReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append another report's names after this one's
    pub fn merge(&mut self, other: ComparisonReport) {
        self.supported.extend(other.supported);
        self.unsupported.extend(other.unsupported);
    }

    /// Number of classified names
    pub fn total(&self) -> usize {
        self.supported.len() + self.unsupported.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Whether nothing was left unsupported
    pub fn is_fully_supported(&self) -> bool {
        self.unsupported.is_empty()
    }

    /// Share of classified names that are supported, in `[0, 1]`; 1 when empty
    pub fn coverage(&self) -> f64 {
        if self.is_empty() {
            1.0
        } else {
            self.supported.len() as f64 / self.total() as f64
        }
    }

    pub fn clear(&mut self) {
        self.supported.clear();
        self.unsupported.clear();
    }
}

/// Format names the way the summary lines print them: `[a b c]`
pub fn format_names(names: &[String]) -> String {
    format!("[{}]", names.join(" "))
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "support: {}", format_names(&self.supported))?;
        write!(f, "unsupport: {}", format_names(&self.unsupported))
    }
}

/// Compare `reference` against `candidate`, returning a fresh report
pub fn compare(reference: &[Field], candidate: &[Field]) -> ComparisonReport {
    let mut report = ComparisonReport::new();
    for fs in reference {
        match candidate.iter().find(|fr| fr.name == fs.name) {
            Some(fr) => {
                trace!(field = %fs.name, "supported");
                report.supported.push(fs.name.clone());
                report.merge(compare(&fs.children, &fr.children));
            }
            None => {
                trace!(field = %fs.name, "unsupported");
                report.unsupported.push(fs.name.clone());
            }
        }
    }
    report
}

/// Accumulating comparator.
///
/// Each [`FieldComparator::compare`] call appends to the same report, so repeated
/// comparisons concatenate until [`FieldComparator::reset`] is called.
#[derive(Debug, Clone, Default)]
pub struct FieldComparator {
    report: ComparisonReport,
}

impl FieldComparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare and append the results to the accumulated report
    pub fn compare(&mut self, reference: &[Field], candidate: &[Field]) -> &ComparisonReport {
        self.report.merge(compare(reference, candidate));
        &self.report
    }

    /// Accumulated report so far
    pub fn report(&self) -> &ComparisonReport {
        &self.report
    }

    /// Forget everything accumulated
    pub fn reset(&mut self) {
        self.report.clear();
    }

    pub fn into_report(self) -> ComparisonReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(name: &str, child: &str, grandchild: &str) -> Field {
        Field::with_children(name, vec![Field::with_children(child, vec![Field::leaf(grandchild)])])
    }

    fn reference() -> Vec<Field> {
        vec![tree("a", "a1", "a11"), tree("b", "b1", "b11")]
    }

    fn candidate() -> Vec<Field> {
        vec![tree("a", "a1", "a22"), tree("c", "c1", "c11")]
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_demo_pair() {
        let report = compare(&reference(), &candidate());
        assert_eq!(report.supported, strings(&["a", "a1"]));
        assert_eq!(report.unsupported, strings(&["a11", "b"]));
    }

    #[test]
    fn test_top_level_partition() {
        let report = compare(&reference(), &candidate());
        for field in reference() {
            let in_supported = report.supported.contains(&field.name);
            let in_unsupported = report.unsupported.contains(&field.name);
            assert!(in_supported ^ in_unsupported, "{} classified once", field.name);
        }
    }

    #[test]
    fn test_unmatched_parent_hides_descendants() {
        let report = compare(&reference(), &candidate());
        for hidden in ["b1", "b11"] {
            assert!(!report.supported.iter().any(|n| n == hidden));
            assert!(!report.unsupported.iter().any(|n| n == hidden));
        }
    }

    #[test]
    fn test_identical_trees_fully_supported() {
        let report = compare(&reference(), &reference());
        assert_eq!(report.supported, strings(&["a", "a1", "a11", "b", "b1", "b11"]));
        assert!(report.is_fully_supported());
        assert_eq!(report.coverage(), 1.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(compare(&[], &candidate()).is_empty());

        let report = compare(&reference(), &[]);
        assert!(report.supported.is_empty());
        assert_eq!(report.unsupported, strings(&["a", "b"]));
        assert_eq!(report.coverage(), 0.0);
    }

    #[test]
    fn test_first_match_wins() {
        let reference = vec![Field::with_children("a", vec![Field::leaf("x")])];
        let candidate = vec![
            Field::with_children("a", vec![Field::leaf("x")]),
            Field::with_children("a", vec![Field::leaf("y")]),
        ];
        let report = compare(&reference, &candidate);
        assert_eq!(report.supported, strings(&["a", "x"]));
        assert!(report.unsupported.is_empty());
    }

    #[test]
    fn test_accumulating_comparator_concatenates() {
        let mut comparator = FieldComparator::new();
        comparator.compare(&reference(), &candidate());
        let report = comparator.compare(&reference(), &candidate()).clone();

        assert_eq!(report.supported, strings(&["a", "a1", "a", "a1"]));
        assert_eq!(report.unsupported, strings(&["a11", "b", "a11", "b"]));
    }

    #[test]
    fn test_accumulating_comparator_reset() {
        let mut comparator = FieldComparator::new();
        comparator.compare(&reference(), &candidate());
        comparator.reset();
        assert!(comparator.report().is_empty());

        comparator.compare(&reference(), &candidate());
        assert_eq!(comparator.into_report(), compare(&reference(), &candidate()));
    }

    #[test]
    fn test_display() {
        let report = compare(&reference(), &candidate());
        assert_eq!(report.to_string(), "support: [a a1]\nunsupport: [a11 b]");
        assert_eq!(format_names(&[]), "[]");
    }
}
