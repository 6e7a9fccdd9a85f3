//! Coverage reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::checksum::Checksum;
use crate::compare::{compare, format_names, ComparisonReport};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::field::Field;
use crate::suggest::{suggest, Suggestion};

/// Full result of comparing a reference tree against a candidate tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    /// When this report was generated
    pub generated_at: DateTime<Utc>,
    /// Checksum of the reference tree
    pub reference_checksum: Checksum,
    /// Checksum of the candidate tree
    pub candidate_checksum: Checksum,
    /// Supported and unsupported names
    #[serde(flatten)]
    pub comparison: ComparisonReport,
    /// Share of classified names that are supported
    pub coverage: f64,
    /// Near-miss candidates for unsupported names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
}

impl CoverageReport {
    /// Compare two trees and wrap the result.
    ///
    /// `min_suggestion_score` of `None` disables suggestions.
    pub fn build(
        reference: &[Field],
        candidate: &[Field],
        min_suggestion_score: Option<i64>,
    ) -> Self {
        let comparison = compare(reference, candidate);
        let suggestions = match min_suggestion_score {
            Some(min) if !comparison.is_fully_supported() => suggest(reference, candidate, min),
            _ => Vec::new(),
        };

        Self {
            generated_at: Utc::now(),
            reference_checksum: Checksum::of_fields(reference),
            candidate_checksum: Checksum::of_fields(candidate),
            coverage: comparison.coverage(),
            comparison,
            suggestions,
        }
    }

    /// Render in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        Ok(match format {
            OutputFormat::Text => self.to_string(),
            OutputFormat::Pretty => serde_json::to_string_pretty(self)?,
            OutputFormat::Compact => serde_json::to_string(self)?,
        })
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=======================================")?;
        writeln!(f, "support: {}", format_names(&self.comparison.supported))?;
        writeln!(f, "unsupport: {}", format_names(&self.comparison.unsupported))?;

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for s in &self.suggestions {
                writeln!(f, "  {} -> {} (score {})", s.unsupported, s.candidate, s.score)?;
            }
        }

        writeln!(f)?;
        write!(
            f,
            "coverage: {:.1}% ({} of {}), reference {} / candidate {}",
            self.coverage * 100.0,
            self.comparison.supported.len(),
            self.comparison.total(),
            self.reference_checksum.short(),
            self.candidate_checksum.short(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> Vec<Field> {
        vec![Field::leaf("hostname"), Field::leaf("root")]
    }

    fn candidate() -> Vec<Field> {
        vec![Field::leaf("root"), Field::leaf("hostName")]
    }

    #[test]
    fn test_build_report() {
        let report = CoverageReport::build(&reference(), &candidate(), Some(0));
        assert_eq!(report.comparison.supported, vec!["root".to_string()]);
        assert_eq!(report.comparison.unsupported, vec!["hostname".to_string()]);
        assert_eq!(report.coverage, 0.5);
        assert_eq!(report.suggestions.len(), 1);
        assert!(report.reference_checksum.verify(&reference()));
    }

    #[test]
    fn test_suggestions_disabled() {
        let report = CoverageReport::build(&reference(), &candidate(), None);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_text_render() {
        let report = CoverageReport::build(&reference(), &candidate(), None);
        let text = report.render(OutputFormat::Text).unwrap();
        assert!(text.contains("support: [root]\n"));
        assert!(text.contains("unsupport: [hostname]\n"));
        assert!(text.contains("coverage: 50.0% (1 of 2)"));
    }

    #[test]
    fn test_json_render_flattens_comparison() {
        let report = CoverageReport::build(&reference(), &candidate(), None);
        let json: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Compact).unwrap()).unwrap();
        assert_eq!(json["supported"], serde_json::json!(["root"]));
        assert_eq!(json["unsupported"], serde_json::json!(["hostname"]));
        assert!(json.get("suggestions").is_none());
    }
}
