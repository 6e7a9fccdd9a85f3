//! Near-miss suggestions for unsupported fields
//!
//! Follows the same lock-step walk as [`crate::compare::compare`]. Wherever a
//! reference name has no exact match, the best fuzzy match among the candidate's
//! names at that level is proposed. Names are scored on their last segment, so
//! flattened, fully qualified trees score the same as bare-name trees.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

use crate::field::Field;

/// Default minimum score for a suggestion to be reported
pub const DEFAULT_MIN_SCORE: i64 = 50;

/// A candidate name that probably means the same as an unsupported reference name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The unsupported reference name
    pub unsupported: String,
    /// Closest candidate name at the same level
    pub candidate: String,
    /// Matcher score, higher is closer
    pub score: i64,
}

/// Suggest candidate names for every unsupported reference name
pub fn suggest(reference: &[Field], candidate: &[Field], min_score: i64) -> Vec<Suggestion> {
    let matcher = SkimMatcherV2::default().ignore_case();
    let mut suggestions = Vec::new();
    suggest_level(&matcher, reference, candidate, min_score, &mut suggestions);
    suggestions
}

fn suggest_level(
    matcher: &SkimMatcherV2,
    reference: &[Field],
    candidate: &[Field],
    min_score: i64,
    suggestions: &mut Vec<Suggestion>,
) {
    for fs in reference {
        if let Some(fr) = candidate.iter().find(|fr| fr.name == fs.name) {
            suggest_level(matcher, &fs.children, &fr.children, min_score, suggestions);
            continue;
        }

        let best = candidate
            .iter()
            .filter(|fr| !reference.iter().any(|r| r.name == fr.name))
            .filter_map(|fr| {
                let (wanted, offered) = (fs.local_name(), fr.local_name());
                let score = matcher
                    .fuzzy_match(offered, wanted)
                    .max(matcher.fuzzy_match(wanted, offered))?;
                Some((score, fr))
            })
            .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.name.cmp(&a.1.name)));

        if let Some((score, fr)) = best {
            if score >= min_score {
                suggestions.push(Suggestion {
                    unsupported: fs.name.clone(),
                    candidate: fr.name.clone(),
                    score,
                });
            }
        }
    }
}
