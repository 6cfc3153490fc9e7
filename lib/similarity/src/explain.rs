//! Ranked results with per-field score breakdowns.

use serde::Serialize;

use readalike_core::RecordId;

use crate::weights::{FieldScores, FieldWeights};

/// One ranked recommendation.
///
/// `score` is the weighted blend of the per-field scores; with
/// weights summing to 1.0 it stays on the percent scale. `fields`
/// carries the unweighted per-field scores so callers can show why a
/// record was recommended.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Id of the recommended record
    pub id: RecordId,
    /// Blended total score
    pub score: f64,
    /// Unweighted per-field similarity scores
    pub fields: FieldScores,
}

/// Summary statistics over one recommendation query.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationStats {
    /// Candidates scored (dataset size minus the selected record)
    pub candidates: usize,
    /// Results returned after ranking and truncation
    pub returned: usize,
    /// Highest blended score among returned results
    pub best_score: f64,
    /// Mean blended score among returned results
    pub avg_score: f64,
    /// Field contributing the most weighted score to the best result
    pub top_field: Option<&'static str>,
}

impl RecommendationStats {
    /// Summarize ranked `results`; `candidates` is the number of
    /// records that were scored before truncation.
    #[must_use]
    pub fn compute(results: &[Recommendation], candidates: usize, weights: &FieldWeights) -> Self {
        if results.is_empty() {
            return Self {
                candidates,
                returned: 0,
                best_score: 0.0,
                avg_score: 0.0,
                top_field: None,
            };
        }

        let best = &results[0];
        let sum: f64 = results.iter().map(|r| r.score).sum();

        Self {
            candidates,
            returned: results.len(),
            best_score: best.score,
            avg_score: sum / results.len() as f64,
            top_field: top_field(&best.fields, weights),
        }
    }
}

/// Field with the largest weighted contribution to a blended score.
fn top_field(fields: &FieldScores, weights: &FieldWeights) -> Option<&'static str> {
    [
        ("synopsis", fields.synopsis * weights.synopsis),
        ("title", fields.title * weights.title),
        ("author", fields.author * weights.author),
    ]
    .iter()
    .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    .map(|&(name, _)| name)
}
