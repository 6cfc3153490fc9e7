//! Field weights and per-field score breakdowns.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn default_synopsis_weight() -> f64 {
    0.6
}

fn default_title_weight() -> f64 {
    0.2
}

fn default_author_weight() -> f64 {
    0.2
}

/// Relative importance of each text field in the blended score.
///
/// Defaults favor the synopsis (0.6) over title and author (0.2 each).
/// Weights are applied as given and are not required to sum to 1.0;
/// when they do, the blended total stays on the same percent scale as
/// the per-field scores. Callers that rely on that reading can enforce
/// it with [`FieldWeights::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldWeights {
    /// Weight of the synopsis similarity score
    #[serde(default = "default_synopsis_weight")]
    pub synopsis: f64,
    /// Weight of the title similarity score
    #[serde(default = "default_title_weight")]
    pub title: f64,
    /// Weight of the author similarity score
    #[serde(default = "default_author_weight")]
    pub author: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            synopsis: default_synopsis_weight(),
            title: default_title_weight(),
            author: default_author_weight(),
        }
    }
}

impl FieldWeights {
    /// Create weights in synopsis, title, author order.
    pub fn new(synopsis: f64, title: f64, author: f64) -> Self {
        Self {
            synopsis,
            title,
            author,
        }
    }

    /// Sum of all field weights.
    #[inline]
    #[must_use]
    pub fn total(&self) -> f64 {
        self.synopsis + self.title + self.author
    }

    /// Opt-in sanity check: every weight must be finite and
    /// non-negative, and the total must be 1.0 within tolerance, so
    /// that blended totals read as percentages.
    pub fn validate(&self) -> Result<()> {
        for (field, weight) in [
            ("synopsis", self.synopsis),
            ("title", self.title),
            ("author", self.author),
        ] {
            if !weight.is_finite() {
                return Err(Error::InvalidWeights(format!(
                    "field '{}' has non-finite weight",
                    field
                )));
            }
            if weight < 0.0 {
                return Err(Error::InvalidWeights(format!(
                    "field '{}' has negative weight {}",
                    field, weight
                )));
            }
        }

        let total = self.total();
        if total <= 0.0 {
            return Err(Error::InvalidWeights(
                "total weight cannot be zero".to_string(),
            ));
        }
        if (total - 1.0).abs() > 1e-6 {
            return Err(Error::InvalidWeights(format!(
                "weights sum to {} instead of 1.0",
                total
            )));
        }

        Ok(())
    }

    /// Blend per-field scores into a single total.
    #[inline]
    #[must_use]
    pub fn combine(&self, scores: &FieldScores) -> f64 {
        scores.synopsis * self.synopsis + scores.title * self.title + scores.author * self.author
    }
}

/// Unweighted per-field similarity scores for one candidate, each on
/// the percent scale `[0.0, 100.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldScores {
    /// Synopsis similarity
    pub synopsis: f64,
    /// Title similarity
    pub title: f64,
    /// Author similarity
    pub author: f64,
}

impl FieldScores {
    /// Create scores in synopsis, title, author order.
    pub fn new(synopsis: f64, title: f64, author: f64) -> Self {
        Self {
            synopsis,
            title,
            author,
        }
    }
}
