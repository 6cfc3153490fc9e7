//! Ordering and truncation of scored candidates.

use readalike_core::RecordId;

use crate::error::{Error, Result};
use crate::explain::Recommendation;

/// Rank scored candidates for presentation.
///
/// Drops the selected record, sorts by blended score descending, and
/// keeps the top `limit`. The sort is stable: candidates with equal
/// scores keep their dataset order. Returns fewer than `limit`
/// results when fewer candidates exist; a `limit` of zero is an
/// error.
pub fn rank(
    mut candidates: Vec<Recommendation>,
    selected: &RecordId,
    limit: usize,
) -> Result<Vec<Recommendation>> {
    if limit == 0 {
        return Err(Error::InvalidLimit(limit));
    }

    candidates.retain(|candidate| &candidate.id != selected);
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates.truncate(limit);

    Ok(candidates)
}
