//! Ranking of recommendations into a bounded list.

use crate::domain::Recommendation;

/// List size when the config does not say otherwise.
pub const DEFAULT_LIST_SIZE: usize = 20;

/// Sort by score descending, ties broken by symbol ascending, then
/// truncate to `limit`. The tie-break makes the ordering total, so the
/// result is independent of input order.
pub fn rank(mut recs: Vec<Recommendation>, limit: usize) -> Vec<Recommendation> {
    recs.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
    recs.truncate(limit);
    recs
}
