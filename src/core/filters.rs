use crate::models::{RecommendationQuery, RecommendedTree, TreeRecord};

/// Case-insensitive substring match on the street address
///
/// An empty query matches every record. A record without a street never
/// matches a non-empty query.
#[inline]
pub fn matches_location(record: &TreeRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    match record.street.as_deref() {
        Some(street) => street.to_lowercase().contains(&query.to_lowercase()),
        None => false,
    }
}

/// Secondary refinement predicate over an already-ranked tree
///
/// Keeps trees whose label is in the requested set and whose stability,
/// environmental and health scores clear the requested minimums. A `None`
/// label set keeps every label.
#[inline]
pub fn passes_refinement(tree: &RecommendedTree, query: &RecommendationQuery) -> bool {
    if let Some(labels) = &query.labels {
        if !labels.contains(&tree.predicted_suitability) {
            return false;
        }
    }

    tree.stability_score >= query.min_stability
        && tree.environmental_score >= query.min_environmental
        && tree.health_score >= query.min_health
}

/// Apply the secondary refinement to a ranked set
///
/// Pure filter, independent of the earlier pipeline stages: re-applying it
/// with the same query yields the same result as applying it once.
pub fn apply_refinement(
    ranked: &[RecommendedTree],
    query: &RecommendationQuery,
) -> Vec<RecommendedTree> {
    ranked
        .iter()
        .filter(|tree| passes_refinement(tree, query))
        .cloned()
        .collect()
}
