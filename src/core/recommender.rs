use crate::core::{
    classifier::classify_scores,
    filters::{apply_refinement, matches_location},
};
use crate::models::{ClassifierThresholds, RecommendationQuery, RecommendedTree, TreeRecord};

/// Result of the recommendation pipeline
///
/// A view over the input table, recomputed fresh on every query change.
/// `location_matches` counts the records surviving the location filter,
/// before the suitability gate.
#[derive(Debug)]
pub struct RecommendationResult {
    pub trees: Vec<RecommendedTree>,
    pub location_matches: usize,
    pub total_records: usize,
}

/// Recommendation orchestrator - implements the four-stage pipeline
///
/// # Pipeline Stages
/// 1. Location substring filter
/// 2. Classification + suitability gate
/// 3. Ranking by suitability score, descending
/// 4. Secondary refinement (label set + score minimums)
#[derive(Debug, Clone)]
pub struct Recommender {
    thresholds: ClassifierThresholds,
}

impl Recommender {
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn with_default_thresholds() -> Self {
        Self {
            thresholds: ClassifierThresholds::default(),
        }
    }

    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    /// Run the full pipeline over an inventory table
    ///
    /// Every stage is a total filter: empty input, zero matches and an empty
    /// query are all valid and produce an empty or full result, never an
    /// error. Labels are derived from the scores on every run, never cached
    /// on the records.
    pub fn recommend(
        &self,
        records: &[TreeRecord],
        query: &RecommendationQuery,
    ) -> RecommendationResult {
        let total_records = records.len();

        // Stage 1: location substring filter
        let located: Vec<&TreeRecord> = records
            .iter()
            .filter(|record| matches_location(record, &query.location))
            .collect();
        let location_matches = located.len();

        // Stage 2: classify and keep recommendable labels
        let mut ranked: Vec<RecommendedTree> = located
            .into_iter()
            .filter_map(|record| {
                let scores = record.scores();
                let label = classify_scores(&scores, &self.thresholds);
                label
                    .is_recommendable()
                    .then(|| RecommendedTree::from_record(record, scores, label))
            })
            .collect();

        // Stage 3: rank by suitability score, descending. Vec::sort_by is
        // stable, so ties keep their input order.
        ranked.sort_by(|a, b| {
            b.suitability_score
                .partial_cmp(&a.suitability_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // Stage 4: secondary refinement from the query
        let trees = apply_refinement(&ranked, query);

        RecommendationResult {
            trees,
            location_matches,
            total_records,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_thresholds()
    }
}
