// Unit tests for Arbor Algo

use arbor_algo::core::{
    classifier::classify,
    filters::{apply_refinement, matches_location},
};
use arbor_algo::models::{
    RecommendationQuery, RecommendedTree, ScoreSet, SuitabilityLabel, TreeRecord,
};
use arbor_algo::services::inventory::export_file_name;

fn create_record(street: Option<&str>, scores: ScoreSet) -> TreeRecord {
    TreeRecord {
        scientific_name: "Samanea saman".to_string(),
        genus: "Samanea".to_string(),
        species: "saman".to_string(),
        street: street.map(|s| s.to_string()),
        environmental_score: Some(scores.environmental),
        health_score: Some(scores.health),
        suitability_score: Some(scores.suitability),
        canopy_score: Some(scores.canopy),
        stability_score: Some(scores.stability),
    }
}

fn mid_scores() -> ScoreSet {
    ScoreSet {
        environmental: 0.5,
        health: 0.5,
        suitability: 0.5,
        canopy: 0.3,
        stability: 0.5,
    }
}

#[test]
fn test_classify_boundary_is_highly_suitable() {
    assert_eq!(
        classify(0.4, 0.4, 0.42, 0.6, 0.35),
        SuitabilityLabel::HighlySuitable
    );
}

#[test]
fn test_classify_below_highly_boundary() {
    // Still clears the moderately band
    assert_eq!(
        classify(0.4, 0.4, 0.419, 0.6, 0.35),
        SuitabilityLabel::ModeratelySuitable
    );
}

#[test]
fn test_classify_floor_values() {
    assert_eq!(
        classify(0.0, 0.0, 0.0, 1.0, 0.0),
        SuitabilityLabel::NotSuitable
    );
}

#[test]
fn test_classify_moderately_band() {
    assert_eq!(
        classify(0.3, 0.3, 0.3, 0.65, 0.3),
        SuitabilityLabel::ModeratelySuitable
    );
}

#[test]
fn test_canopy_monotonicity() {
    // With the other four scores fixed at qualifying values, decreasing
    // canopy never downgrades the label
    let mut previous = classify(0.4, 0.4, 0.42, 0.6, 0.35);
    for canopy in [0.5, 0.4, 0.2, 0.0] {
        let label = classify(0.4, 0.4, 0.42, canopy, 0.35);
        assert_eq!(label, previous);
        previous = label;
    }

    // Increasing canopy past 0.6 downgrades to at most moderately
    assert_eq!(
        classify(0.4, 0.4, 0.42, 0.65, 0.35),
        SuitabilityLabel::ModeratelySuitable
    );
}

#[test]
fn test_location_match_case_insensitive() {
    let record = create_record(Some("Jalan Perda Utama"), mid_scores());

    assert!(matches_location(&record, "jalan perda"));
    assert!(matches_location(&record, "JALAN PERDA"));
    assert!(matches_location(&record, "perda utama"));
}

#[test]
fn test_location_match_missing_street() {
    let record = create_record(None, mid_scores());

    assert!(!matches_location(&record, "jalan"));
    assert!(matches_location(&record, ""));
}

#[test]
fn test_refinement_idempotent() {
    let trees: Vec<RecommendedTree> = [0.9, 0.5, 0.2]
        .iter()
        .map(|&stability| {
            let mut scores = mid_scores();
            scores.stability = stability;
            let record = create_record(Some("Jalan Perda Utama"), scores);
            RecommendedTree::from_record(&record, scores, SuitabilityLabel::ModeratelySuitable)
        })
        .collect();

    let query = RecommendationQuery {
        min_stability: 0.4,
        ..RecommendationQuery::default()
    };

    let once = apply_refinement(&trees, &query);
    let twice = apply_refinement(&once, &query);

    assert_eq!(once.len(), 2);
    assert_eq!(once.len(), twice.len());
}

#[test]
fn test_export_file_name_replaces_non_alphanumerics() {
    assert_eq!(
        export_file_name("Jalan Perda Utama"),
        "recommendation_for_Jalan_Perda_Utama.csv"
    );
    assert_eq!(
        export_file_name("Persiaran 5, Bayan"),
        "recommendation_for_Persiaran_5__Bayan.csv"
    );
}
