use crate::models::{ClassifierThresholds, ScoreSet, SuitabilityBand, SuitabilityLabel};

/// Classify a tree by its five suitability scores
///
/// Bands are checked top-down, first match wins. All comparisons are
/// inclusive; canopy is the one inverted threshold (lower is better). A NaN
/// score fails every comparison, so a record with any missing score falls
/// through to `NotSuitable`.
pub fn classify_scores(scores: &ScoreSet, thresholds: &ClassifierThresholds) -> SuitabilityLabel {
    if within_band(scores, &thresholds.highly) {
        SuitabilityLabel::HighlySuitable
    } else if within_band(scores, &thresholds.moderately) {
        SuitabilityLabel::ModeratelySuitable
    } else {
        SuitabilityLabel::NotSuitable
    }
}

/// Classify bare scores against the default thresholds
///
/// Argument order follows the inventory's column order: environmental,
/// health, suitability, canopy, stability.
pub fn classify(
    environmental: f64,
    health: f64,
    suitability: f64,
    canopy: f64,
    stability: f64,
) -> SuitabilityLabel {
    let scores = ScoreSet {
        environmental,
        health,
        suitability,
        canopy,
        stability,
    };
    classify_scores(&scores, &ClassifierThresholds::default())
}

#[inline]
fn within_band(scores: &ScoreSet, band: &SuitabilityBand) -> bool {
    scores.suitability >= band.min_suitability
        && scores.environmental >= band.min_environmental
        && scores.health >= band.min_health
        && scores.canopy <= band.max_canopy
        && scores.stability >= band.min_stability
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highly_suitable_at_exact_boundaries() {
        // Every threshold at its inclusive boundary still qualifies
        assert_eq!(
            classify(0.4, 0.4, 0.42, 0.6, 0.35),
            SuitabilityLabel::HighlySuitable
        );
    }

    #[test]
    fn test_suitability_just_below_boundary_downgrades() {
        let label = classify(0.4, 0.4, 0.419, 0.6, 0.35);
        assert_eq!(label, SuitabilityLabel::ModeratelySuitable);
    }

    #[test]
    fn test_moderately_suitable_band() {
        assert_eq!(
            classify(0.3, 0.3, 0.3, 0.65, 0.3),
            SuitabilityLabel::ModeratelySuitable
        );
    }

    #[test]
    fn test_not_suitable() {
        assert_eq!(
            classify(0.0, 0.0, 0.0, 1.0, 0.0),
            SuitabilityLabel::NotSuitable
        );
    }

    #[test]
    fn test_canopy_is_inverted() {
        // Lowering canopy never downgrades the label
        let at_max = classify(0.4, 0.4, 0.42, 0.6, 0.35);
        let lower = classify(0.4, 0.4, 0.42, 0.1, 0.35);
        let zero = classify(0.4, 0.4, 0.42, 0.0, 0.35);
        assert_eq!(at_max, SuitabilityLabel::HighlySuitable);
        assert_eq!(lower, SuitabilityLabel::HighlySuitable);
        assert_eq!(zero, SuitabilityLabel::HighlySuitable);

        // Raising canopy past 0.6 downgrades to at most moderately
        let dense = classify(0.4, 0.4, 0.42, 0.61, 0.35);
        assert_eq!(dense, SuitabilityLabel::ModeratelySuitable);

        // Past 0.7 the moderately band fails too
        let overgrown = classify(0.4, 0.4, 0.42, 0.71, 0.35);
        assert_eq!(overgrown, SuitabilityLabel::NotSuitable);
    }

    #[test]
    fn test_nan_score_is_not_suitable() {
        assert_eq!(
            classify(0.9, 0.9, f64::NAN, 0.1, 0.9),
            SuitabilityLabel::NotSuitable
        );
        assert_eq!(
            classify(0.9, 0.9, 0.9, f64::NAN, 0.9),
            SuitabilityLabel::NotSuitable
        );
    }

    #[test]
    fn test_out_of_range_inputs_accepted() {
        // No bounds-checking: values outside [0, 1] are evaluated as-is
        assert_eq!(
            classify(2.0, 2.0, 2.0, -1.0, 2.0),
            SuitabilityLabel::HighlySuitable
        );
        assert_eq!(
            classify(-1.0, -1.0, -1.0, 0.0, -1.0),
            SuitabilityLabel::NotSuitable
        );
    }

    #[test]
    fn test_custom_thresholds() {
        let mut thresholds = ClassifierThresholds::default();
        thresholds.highly.min_suitability = 0.9;

        let scores = ScoreSet {
            environmental: 0.5,
            health: 0.5,
            suitability: 0.5,
            canopy: 0.3,
            stability: 0.5,
        };

        assert_eq!(
            classify_scores(&scores, &thresholds),
            SuitabilityLabel::ModeratelySuitable
        );
    }
}
