use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of the urban tree inventory
///
/// Field renames match the source CSV column names. Score cells may be
/// empty; they deserialize to `None` and surface as NaN via [`scores`],
/// which makes the record fail every threshold band.
///
/// [`scores`]: TreeRecord::scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeRecord {
    #[serde(rename = "Scientific Name", default)]
    pub scientific_name: String,
    #[serde(rename = "Genus", default)]
    pub genus: String,
    #[serde(rename = "Species", default)]
    pub species: String,
    #[serde(rename = "Street Name And Number", default)]
    pub street: Option<String>,
    #[serde(rename = "Environmental_Score", default)]
    pub environmental_score: Option<f64>,
    #[serde(rename = "Health_Score", default)]
    pub health_score: Option<f64>,
    #[serde(rename = "Suitability_Score", default)]
    pub suitability_score: Option<f64>,
    #[serde(rename = "Canopy_Score", default)]
    pub canopy_score: Option<f64>,
    #[serde(rename = "Stability_Score", default)]
    pub stability_score: Option<f64>,
}

impl TreeRecord {
    /// The five classifier inputs, with missing cells mapped to NaN
    pub fn scores(&self) -> ScoreSet {
        ScoreSet {
            environmental: self.environmental_score.unwrap_or(f64::NAN),
            health: self.health_score.unwrap_or(f64::NAN),
            suitability: self.suitability_score.unwrap_or(f64::NAN),
            canopy: self.canopy_score.unwrap_or(f64::NAN),
            stability: self.stability_score.unwrap_or(f64::NAN),
        }
    }
}

/// The five suitability scores of a tree, nominally in [0, 1]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreSet {
    pub environmental: f64,
    pub health: f64,
    pub suitability: f64,
    pub canopy: f64,
    pub stability: f64,
}

/// Classifier output label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuitabilityLabel {
    #[serde(rename = "Highly Suitable")]
    HighlySuitable,
    #[serde(rename = "Moderately Suitable")]
    ModeratelySuitable,
    #[serde(rename = "Not Suitable")]
    NotSuitable,
}

impl SuitabilityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuitabilityLabel::HighlySuitable => "Highly Suitable",
            SuitabilityLabel::ModeratelySuitable => "Moderately Suitable",
            SuitabilityLabel::NotSuitable => "Not Suitable",
        }
    }

    /// Whether the label passes the recommendation pipeline's suitability gate
    pub fn is_recommendable(&self) -> bool {
        !matches!(self, SuitabilityLabel::NotSuitable)
    }
}

impl fmt::Display for SuitabilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One threshold band of the classifier
///
/// All comparisons are inclusive. Canopy is the single inverted threshold:
/// lower is better, so it carries a maximum instead of a minimum.
#[derive(Debug, Clone, Copy)]
pub struct SuitabilityBand {
    pub min_suitability: f64,
    pub min_environmental: f64,
    pub min_health: f64,
    pub max_canopy: f64,
    pub min_stability: f64,
}

/// Classifier thresholds: the two bands checked top-down
#[derive(Debug, Clone, Copy)]
pub struct ClassifierThresholds {
    pub highly: SuitabilityBand,
    pub moderately: SuitabilityBand,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            highly: SuitabilityBand {
                min_suitability: 0.42,
                min_environmental: 0.4,
                min_health: 0.4,
                max_canopy: 0.6,
                min_stability: 0.35,
            },
            moderately: SuitabilityBand {
                min_suitability: 0.28,
                min_environmental: 0.25,
                min_health: 0.25,
                max_canopy: 0.7,
                min_stability: 0.25,
            },
        }
    }
}

/// Filter state driving one run of the recommendation pipeline
///
/// `labels: None` keeps every label present in the ranked set, matching an
/// untouched multiselect. The three minimums default to 0.0 (sliders at
/// their leftmost position).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationQuery {
    pub location: String,
    pub labels: Option<Vec<SuitabilityLabel>>,
    pub min_stability: f64,
    pub min_environmental: f64,
    pub min_health: f64,
}

impl Default for RecommendationQuery {
    fn default() -> Self {
        Self {
            location: String::new(),
            labels: None,
            min_stability: 0.0,
            min_environmental: 0.0,
            min_health: 0.0,
        }
    }
}

/// One recommended tree: a classified inventory row that survived the gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedTree {
    #[serde(rename = "scientificName")]
    pub scientific_name: String,
    pub genus: String,
    pub species: String,
    pub street: Option<String>,
    #[serde(rename = "predictedSuitability")]
    pub predicted_suitability: SuitabilityLabel,
    #[serde(rename = "suitabilityScore")]
    pub suitability_score: f64,
    #[serde(rename = "environmentalScore")]
    pub environmental_score: f64,
    #[serde(rename = "healthScore")]
    pub health_score: f64,
    #[serde(rename = "canopyScore")]
    pub canopy_score: f64,
    #[serde(rename = "stabilityScore")]
    pub stability_score: f64,
}

impl RecommendedTree {
    pub fn from_record(record: &TreeRecord, scores: ScoreSet, label: SuitabilityLabel) -> Self {
        Self {
            scientific_name: record.scientific_name.clone(),
            genus: record.genus.clone(),
            species: record.species.clone(),
            street: record.street.clone(),
            predicted_suitability: label,
            suitability_score: scores.suitability,
            environmental_score: scores.environmental,
            health_score: scores.health,
            canopy_score: scores.canopy,
            stability_score: scores.stability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_scores_become_nan() {
        let record = TreeRecord {
            scientific_name: "Ficus benjamina".to_string(),
            genus: "Ficus".to_string(),
            species: "benjamina".to_string(),
            street: None,
            environmental_score: Some(0.5),
            health_score: None,
            suitability_score: Some(0.5),
            canopy_score: Some(0.3),
            stability_score: Some(0.5),
        };

        let scores = record.scores();
        assert!(scores.health.is_nan());
        assert_eq!(scores.environmental, 0.5);
    }

    #[test]
    fn test_label_round_trip() {
        let json = serde_json::to_string(&SuitabilityLabel::HighlySuitable).unwrap();
        assert_eq!(json, "\"Highly Suitable\"");

        let label: SuitabilityLabel = serde_json::from_str("\"Not Suitable\"").unwrap();
        assert_eq!(label, SuitabilityLabel::NotSuitable);
    }

    #[test]
    fn test_default_thresholds() {
        let thresholds = ClassifierThresholds::default();
        assert_eq!(thresholds.highly.min_suitability, 0.42);
        assert_eq!(thresholds.highly.max_canopy, 0.6);
        assert_eq!(thresholds.moderately.min_suitability, 0.28);
        assert_eq!(thresholds.moderately.min_stability, 0.25);
    }
}
