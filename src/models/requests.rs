use crate::models::{RecommendationQuery, SuitabilityLabel};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to compute recommendations for a session
///
/// The three minimums mirror the dashboard sliders and must stay in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub labels: Option<Vec<SuitabilityLabel>>,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(alias = "min_stability", rename = "minStability", default)]
    pub min_stability: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(alias = "min_environmental", rename = "minEnvironmental", default)]
    pub min_environmental: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(alias = "min_health", rename = "minHealth", default)]
    pub min_health: f64,
}

impl From<RecommendRequest> for RecommendationQuery {
    fn from(req: RecommendRequest) -> Self {
        RecommendationQuery {
            location: req.location,
            labels: req.labels,
            min_stability: req.min_stability,
            min_environmental: req.min_environmental,
            min_health: req.min_health,
        }
    }
}
