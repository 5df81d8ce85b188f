// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ClassifierThresholds, RecommendationQuery, RecommendedTree, ScoreSet, SuitabilityBand,
    SuitabilityLabel, TreeRecord,
};
pub use requests::RecommendRequest;
pub use responses::{
    ChartEntry, ChartResponse, ErrorResponse, HealthResponse, RecommendResponse, UploadResponse,
};
