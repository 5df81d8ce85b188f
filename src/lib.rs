//! Arbor Algo - Tree suitability recommendation service
//!
//! This library classifies trees in an urban tree inventory by suitability
//! using fixed threshold bands over five precomputed scores, and filters and
//! ranks the classified records by street location. The HTTP layer and the
//! batch binary are independent callers of the same pipeline.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{classify, classify_scores, RecommendationResult, Recommender};
pub use crate::models::{
    ClassifierThresholds, RecommendationQuery, RecommendedTree, ScoreSet, SuitabilityLabel,
    TreeRecord,
};
