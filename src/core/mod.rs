// Core algorithm exports
pub mod classifier;
pub mod filters;
pub mod recommender;

pub use classifier::{classify, classify_scores};
pub use filters::{apply_refinement, matches_location, passes_refinement};
pub use recommender::{RecommendationResult, Recommender};
