use crate::models::domain::RecommendedTree;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response after uploading an inventory CSV
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(rename = "sessionId")]
    pub session_id: Uuid,
    #[serde(rename = "recordCount")]
    pub record_count: usize,
}

/// Response for the recommend endpoint
///
/// `location_matches` is the count after the location filter, before the
/// suitability gate (the "Found N trees" number).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub trees: Vec<RecommendedTree>,
    #[serde(rename = "locationMatches")]
    pub location_matches: usize,
    #[serde(rename = "totalRecords")]
    pub total_records: usize,
}

/// One bar of the top-N suitability chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartEntry {
    #[serde(rename = "scientificName")]
    pub scientific_name: String,
    #[serde(rename = "suitabilityScore")]
    pub suitability_score: f64,
}

/// Chart data response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    pub entries: Vec<ChartEntry>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
