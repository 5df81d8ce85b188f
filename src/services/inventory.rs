use crate::models::{RecommendedTree, SuitabilityLabel, TreeRecord};
use serde::Serialize;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur loading or exporting an inventory
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required columns: {0}")]
    MissingColumns(String),
}

/// Columns every inventory file must carry
///
/// Extra columns (e.g. a precomputed Suitability_Label) are tolerated and
/// ignored; the classifier derives the label itself.
const REQUIRED_COLUMNS: &[&str] = &[
    "Genus",
    "Species",
    "Scientific Name",
    "Street Name And Number",
    "Environmental_Score",
    "Health_Score",
    "Suitability_Score",
    "Canopy_Score",
    "Stability_Score",
];

/// Columns of an exported recommendation file, in output order
const EXPORT_COLUMNS: &[&str] = &[
    "Genus",
    "Species",
    "Scientific Name",
    "Street Name And Number",
    "Predicted_Suitability",
    "Suitability_Score",
    "Environmental_Score",
    "Health_Score",
    "Canopy_Score",
    "Stability_Score",
];

/// Load tree records from CSV
///
/// Fails before any classification if a required column is absent. Empty
/// score cells deserialize to `None` (NaN to the classifier); empty street
/// cells to `None`.
pub fn load_inventory<R: io::Read>(reader: R) -> Result<Vec<TreeRecord>, InventoryError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(InventoryError::MissingColumns(missing.join(", ")));
    }

    let mut records = Vec::new();
    for row in csv_reader.deserialize() {
        records.push(row?);
    }

    tracing::debug!("Loaded {} inventory records", records.len());
    Ok(records)
}

/// Load tree records from a CSV file on disk
pub fn load_inventory_file<P: AsRef<Path>>(path: P) -> Result<Vec<TreeRecord>, InventoryError> {
    let file = std::fs::File::open(path)?;
    load_inventory(io::BufReader::new(file))
}

/// CSV row of an exported recommendation
///
/// Column names match the source inventory format so exports can be diffed
/// against or re-imported into it.
#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    genus: &'a str,
    species: &'a str,
    scientific_name: &'a str,
    street: Option<&'a str>,
    predicted_suitability: SuitabilityLabel,
    suitability_score: f64,
    environmental_score: f64,
    health_score: f64,
    canopy_score: f64,
    stability_score: f64,
}

impl<'a> From<&'a RecommendedTree> for ExportRow<'a> {
    fn from(tree: &'a RecommendedTree) -> Self {
        Self {
            genus: &tree.genus,
            species: &tree.species,
            scientific_name: &tree.scientific_name,
            street: tree.street.as_deref(),
            predicted_suitability: tree.predicted_suitability,
            suitability_score: tree.suitability_score,
            environmental_score: tree.environmental_score,
            health_score: tree.health_score,
            canopy_score: tree.canopy_score,
            stability_score: tree.stability_score,
        }
    }
}

/// Serialize a recommendation result as CSV bytes
///
/// The header row is written even for an empty result, so a zero-match
/// export is still a well-formed file.
pub fn write_recommendations_csv(trees: &[RecommendedTree]) -> Result<Vec<u8>, InventoryError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_COLUMNS)?;
    for tree in trees {
        writer.serialize(ExportRow::from(tree))?;
    }
    writer.flush()?;

    writer
        .into_inner()
        .map_err(|e| InventoryError::Io(e.into_error()))
}

/// Deterministic export file name derived from the location query
///
/// Every non-alphanumeric character collapses to an underscore.
pub fn export_file_name(location_query: &str) -> String {
    let slug: String = location_query
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("recommendation_for_{}.csv", slug)
}
