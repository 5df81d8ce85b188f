//! One-shot console recommendation flow.
//!
//! Loads a tree inventory CSV, takes a street name (argument or prompt),
//! prints the recommended trees and saves the full set as
//! `recommendation_for_<query>.csv` in the current directory.
//!
//! Run: cargo run --bin arbor-batch -- <inventory.csv> [location]

use arbor_algo::core::Recommender;
use arbor_algo::models::RecommendationQuery;
use arbor_algo::services::{export_file_name, load_inventory_file, write_recommendations_csv};
use std::io::{self, BufRead, Write};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: arbor-batch <inventory.csv> [location]")?;
    let location = match args.next() {
        Some(location) => location,
        None => prompt_location()?,
    };

    let records = load_inventory_file(&path)?;

    let recommender = Recommender::with_default_thresholds();
    let query = RecommendationQuery {
        location: location.clone(),
        ..RecommendationQuery::default()
    };
    let result = recommender.recommend(&records, &query);

    println!(
        "\nFound {} trees for location '{}':\n",
        result.location_matches, location
    );

    println!("Top Recommended Trees:");
    for tree in result.trees.iter().take(5) {
        println!(
            "  {} {} - {} ({:.2})",
            tree.genus, tree.species, tree.predicted_suitability, tree.suitability_score
        );
    }

    let file_name = export_file_name(&location);
    std::fs::write(&file_name, write_recommendations_csv(&result.trees)?)?;
    println!("\nSaved to {file_name}");

    for tree in &result.trees {
        println!("\n-----------------------------");
        println!("Genus: {}, Species: {}", tree.genus, tree.species);
        println!("Predicted Suitability: {}", tree.predicted_suitability);
        println!("Suitability Score: {:.2}", tree.suitability_score);
        println!("Environmental Score: {:.2}", tree.environmental_score);
        println!("Health Score: {:.2}", tree.health_score);
        println!("Stability Score: {:.2}", tree.stability_score);
        println!("Canopy Score: {:.2}", tree.canopy_score);
    }

    Ok(())
}

fn prompt_location() -> io::Result<String> {
    print!("Enter a street name (e.g., Jalan Perda Utama): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
