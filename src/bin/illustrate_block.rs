//! Illustrate a block of customers from a profiles CSV
//!
//! Expects columns `age,gender,tobacco_use,short_term,intermediate,long_term,never`.
//! Rows that fail form validation are reported and skipped.

use anyhow::{Context, Result};
use clap::Parser;
use illustration_engine::customer::FormInput;
use illustration_engine::format::format_currency;
use illustration_engine::{IllustrationConfig, IllustrationInputs, Illustrator, ProductCatalog};
use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "illustrate_block", about = "Illustrate many customer profiles in parallel")]
struct Cli {
    /// Profiles CSV
    profiles: PathBuf,
    #[arg(long, help = "Product catalog JSON; defaults to the built-in catalog")]
    catalog: Option<PathBuf>,
    #[arg(long, help = "Illustration config JSON")]
    config: Option<PathBuf>,
    #[arg(long, help = "Write per-profile totals to this CSV")]
    output: Option<PathBuf>,
}

/// One profiles CSV row, kept as text so it goes through form validation
#[derive(Debug, Deserialize)]
struct ProfileRow {
    age: String,
    gender: String,
    tobacco_use: String,
    short_term: String,
    intermediate: String,
    long_term: String,
    never: String,
}

impl From<ProfileRow> for FormInput {
    fn from(row: ProfileRow) -> Self {
        FormInput {
            age: row.age,
            gender: row.gender,
            tobacco_use: row.tobacco_use,
            short_term: row.short_term,
            intermediate: row.intermediate,
            long_term: row.long_term,
            never: row.never,
        }
    }
}

#[derive(Debug, Serialize)]
struct OutputRow {
    row: usize,
    age: u32,
    total_investment: f64,
    total_return: f64,
    total_growth: f64,
}

fn load_profiles(path: &Path) -> Result<Vec<(usize, IllustrationInputs)>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut profiles = Vec::new();
    for (idx, record) in reader.deserialize::<ProfileRow>().enumerate() {
        let row_number = idx + 1;
        let row = record.with_context(|| format!("reading row {}", row_number))?;
        match FormInput::from(row).validate() {
            Ok(inputs) => profiles.push((row_number, inputs)),
            Err(errors) => {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                warn!("Skipping row {}: {}", row_number, messages.join("; "));
            }
        }
    }
    Ok(profiles)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    println!("Loading profiles from {}...", cli.profiles.display());
    let profiles = load_profiles(&cli.profiles)?;
    println!("Loaded {} profiles in {:?}", profiles.len(), start.elapsed());

    let catalog = match &cli.catalog {
        Some(path) => ProductCatalog::from_json_path(path)
            .with_context(|| format!("loading catalog {}", path.display()))?,
        None => ProductCatalog::builtin(),
    };
    let config = match &cli.config {
        Some(path) => IllustrationConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => IllustrationConfig::default(),
    };
    let illustrator = Illustrator::new(catalog, config);

    println!("Running illustrations...");
    let run_start = Instant::now();

    // Each illustration only reads the shared catalog
    let results: Vec<OutputRow> = profiles
        .par_iter()
        .map(|(row, inputs)| {
            let summary = illustrator.summary(inputs);
            OutputRow {
                row: *row,
                age: inputs.profile.age,
                total_investment: summary.total_investment,
                total_return: summary.total_return,
                total_growth: summary.total_growth,
            }
        })
        .collect();

    println!("Illustrations complete in {:?}", run_start.elapsed());

    if let Some(path) = &cli.output {
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("creating {}", path.display()))?;
        for row in &results {
            writer.serialize(row)?;
        }
        writer.flush()?;
        println!("Output written to {}", path.display());
    }

    let total_investment: f64 = results.iter().map(|r| r.total_investment).sum();
    let total_return: f64 = results.iter().map(|r| r.total_return).sum();

    println!("\nBlock Summary:");
    println!("  Profiles:         {}", results.len());
    println!("  Total Investment: {}", format_currency(total_investment));
    println!("  Total Return:     {}", format_currency(total_return));
    println!("  Total Growth:     {}", format_currency(total_return - total_investment));
    if let Some(best) = results
        .iter()
        .max_by(|a, b| a.total_growth.total_cmp(&b.total_growth))
    {
        println!(
            "  Largest growth:   row {} (age {}) {}",
            best.row,
            best.age,
            format_currency(best.total_growth)
        );
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
