use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use rentmatch::config::Settings;
use rentmatch::listings::load_listings;
use rentmatch::{OpenAiExtractor, QueryInterpreter, ScoredListing, SearchCriteria};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Describe the flat you want and get the best matches from the listing table
#[derive(Debug, Parser)]
#[command(name = "rentmatch", version)]
struct Args {
    /// What you are looking for, e.g. "Piso 2 habitaciones, luminoso, en Madrid Centro, <=1200€"
    query: Vec<String>,

    /// CSV listing table
    #[arg(long, default_value = "sample_pisos.csv")]
    data: PathBuf,

    /// Number of results to show
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(1..=6))]
    limit: u8,

    /// Also write the results as JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct SearchReport<'a> {
    query: &'a str,
    criteria: &'a SearchCriteria,
    results: &'a [ScoredListing<'a>],
    generated_at: DateTime<Utc>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let query = args.query.join(" ");
    if query.trim().is_empty() {
        warn!("Please describe what you are looking for.");
        return Ok(());
    }

    info!("🏠 RentMatch");

    let settings = Settings::from_env();
    let interpreter = match &settings.openai_api_key {
        Some(key) => {
            let extractor = OpenAiExtractor::with_options(
                key.clone(),
                settings.openai_base_url.clone(),
                settings.model.clone(),
                settings.extract_timeout,
            )?;
            QueryInterpreter::with_extractor(Arc::new(extractor), settings.extract_timeout)
        }
        None => {
            info!("No OPENAI_API_KEY set, using keyword matching only");
            QueryInterpreter::heuristic_only()
        }
    };

    let listings = load_listings(&args.data)?;

    let interpretation = interpreter.extract_criteria(&query).await;
    if let Some(err) = &interpretation.extraction_error {
        warn!("Could not use {}: {}", interpreter.extractor_name().unwrap_or("extractor"), err);
    }
    let criteria = &interpretation.criteria;
    info!("Criteria: {:?}", criteria);

    let results = interpreter.filter_and_rank(&listings, criteria, usize::from(args.limit));

    if results.is_empty() {
        println!("No listings match those criteria. Try widening the zone or the budget.");
    }

    for (i, scored) in results.iter().enumerate() {
        let listing = scored.listing;
        println!(
            "{}. {} — {} — {}€ — {} hab — {} m²",
            i + 1,
            listing.title,
            listing.zone,
            listing.price,
            listing.rooms,
            listing.area
        );
        println!("   {}", listing.description);
        println!("   Score: {}", scored.score);
        println!();
    }

    if let Some(path) = &args.output {
        let report = SearchReport {
            query: &query,
            criteria,
            results: &results,
            generated_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&report)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("💾 Saved {} results to {}", results.len(), path.display());
    }

    Ok(())
}
