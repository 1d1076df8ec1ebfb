//! RideLoad - Training Load & Periodization Engine
//!
//! Prints the coach summary, fitness snapshot and suggestions for the
//! configured athlete.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rideload::storage::config::load_config;
use rideload::{Database, TrainingEngine, TrainingStore};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RideLoad v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config().context("loading configuration")?;
    let db_path = config.database_path();
    let db = Database::open(&db_path)
        .with_context(|| format!("opening database at {}", db_path.display()))?;

    let engine = TrainingEngine::new(TrainingStore::new(db.connection()))
        .with_default_ftp(config.athlete.default_ftp_watts)
        .with_summary_windows(config.engine.pmc_days, config.engine.history_days);
    let athlete_id = config.athlete.athlete_id;

    println!("{}", engine.coach_summary(&athlete_id)?);

    let suggestions = engine.suggestions(&athlete_id)?;
    if !suggestions.is_empty() {
        println!();
        println!("=== SUGGESTIONS ===");
        for suggestion in &suggestions {
            println!("[{}] {}", suggestion.kind.display_name(), suggestion.message);
        }
    }

    if let Some(workout) = engine.suggest_workout(&athlete_id)? {
        println!();
        println!(
            "Next workout: {} ({}, {} min, ~{:.0} TSS)",
            workout.name,
            workout.workout_type.display_name(),
            workout.duration_minutes,
            workout.tss_estimate
        );
    }

    Ok(())
}
