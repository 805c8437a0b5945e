//! Seed script - creates the booking tables and fills them with test data
//!
//! Run with:
//! ```
//! cargo run -p seed-data --bin seed
//! ```
//!
//! Connection settings come from `DATABASE_URL` or the `PG*` variables,
//! optionally loaded from a `.env` file.

use anyhow::Context;
use seed_data::config::SeedConfig;
use seed_data::pipeline::SeedStep;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    load_dotenv(dotenvy::dotenv().map(|_| ()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting database seeding process...");

    let config = SeedConfig::from_env().context("invalid seed configuration")?;

    let report = match seed_data::run_all(config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Seeding process failed: {e}");
            return Err(e).context("seeding failed");
        }
    };

    // Summary output
    tracing::info!("Seed completed!");
    for step in SeedStep::ORDER {
        tracing::info!("  {}: {}", step.table(), report.rows(step).unwrap_or(0));
    }

    Ok(())
}

/// A missing `.env` file is fine; the environment may already be set.
/// A present but unreadable or malformed one is not.
fn load_dotenv(result: Result<(), dotenvy::Error>) -> anyhow::Result<()> {
    match result {
        Err(e) if !e.not_found() => Err(e).context("failed to load .env file"),
        _ => Ok(()),
    }
}
