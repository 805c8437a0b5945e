//! Seed data for the room-booking schema.
//!
//! This crate creates the booking tables if they are missing and fills them
//! with synthetic rows whose foreign keys always point at rows seeded by an
//! earlier step: buildings, departments, admins, users, rooms, bookings,
//! and schedules, in that order.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use seed_data::prelude::*;
//!
//! let config = SeedConfig::from_env()?;
//! let report = run_all(config).await?;
//! println!("{} rows seeded", report.total_rows());
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod generators;
pub mod pipeline;
pub mod retry;

use config::SeedConfig;
use db::PgConnector;
use error::SeedError;
use pipeline::{Pipeline, SeedReport};
use retry::TokioSleeper;

/// Seeds the database described by `config` over a real Postgres connection.
pub async fn run_all(config: SeedConfig) -> Result<SeedReport, SeedError> {
    let connector = PgConnector::new(&config.database)?;
    Pipeline::new(config).run(&connector, &TokioSleeper).await
}

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{DbConfig, SeedConfig, SeedCounts};
    pub use crate::db::{Connector, PgConnector, Seeder, Session, Statement, ensure_schema};
    pub use crate::error::SeedError;
    pub use crate::pipeline::{Pipeline, SeedReport, SeedStep};
    pub use crate::retry::{RetryPolicy, Sleeper, TokioSleeper};
    pub use crate::run_all;
}
