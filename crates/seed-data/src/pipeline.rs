//! The ordered seeding pipeline.
//!
//! A run connects, ensures the schema, then walks [`SeedStep::ORDER`]. The
//! first failing stage ends the run; rows committed by earlier steps are
//! left in place. The session is closed on every path.

use tracing::{error, info, warn};

use crate::config::SeedConfig;
use crate::db::{Connector, Seeder, Session, connect_with_retry, ensure_schema};
use crate::error::SeedError;
use crate::retry::Sleeper;

/// One table-seeding stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeedStep {
    Buildings,
    Departments,
    Admins,
    Users,
    Rooms,
    Bookings,
    Schedules,
}

impl SeedStep {
    /// Parents before children.
    pub const ORDER: [SeedStep; 7] = [
        SeedStep::Buildings,
        SeedStep::Departments,
        SeedStep::Admins,
        SeedStep::Users,
        SeedStep::Rooms,
        SeedStep::Bookings,
        SeedStep::Schedules,
    ];

    /// Table this step fills.
    pub fn table(&self) -> &'static str {
        match self {
            SeedStep::Buildings => "Building",
            SeedStep::Departments => "Department",
            SeedStep::Admins => "Admin",
            SeedStep::Users => "User",
            SeedStep::Rooms => "Room",
            SeedStep::Bookings => "Booking",
            SeedStep::Schedules => "Schedule",
        }
    }

    pub async fn run(
        &self,
        seeder: &mut Seeder,
        session: &mut dyn Session,
    ) -> Result<usize, SeedError> {
        match self {
            SeedStep::Buildings => seeder.seed_buildings(session).await,
            SeedStep::Departments => seeder.seed_departments(session).await,
            SeedStep::Admins => seeder.seed_admins(session).await,
            SeedStep::Users => seeder.seed_users(session).await,
            SeedStep::Rooms => seeder.seed_rooms(session).await,
            SeedStep::Bookings => seeder.seed_bookings(session).await,
            SeedStep::Schedules => seeder.seed_schedules(session).await,
        }
    }
}

/// Rows inserted by a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub steps: Vec<(SeedStep, usize)>,
}

impl SeedReport {
    pub fn rows(&self, step: SeedStep) -> Option<usize> {
        self.steps
            .iter()
            .find(|(s, _)| *s == step)
            .map(|(_, rows)| *rows)
    }

    pub fn total_rows(&self) -> usize {
        self.steps.iter().map(|(_, rows)| rows).sum()
    }
}

/// Runs schema creation and every seed step against one session.
pub struct Pipeline {
    config: SeedConfig,
}

impl Pipeline {
    pub fn new(config: SeedConfig) -> Self {
        Self { config }
    }

    /// Connects, seeds, and always closes the session before returning.
    pub async fn run(
        &self,
        connector: &dyn Connector,
        sleeper: &dyn Sleeper,
    ) -> Result<SeedReport, SeedError> {
        self.config.validate()?;

        let mut session = connect_with_retry(connector, &self.config.retry, sleeper).await?;

        let outcome = self.seed(session.as_mut()).await;
        let closed = session.close().await;

        match (outcome, closed) {
            (Ok(report), Ok(())) => {
                info!("Database connection closed");
                Ok(report)
            }
            (Ok(_), Err(e)) => {
                error!("Failed to close database connection: {e}");
                Err(SeedError::Database(e))
            }
            (Err(e), close) => {
                if let Err(close_err) = close {
                    warn!("Failed to close database connection: {close_err}");
                } else {
                    info!("Database connection closed");
                }
                Err(e)
            }
        }
    }

    async fn seed(&self, session: &mut dyn Session) -> Result<SeedReport, SeedError> {
        ensure_schema(session).await?;

        let mut seeder = Seeder::from_config(&self.config)?;
        let mut report = SeedReport::default();

        for step in SeedStep::ORDER {
            match step.run(&mut seeder, session).await {
                Ok(rows) => report.steps.push((step, rows)),
                Err(e) => {
                    error!("Seeding \"{}\" failed; stopping", step.table());
                    return Err(e);
                }
            }
        }

        info!(
            "Seeding complete! {} rows loaded across {} tables",
            report.total_rows(),
            report.steps.len()
        );
        Ok(report)
    }
}
