//! Opening the session, with retry.

use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};
use tracing::{error, info};

use super::session::{PgSession, Session};
use crate::config::DbConfig;
use crate::error::SeedError;
use crate::retry::{Exhausted, RetryPolicy, Sleeper};

/// Something that can open a [`Session`].
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Box<dyn Session>, sqlx::Error>;
}

/// Opens a single Postgres connection per call.
#[derive(Debug, Clone)]
pub struct PgConnector {
    options: PgConnectOptions,
}

impl PgConnector {
    pub fn new(config: &DbConfig) -> Result<Self, SeedError> {
        Ok(Self {
            options: config.connect_options()?,
        })
    }

    pub fn from_options(options: PgConnectOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Connector for PgConnector {
    async fn connect(&self) -> Result<Box<dyn Session>, sqlx::Error> {
        let conn = PgConnection::connect_with(&self.options).await?;
        Ok(Box::new(PgSession::new(conn)))
    }
}

/// Connects using `policy`, sleeping between failed attempts.
pub async fn connect_with_retry(
    connector: &dyn Connector,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<Box<dyn Session>, SeedError> {
    let result = policy
        .retry(sleeper, |attempt| {
            info!("Attempting to connect to database (attempt {attempt})...");
            connector.connect()
        })
        .await;

    match result {
        Ok(session) => {
            info!("Connected successfully");
            Ok(session)
        }
        Err(Exhausted {
            attempts,
            last_error,
        }) => {
            error!("Max retries reached. Could not connect to the database.");
            Err(SeedError::Connection {
                attempts,
                source: last_error,
            })
        }
    }
}
