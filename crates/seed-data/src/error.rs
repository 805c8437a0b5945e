//! Error taxonomy for a seeding run.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Could not connect to the database after {attempts} attempts: {source}")]
    Connection {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("Statement failed on \"{table}\": {source}")]
    Statement {
        table: &'static str,
        statement: String,
        params: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
