//! A single live database session and the statements it runs.

use std::fmt;

use async_trait::async_trait;
use sqlx::{Connection, PgConnection};
use time::PrimitiveDateTime;
use tracing::warn;

/// A bound statement parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Int(i32),
    Text(String),
    Timestamp(PrimitiveDateTime),
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Int(v) => write!(f, "{v}"),
            SqlValue::Text(v) => write!(f, "{v:?}"),
            SqlValue::Timestamp(v) => write!(f, "{v}"),
        }
    }
}

/// One SQL statement with its parameters, tagged with the table it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    table: &'static str,
    sql: &'static str,
    params: Vec<SqlValue>,
}

impl Statement {
    pub fn new(table: &'static str, sql: &'static str) -> Self {
        Self {
            table,
            sql,
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, value: SqlValue) -> Self {
        self.params.push(value);
        self
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn sql(&self) -> &'static str {
        self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Parameters rendered as `(a, b, c)` for diagnostics.
    pub fn params_display(&self) -> String {
        let rendered: Vec<String> = self.params.iter().map(ToString::to_string).collect();
        format!("({})", rendered.join(", "))
    }
}

/// The database handle shared by every step of a run.
#[async_trait]
pub trait Session: Send {
    /// Runs one statement in its own transaction. A failure rolls back
    /// that statement only. Returns the number of affected rows.
    async fn execute(&mut self, statement: &Statement) -> Result<u64, sqlx::Error>;

    /// Releases the session.
    async fn close(self: Box<Self>) -> Result<(), sqlx::Error>;
}

/// Session over a single Postgres connection.
pub struct PgSession {
    conn: PgConnection,
}

impl PgSession {
    pub fn new(conn: PgConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Session for PgSession {
    async fn execute(&mut self, statement: &Statement) -> Result<u64, sqlx::Error> {
        let mut tx = self.conn.begin().await?;

        let mut query = sqlx::query(statement.sql());
        for param in statement.params() {
            query = match param {
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::Text(v) => query.bind(v.as_str()),
                SqlValue::Timestamp(v) => query.bind(*v),
            };
        }

        match query.execute(&mut *tx).await {
            Ok(done) => {
                tx.commit().await?;
                Ok(done.rows_affected())
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!("Rollback failed: {rollback_err}");
                }
                Err(e)
            }
        }
    }

    async fn close(self: Box<Self>) -> Result<(), sqlx::Error> {
        let this = *self;
        this.conn.close().await
    }
}
