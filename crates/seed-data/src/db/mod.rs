//! Database side of seeding.
//!
//! A [`Connector`] opens one [`Session`]; [`ensure_schema`] creates the
//! tables; the [`Seeder`] fills them one row per statement.

pub mod connector;
pub mod schema;
mod seeder;
pub mod session;

pub use connector::{Connector, PgConnector, connect_with_retry};
pub use schema::ensure_schema;
pub use seeder::Seeder;
pub use session::{PgSession, Session, SqlValue, Statement};
