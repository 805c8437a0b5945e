//! Database seeding, one step per table.

use rand::SeedableRng;
use rand::rngs::StdRng;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::{error, info};

use super::session::{Session, SqlValue, Statement};
use crate::config::{SeedConfig, SeedCounts};
use crate::error::SeedError;
use crate::generators::{
    AccountGenerator, AccountRole, BookingGenerator, BuildingGenerator, DepartmentGenerator,
    GeneratedAccount, GeneratedBooking, GeneratedBuilding, GeneratedDepartment, GeneratedRoom,
    GeneratedSchedule, RoomGenerator, ScheduleGenerator,
};

/// A generated row that knows its own INSERT.
trait InsertRow {
    fn insert_statement(&self) -> Statement;
}

impl InsertRow for GeneratedBuilding {
    fn insert_statement(&self) -> Statement {
        Statement::new(
            "Building",
            r#"INSERT INTO "Building" ("buildingId", "floors") VALUES ($1, $2)"#,
        )
        .bind(SqlValue::Int(self.building_id))
        .bind(SqlValue::Int(self.floors))
    }
}

impl InsertRow for GeneratedDepartment {
    fn insert_statement(&self) -> Statement {
        Statement::new(
            "Department",
            r#"INSERT INTO "Department" ("deptId", "name", "buildingId") VALUES ($1, $2, $3)"#,
        )
        .bind(SqlValue::Int(self.dept_id))
        .bind(SqlValue::Text(self.name.clone()))
        .bind(SqlValue::Int(self.building_id))
    }
}

impl InsertRow for GeneratedAccount {
    fn insert_statement(&self) -> Statement {
        let statement = match self.role {
            AccountRole::Admin => Statement::new(
                "Admin",
                r#"INSERT INTO "Admin" ("adminId", "deptId", "email", "password") VALUES ($1, $2, $3, $4)"#,
            ),
            AccountRole::User => Statement::new(
                "User",
                r#"INSERT INTO "User" ("userId", "deptId", "email", "password") VALUES ($1, $2, $3, $4)"#,
            ),
        };
        statement
            .bind(SqlValue::Int(self.id))
            .bind(SqlValue::Int(self.dept_id))
            .bind(SqlValue::Text(self.email.clone()))
            .bind(SqlValue::Text(self.password.clone()))
    }
}

impl InsertRow for GeneratedRoom {
    fn insert_statement(&self) -> Statement {
        Statement::new(
            "Room",
            r#"INSERT INTO "Room" ("roomId", "roomName", "type", "capacity") VALUES ($1, $2, $3, $4)"#,
        )
        .bind(SqlValue::Int(self.room_id))
        .bind(SqlValue::Text(self.room_name.clone()))
        .bind(SqlValue::Text(self.room_type.as_str().to_string()))
        .bind(SqlValue::Int(self.capacity))
    }
}

impl InsertRow for GeneratedBooking {
    fn insert_statement(&self) -> Statement {
        Statement::new(
            "Booking",
            r#"
            INSERT INTO "Booking" ("requestId", "category", "roomId", "userId", "status", "startDate", "endDate", "description")
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(SqlValue::Int(self.request_id))
        .bind(SqlValue::Text(self.category.as_str().to_string()))
        .bind(SqlValue::Int(self.room_id))
        .bind(SqlValue::Int(self.user_id))
        .bind(SqlValue::Text(self.status.as_str().to_string()))
        .bind(SqlValue::Timestamp(self.start_date))
        .bind(SqlValue::Timestamp(self.end_date))
        .bind(SqlValue::Text(self.description.clone()))
    }
}

impl InsertRow for GeneratedSchedule {
    fn insert_statement(&self) -> Statement {
        Statement::new(
            "Schedule",
            r#"
            INSERT INTO "Schedule" ("id", "requestId", "roomId", "startTime", "endTime", "day")
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(SqlValue::Int(self.id))
        .bind(SqlValue::Int(self.request_id))
        .bind(SqlValue::Int(self.room_id))
        .bind(SqlValue::Timestamp(self.start_time))
        .bind(SqlValue::Timestamp(self.end_time))
        .bind(SqlValue::Text(self.day.as_str().to_string()))
    }
}

/// Moves the `Schedule.id` sequence past the explicitly inserted ids.
const SYNC_SCHEDULE_SEQUENCE: &str = r#"
    SELECT setval(
        pg_get_serial_sequence('"Schedule"', 'id'),
        COALESCE((SELECT MAX("id") FROM "Schedule"), 1),
        (SELECT MAX("id") FROM "Schedule") IS NOT NULL
    )
"#;

/// Runs one statement, logging its full context if it fails.
pub(crate) async fn run_statement(
    session: &mut dyn Session,
    statement: &Statement,
) -> Result<u64, SeedError> {
    match session.execute(statement).await {
        Ok(rows) => Ok(rows),
        Err(e) => {
            error!("Error executing statement: {e}");
            error!("Statement: {}", statement.sql().trim());
            if !statement.params().is_empty() {
                error!("Params: {}", statement.params_display());
            }
            Err(SeedError::Statement {
                table: statement.table(),
                statement: statement.sql().trim().to_string(),
                params: statement.params_display(),
                source: e,
            })
        }
    }
}

/// Current UTC time without an offset, matching the `TIMESTAMP` columns.
fn utc_now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

/// Generates rows and inserts them through a [`Session`].
pub struct Seeder {
    counts: SeedCounts,
    rng: StdRng,
}

impl Seeder {
    /// Creates a seeder whose rows are drawn from OS entropy.
    ///
    /// Fails if `counts` would leave a child table without parent rows.
    pub fn new(counts: SeedCounts) -> Result<Self, SeedError> {
        counts.validate()?;
        Ok(Self {
            counts,
            rng: StdRng::from_entropy(),
        })
    }

    /// Creates a seeder that produces the same rows for the same seed.
    pub fn with_rng_seed(counts: SeedCounts, seed: u64) -> Result<Self, SeedError> {
        counts.validate()?;
        Ok(Self {
            counts,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn from_config(config: &SeedConfig) -> Result<Self, SeedError> {
        match config.rng_seed {
            Some(seed) => Self::with_rng_seed(config.counts, seed),
            None => Self::new(config.counts),
        }
    }

    /// Seeds buildings `1..=buildings`.
    pub async fn seed_buildings(&mut self, session: &mut dyn Session) -> Result<usize, SeedError> {
        let rows = BuildingGenerator::new().generate_batch(self.counts.buildings, &mut self.rng);
        insert_rows(session, "buildings", &rows).await
    }

    /// Seeds departments, each in a random seeded building.
    pub async fn seed_departments(
        &mut self,
        session: &mut dyn Session,
    ) -> Result<usize, SeedError> {
        let rows = DepartmentGenerator::new(self.counts.buildings)
            .generate_batch(self.counts.departments, &mut self.rng);
        insert_rows(session, "departments", &rows).await
    }

    /// Seeds admins, each in a random seeded department.
    pub async fn seed_admins(&mut self, session: &mut dyn Session) -> Result<usize, SeedError> {
        let rows = AccountGenerator::new(AccountRole::Admin, self.counts.departments)
            .generate_batch(self.counts.admins, &mut self.rng);
        insert_rows(session, "admins", &rows).await
    }

    /// Seeds users, each in a random seeded department.
    pub async fn seed_users(&mut self, session: &mut dyn Session) -> Result<usize, SeedError> {
        let rows = AccountGenerator::new(AccountRole::User, self.counts.departments)
            .generate_batch(self.counts.users, &mut self.rng);
        insert_rows(session, "users", &rows).await
    }

    pub async fn seed_rooms(&mut self, session: &mut dyn Session) -> Result<usize, SeedError> {
        let rows = RoomGenerator::new().generate_batch(self.counts.rooms, &mut self.rng);
        insert_rows(session, "rooms", &rows).await
    }

    /// Seeds bookings for seeded rooms and users, starting 1-10 days out.
    pub async fn seed_bookings(&mut self, session: &mut dyn Session) -> Result<usize, SeedError> {
        let rows = BookingGenerator::new(self.counts.rooms, self.counts.users).generate_batch(
            self.counts.bookings,
            utc_now(),
            &mut self.rng,
        );
        insert_rows(session, "bookings", &rows).await
    }

    /// Seeds schedule slots for seeded bookings, then realigns the id sequence.
    pub async fn seed_schedules(&mut self, session: &mut dyn Session) -> Result<usize, SeedError> {
        let rows = ScheduleGenerator::new(self.counts.bookings, self.counts.rooms).generate_batch(
            self.counts.schedules,
            utc_now(),
            &mut self.rng,
        );
        let seeded = insert_rows(session, "schedules", &rows).await?;

        if seeded > 0 {
            run_statement(session, &Statement::new("Schedule", SYNC_SCHEDULE_SEQUENCE)).await?;
        }

        Ok(seeded)
    }
}

/// Inserts rows in order, one statement each, stopping at the first failure.
async fn insert_rows<T: InsertRow>(
    session: &mut dyn Session,
    label: &str,
    rows: &[T],
) -> Result<usize, SeedError> {
    info!("Seeding {} {label}...", rows.len());

    for row in rows {
        run_statement(session, &row.insert_statement()).await?;
    }

    info!("Seeded {} {label}", rows.len());
    Ok(rows.len())
}
