//! Table definitions for the room-booking schema.

use tracing::info;

use super::session::{Session, Statement};
use super::seeder::run_statement;
use crate::error::SeedError;

/// `CREATE TABLE IF NOT EXISTS` statements, parents before children.
pub const TABLES: [(&str, &str); 7] = [
    (
        "Building",
        r#"
        CREATE TABLE IF NOT EXISTS "Building" (
            "buildingId" INTEGER PRIMARY KEY,
            "floors" INTEGER
        )
        "#,
    ),
    (
        "Department",
        r#"
        CREATE TABLE IF NOT EXISTS "Department" (
            "deptId" INTEGER PRIMARY KEY,
            "name" TEXT NOT NULL,
            "buildingId" INTEGER REFERENCES "Building"("buildingId")
        )
        "#,
    ),
    (
        "Admin",
        r#"
        CREATE TABLE IF NOT EXISTS "Admin" (
            "adminId" INTEGER PRIMARY KEY,
            "deptId" INTEGER REFERENCES "Department"("deptId"),
            "email" TEXT NOT NULL,
            "password" TEXT NOT NULL
        )
        "#,
    ),
    (
        "User",
        r#"
        CREATE TABLE IF NOT EXISTS "User" (
            "userId" INTEGER PRIMARY KEY,
            "deptId" INTEGER REFERENCES "Department"("deptId"),
            "email" TEXT NOT NULL,
            "password" TEXT NOT NULL
        )
        "#,
    ),
    (
        "Room",
        r#"
        CREATE TABLE IF NOT EXISTS "Room" (
            "roomId" INTEGER PRIMARY KEY,
            "roomName" TEXT NOT NULL,
            "type" TEXT NOT NULL,
            "capacity" INTEGER NOT NULL
        )
        "#,
    ),
    (
        "Booking",
        r#"
        CREATE TABLE IF NOT EXISTS "Booking" (
            "requestId" INTEGER PRIMARY KEY,
            "category" TEXT NOT NULL,
            "roomId" INTEGER REFERENCES "Room"("roomId"),
            "userId" INTEGER REFERENCES "User"("userId"),
            "status" TEXT NOT NULL,
            "startDate" TIMESTAMP NOT NULL,
            "endDate" TIMESTAMP NOT NULL,
            "description" TEXT
        )
        "#,
    ),
    (
        "Schedule",
        r#"
        CREATE TABLE IF NOT EXISTS "Schedule" (
            "id" SERIAL PRIMARY KEY,
            "requestId" INTEGER REFERENCES "Booking"("requestId"),
            "roomId" INTEGER REFERENCES "Room"("roomId"),
            "startTime" TIMESTAMP NOT NULL,
            "endTime" TIMESTAMP NOT NULL,
            "day" TEXT NOT NULL
        )
        "#,
    ),
];

/// Creates any missing tables. Safe to run repeatedly.
pub async fn ensure_schema(session: &mut dyn Session) -> Result<(), SeedError> {
    info!("Creating tables if they don't exist...");

    for (table, ddl) in TABLES {
        run_statement(session, &Statement::new(table, ddl)).await?;
    }

    info!("Tables created or already exist");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_in_dependency_order() {
        let names: Vec<&str> = TABLES.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            ["Building", "Department", "Admin", "User", "Room", "Booking", "Schedule"]
        );
    }

    #[test]
    fn test_every_reference_points_backwards() {
        for (i, (_, ddl)) in TABLES.iter().enumerate() {
            for (parent, _) in TABLES.iter().skip(i) {
                let reference = format!("REFERENCES \"{parent}\"");
                assert!(
                    !ddl.contains(&reference),
                    "{ddl} references a table created after it"
                );
            }
        }
    }

    #[test]
    fn test_all_statements_are_idempotent() {
        for (_, ddl) in TABLES {
            assert!(ddl.contains("CREATE TABLE IF NOT EXISTS"));
        }
    }
}
