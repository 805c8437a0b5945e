//! End-to-end seeding against a real Postgres database.
//!
//! To run these tests, you need a reachable PostgreSQL database and the
//! DATABASE_URL environment variable set.
//!
//! Run with: `DATABASE_URL=postgres://... cargo test -p seed-data --test postgres_seed`
//!
//! Each test works in its own freshly created schema and drops it afterwards,
//! so they can safely run against a development database.

use std::env;
use std::str::FromStr;

use seed_data::prelude::*;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Test schema plus a connector and pool scoped to it.
struct TestSchema {
    name: String,
    pool: PgPool,
    admin: PgPool,
    connector: PgConnector,
}

/// Creates a throwaway schema, skipping the test if DATABASE_URL is not set.
async fn test_schema() -> Option<TestSchema> {
    let database_url = match env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: DATABASE_URL not set");
            return None;
        }
    };

    let admin = match PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Skipping test: Failed to connect to database: {e}");
            return None;
        }
    };

    let name = format!("seed_test_{}", Uuid::new_v4().simple());
    sqlx::query(&format!("CREATE SCHEMA {name}"))
        .execute(&admin)
        .await
        .expect("Failed to create test schema");

    let options = PgConnectOptions::from_str(&database_url)
        .expect("Invalid DATABASE_URL")
        .options([("search_path", name.as_str())]);

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_with(options.clone())
        .await
        .expect("Failed to connect to test schema");

    Some(TestSchema {
        name,
        pool,
        admin,
        connector: PgConnector::from_options(options),
    })
}

impl TestSchema {
    async fn count(&self, table: &str) -> i64 {
        sqlx::query(&format!(r#"SELECT COUNT(*) FROM "{table}""#))
            .fetch_one(&self.pool)
            .await
            .expect("count query failed")
            .get(0)
    }

    async fn ids(&self, table: &str, column: &str) -> Vec<i32> {
        sqlx::query(&format!(r#"SELECT "{column}" FROM "{table}" ORDER BY 1"#))
            .fetch_all(&self.pool)
            .await
            .expect("id query failed")
            .iter()
            .map(|row| row.get(0))
            .collect()
    }

    async fn cleanup(self) {
        self.pool.close().await;
        let _ = sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.name))
            .execute(&self.admin)
            .await;
    }
}

fn config() -> SeedConfig {
    SeedConfig {
        rng_seed: Some(12345),
        ..SeedConfig::default()
    }
}

#[tokio::test]
async fn test_full_seed_populates_every_table() {
    let Some(schema) = test_schema().await else {
        return;
    };

    let report = Pipeline::new(config())
        .run(&schema.connector, &TokioSleeper)
        .await
        .expect("seeding failed");
    assert_eq!(report.total_rows(), 90);

    let expected = [
        ("Building", "buildingId", 5),
        ("Department", "deptId", 10),
        ("Admin", "adminId", 10),
        ("User", "userId", 20),
        ("Room", "roomId", 10),
        ("Booking", "requestId", 15),
        ("Schedule", "id", 20),
    ];
    for (table, column, count) in expected {
        assert_eq!(schema.count(table).await, count as i64, "{table}");
        assert_eq!(
            schema.ids(table, column).await,
            (1..=count).collect::<Vec<i32>>(),
            "{table}"
        );
    }

    let bad_spans: i64 = sqlx::query(
        r#"
        SELECT
            (SELECT COUNT(*) FROM "Booking" WHERE "endDate" - "startDate" <> INTERVAL '2 hours') +
            (SELECT COUNT(*) FROM "Schedule" WHERE "endTime" - "startTime" <> INTERVAL '1 hour')
        "#,
    )
    .fetch_one(&schema.pool)
    .await
    .unwrap()
    .get(0);
    assert_eq!(bad_spans, 0);

    // The serial sequence continues after the seeded ids.
    let next_id: i32 = sqlx::query(
        r#"
        INSERT INTO "Schedule" ("requestId", "roomId", "startTime", "endTime", "day")
        VALUES (1, 1, NOW(), NOW() + INTERVAL '1 hour', 'Monday')
        RETURNING "id"
        "#,
    )
    .fetch_one(&schema.pool)
    .await
    .expect("insert after seeding failed")
    .get(0);
    assert_eq!(next_id, 21);

    schema.cleanup().await;
}

#[tokio::test]
async fn test_ensure_schema_is_idempotent() {
    let Some(schema) = test_schema().await else {
        return;
    };

    let mut session = schema.connector.connect().await.expect("connect failed");
    ensure_schema(session.as_mut()).await.expect("first run failed");
    ensure_schema(session.as_mut()).await.expect("second run failed");
    session.close().await.unwrap();

    let tables: i64 = sqlx::query(
        "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = $1",
    )
    .bind(&schema.name)
    .fetch_one(&schema.pool)
    .await
    .unwrap()
    .get(0);
    assert_eq!(tables, 7);

    schema.cleanup().await;
}

#[tokio::test]
async fn test_rerun_stops_at_first_conflict() {
    let Some(schema) = test_schema().await else {
        return;
    };

    Pipeline::new(config())
        .run(&schema.connector, &TokioSleeper)
        .await
        .expect("first run failed");

    let err = Pipeline::new(config())
        .run(&schema.connector, &TokioSleeper)
        .await
        .unwrap_err();

    assert!(matches!(err, SeedError::Statement { table: "Building", .. }));
    assert_eq!(schema.count("Building").await, 5);
    assert_eq!(schema.count("Schedule").await, 20);

    schema.cleanup().await;
}
