//! Test database helper utilities
//!
//! Provides an in-memory SQLite database with the full schema applied, so
//! every test runs against a real store without external services.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use rollcall::DatabaseService;

/// In-memory test database.
///
/// The pool is capped at a single connection: each in-memory SQLite
/// connection is its own database, so the pool must never open a second one.
pub struct TestDatabase {
    pub pool: SqlitePool,
}

impl TestDatabase {
    /// Create a fresh in-memory database with migrations applied
    pub async fn new() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Build a `DatabaseService` over this database
    pub fn service(&self) -> DatabaseService {
        DatabaseService::new(self.pool.clone())
    }

    /// Clean all test data from the database
    pub async fn cleanup(&self) -> Result<(), sqlx::Error> {
        // Delete in reverse order of dependencies
        sqlx::query("DELETE FROM attendance").execute(&self.pool).await?;
        sqlx::query("DELETE FROM attendees").execute(&self.pool).await?;
        sqlx::query("DELETE FROM events").execute(&self.pool).await?;

        Ok(())
    }
}
