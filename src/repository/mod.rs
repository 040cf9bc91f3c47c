//! Repository layer for database operations

pub mod books;
pub mod classes;
pub mod copies;
pub mod dashboard;
pub mod librarians;
pub mod loans;
pub mod staging;
pub mod students;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::models::ImportRecord;

pub use staging::StagingStore;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Round-trip to the database
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl StagingStore for Repository {
    async fn upsert_student_imports(&self, records: &[ImportRecord]) -> Result<u64, sqlx::Error> {
        self.staging_upsert(records).await
    }
}
