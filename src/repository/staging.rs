//! Student import staging table

use async_trait::async_trait;

use super::Repository;
use crate::models::ImportRecord;

/// Destination of imported student rows.
///
/// Implementations must apply the whole batch in one statement, updating
/// every non-key column when the registration number already exists.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StagingStore: Send + Sync {
    /// Insert or update all records; returns the number of rows affected
    async fn upsert_student_imports(&self, records: &[ImportRecord]) -> Result<u64, sqlx::Error>;
}

impl Repository {
    /// Bulk upsert keyed on `registration_number`, one statement for the batch
    pub async fn staging_upsert(&self, records: &[ImportRecord]) -> Result<u64, sqlx::Error> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut registration_numbers = Vec::with_capacity(records.len());
        let mut names = Vec::with_capacity(records.len());
        let mut birth_dates = Vec::with_capacity(records.len());
        let mut courses = Vec::with_capacity(records.len());
        let mut entry_years = Vec::with_capacity(records.len());
        let mut cities = Vec::with_capacity(records.len());
        let mut races = Vec::with_capacity(records.len());
        let mut sexes = Vec::with_capacity(records.len());

        for record in records {
            registration_numbers.push(record.registration_number.clone());
            names.push(record.name.clone());
            birth_dates.push(record.birth_date);
            courses.push(record.course.clone());
            entry_years.push(record.entry_year);
            cities.push(record.city.clone());
            races.push(record.race_or_color.clone());
            sexes.push(record.sex.clone());
        }

        let result = sqlx::query(
            r#"
            INSERT INTO student_imports
                (registration_number, name, birth_date, course, entry_year, city, race_or_color, sex)
            SELECT * FROM UNNEST(
                $1::text[], $2::text[], $3::date[], $4::text[],
                $5::int4[], $6::text[], $7::text[], $8::text[]
            )
            ON CONFLICT (registration_number) DO UPDATE SET
                name = EXCLUDED.name,
                birth_date = EXCLUDED.birth_date,
                course = EXCLUDED.course,
                entry_year = EXCLUDED.entry_year,
                city = EXCLUDED.city,
                race_or_color = EXCLUDED.race_or_color,
                sex = EXCLUDED.sex
            "#,
        )
        .bind(&registration_numbers)
        .bind(&names)
        .bind(&birth_dates)
        .bind(&courses)
        .bind(&entry_years)
        .bind(&cities)
        .bind(&races)
        .bind(&sexes)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// List staged rows ordered by registration number
    pub async fn staging_list(&self) -> Result<Vec<ImportRecord>, sqlx::Error> {
        sqlx::query_as::<_, ImportRecord>(
            "SELECT * FROM student_imports ORDER BY registration_number",
        )
        .fetch_all(&self.pool)
        .await
    }
}
