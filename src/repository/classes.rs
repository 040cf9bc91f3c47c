//! Class domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::class::{CreateClass, SchoolClass},
};

impl Repository {
    /// True if a class with exactly this course, grade and year exists
    pub async fn classes_exists(&self, data: &CreateClass) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM classes
                WHERE course = $1 AND grade = $2 AND school_year = $3
            )
            "#,
        )
        .bind(&data.course)
        .bind(&data.grade)
        .bind(data.school_year)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn classes_create(&self, data: &CreateClass) -> AppResult<SchoolClass> {
        let row = sqlx::query_as::<_, SchoolClass>(
            "INSERT INTO classes (course, grade, school_year) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.course)
        .bind(&data.grade)
        .bind(data.school_year)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn classes_list(&self) -> AppResult<Vec<SchoolClass>> {
        let rows = sqlx::query_as::<_, SchoolClass>(
            "SELECT * FROM classes ORDER BY school_year DESC, course, grade",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
