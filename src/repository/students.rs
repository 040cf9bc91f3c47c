//! Student domain methods on Repository

use super::Repository;
use crate::{
    error::AppResult,
    models::student::{CreateStudent, Student, UpdateStudent},
};

impl Repository {
    /// True if another student already uses this CPF
    pub async fn students_cpf_exists(&self, cpf: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM students WHERE cpf = $1)")
            .bind(cpf)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub async fn students_create(&self, data: &CreateStudent) -> AppResult<Student> {
        let row = sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (registration_number, name, cpf, birth_date, class_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.registration_number)
        .bind(&data.name)
        .bind(&data.cpf)
        .bind(data.birth_date)
        .bind(data.class_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn students_list(&self) -> AppResult<Vec<Student>> {
        let rows = sqlx::query_as::<_, Student>("SELECT * FROM students ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn students_get(&self, registration_number: &str) -> AppResult<Option<Student>> {
        let row = sqlx::query_as::<_, Student>(
            "SELECT * FROM students WHERE registration_number = $1",
        )
        .bind(registration_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Returns None when no student has this registration number
    pub async fn students_update(
        &self,
        registration_number: &str,
        data: &UpdateStudent,
    ) -> AppResult<Option<Student>> {
        let row = sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET name = $1, cpf = $2, birth_date = $3, class_id = $4
            WHERE registration_number = $5
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.cpf)
        .bind(data.birth_date)
        .bind(data.class_id)
        .bind(registration_number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Returns the number of deleted rows
    pub async fn students_delete(&self, registration_number: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM students WHERE registration_number = $1")
            .bind(registration_number)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
