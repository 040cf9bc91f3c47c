//! Librarian domain methods on Repository

use super::Repository;
use crate::{error::AppResult, models::librarian::Librarian};

impl Repository {
    /// True if a librarian already uses this CPF or e-mail
    pub async fn librarians_exists(&self, cpf: &str, email: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM librarians WHERE cpf = $1 OR email = $2)",
        )
        .bind(cpf)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    pub async fn librarians_create(
        &self,
        cpf: &str,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<Librarian> {
        let row = sqlx::query_as::<_, Librarian>(
            r#"
            INSERT INTO librarians (cpf, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(cpf)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn librarians_list(&self) -> AppResult<Vec<Librarian>> {
        let rows = sqlx::query_as::<_, Librarian>("SELECT * FROM librarians ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn librarians_get(&self, id: i32) -> AppResult<Option<Librarian>> {
        let row = sqlx::query_as::<_, Librarian>("SELECT * FROM librarians WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn librarians_update(
        &self,
        id: i32,
        cpf: &str,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<Option<Librarian>> {
        let row = sqlx::query_as::<_, Librarian>(
            r#"
            UPDATE librarians
            SET cpf = $1, name = $2, email = $3, password_hash = $4
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(cpf)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn librarians_delete(&self, id: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM librarians WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
