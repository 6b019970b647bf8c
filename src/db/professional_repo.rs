// src/db/professional_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::catalog::ProfessionalRow};

#[derive(Clone)]
pub struct ProfessionalRepository {
    #[allow(dead_code)]
    pool: SqlitePool,
}

impl ProfessionalRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list<'e, E>(&self, executor: E) -> Result<Vec<ProfessionalRow>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let rows = sqlx::query_as::<_, ProfessionalRow>(
            "SELECT * FROM professionals ORDER BY created_at DESC",
        )
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: &str,
    ) -> Result<Option<ProfessionalRow>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let row = sqlx::query_as::<_, ProfessionalRow>("SELECT * FROM professionals WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        id: &str,
        name: &str,
        email: &str,
        phone: &str,
        specialties_json: &str,
        commission_rate: f64,
        work_schedule_json: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO professionals (
                id, name, email, phone, specialties, commission_rate, work_schedule, active, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?)
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(specialties_json)
        .bind(commission_rate)
        .bind(work_schedule_json)
        .bind(chrono::Utc::now().naive_utc())
        .execute(executor)
        .await?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: &str,
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        specialties_json: Option<&str>,
        commission_rate: Option<f64>,
        work_schedule_json: Option<&str>,
        active: Option<bool>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE professionals SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                phone = COALESCE(?, phone),
                specialties = COALESCE(?, specialties),
                commission_rate = COALESCE(?, commission_rate),
                work_schedule = COALESCE(?, work_schedule),
                active = COALESCE(?, active)
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(specialties_json)
        .bind(commission_rate)
        .bind(work_schedule_json)
        .bind(active)
        .bind(id)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ProfessionalNotFound);
        }
        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM professionals WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ProfessionalNotFound);
        }
        Ok(())
    }
}
