// src/db/appointment_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::scheduling::{Appointment, AppointmentStatus},
};

#[derive(Clone)]
pub struct AppointmentRepository {
    #[allow(dead_code)]
    pool: SqlitePool,
}

impl AppointmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        date: Option<NaiveDate>,
        professional_id: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<Appointment>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut sql = String::from("SELECT * FROM appointments WHERE 1=1");
        let mut binds: Vec<String> = Vec::new();

        if let Some(date) = date {
            sql.push_str(" AND date = ?");
            binds.push(date.to_string());
        }
        if let Some(professional_id) = professional_id.filter(|p| *p != "all") {
            sql.push_str(" AND professional_id = ?");
            binds.push(professional_id.to_string());
        }
        if let Some(status) = status {
            sql.push_str(" AND status = ?");
            binds.push(status.to_string());
        }
        sql.push_str(" ORDER BY date DESC, time DESC");

        let mut query = sqlx::query_as::<_, Appointment>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let appointments = query.fetch_all(executor).await?;
        Ok(appointments)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: &str,
    ) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let appointment =
            sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = ?")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(appointment)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        id: &str,
        client_id: Option<&str>,
        client_name: &str,
        professional_id: Option<&str>,
        professional_name: &str,
        service_id: Option<&str>,
        service_name: &str,
        date: NaiveDate,
        time: &str,
        duration: i64,
        price: f64,
        status: AppointmentStatus,
        notes: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO appointments (
                id, client_id, client_name, professional_id, professional_name,
                service_id, service_name, date, time, duration, price, status, notes, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(client_id)
        .bind(client_name)
        .bind(professional_id)
        .bind(professional_name)
        .bind(service_id)
        .bind(service_name)
        .bind(date)
        .bind(time)
        .bind(duration)
        .bind(price)
        .bind(status)
        .bind(notes)
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
        date: Option<NaiveDate>,
        time: Option<&str>,
        duration: Option<i64>,
        price: Option<f64>,
        status: Option<AppointmentStatus>,
        notes: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE appointments SET
                date = COALESCE(?, date),
                time = COALESCE(?, time),
                duration = COALESCE(?, duration),
                price = COALESCE(?, price),
                status = COALESCE(?, status),
                notes = COALESCE(?, notes)
            WHERE id = ?
            "#,
        )
        .bind(date)
        .bind(time)
        .bind(duration)
        .bind(price)
        .bind(status)
        .bind(notes)
        .bind(id)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::AppointmentNotFound);
        }
        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::AppointmentNotFound);
        }
        Ok(())
    }
}
