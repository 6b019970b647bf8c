// src/db/dashboard_repo.rs

use chrono::{Duration, Utc};
use sqlx::{Acquire, Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::dashboard::{DashboardMetrics, TodayAppointmentEntry},
};

#[derive(Clone)]
pub struct DashboardRepository {
    #[allow(dead_code)]
    pool: SqlitePool,
}

impl DashboardRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Snapshot das métricas do painel. Roda todas as consultas dentro de
    /// uma transação para ler um estado consistente.
    pub async fn get_metrics<'e, E>(&self, executor: E) -> Result<DashboardMetrics, AppError>
    where
        E: Executor<'e, Database = Sqlite> + Acquire<'e, Database = Sqlite>,
    {
        let mut tx = executor.begin().await?;

        let today = Utc::now().date_naive();
        let current_month = Utc::now().format("%Y-%m").to_string();
        let thirty_days_ago = today - Duration::days(30);
        let last_month = (Utc::now() - Duration::days(30)).format("%Y-%m").to_string();

        // A. Agendamentos de hoje
        let today_appointments = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM appointments WHERE date = ?",
        )
        .bind(today)
        .fetch_one(&mut *tx)
        .await?;

        // B. Receita de hoje (agendamentos concluídos + transações pagas hoje)
        let today_appointments_revenue = sqlx::query_scalar::<_, f64>(
            r#"
            SELECT CAST(COALESCE(SUM(price), 0) AS REAL)
            FROM appointments
            WHERE date = ? AND status = 'COMPLETED'
            "#,
        )
        .bind(today)
        .fetch_one(&mut *tx)
        .await?;

        let today_transactions_revenue = sqlx::query_scalar::<_, f64>(
            r#"
            SELECT CAST(COALESCE(SUM(amount), 0) AS REAL)
            FROM transactions
            WHERE date(COALESCE(paid_date, created_at)) = ?
              AND type = 'INCOME'
              AND status = 'PAID'
            "#,
        )
        .bind(today)
        .fetch_one(&mut *tx)
        .await?;

        // C. Receita do mês atual (transações pagas)
        let month_revenue = sqlx::query_scalar::<_, f64>(
            r#"
            SELECT CAST(COALESCE(SUM(amount), 0) AS REAL)
            FROM transactions
            WHERE strftime('%Y-%m', created_at) = ?
              AND type = 'INCOME'
              AND status = 'PAID'
            "#,
        )
        .bind(&current_month)
        .fetch_one(&mut *tx)
        .await?;

        // D. Clientes ativos (com visitas nos últimos 30 dias)
        let active_clients = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(DISTINCT client_id)
            FROM appointments
            WHERE date >= ? AND client_id IS NOT NULL
            "#,
        )
        .bind(thirty_days_ago)
        .fetch_one(&mut *tx)
        .await?;

        // E. Crescimento em relação ao mês anterior
        let last_month_revenue = sqlx::query_scalar::<_, f64>(
            r#"
            SELECT CAST(COALESCE(SUM(amount), 0) AS REAL)
            FROM transactions
            WHERE strftime('%Y-%m', created_at) = ?
              AND type = 'INCOME'
              AND status = 'PAID'
            "#,
        )
        .bind(&last_month)
        .fetch_one(&mut *tx)
        .await?;

        let last_month_appointments = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM appointments WHERE strftime('%Y-%m', date) = ?",
        )
        .bind(&last_month)
        .fetch_one(&mut *tx)
        .await?;

        let current_month_appointments = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM appointments WHERE strftime('%Y-%m', date) = ?",
        )
        .bind(&current_month)
        .fetch_one(&mut *tx)
        .await?;

        // F. Total de clientes cadastrados
        let total_clients = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients")
            .fetch_one(&mut *tx)
            .await?;

        // G. Lista de agendamentos de hoje
        let appointments_list = sqlx::query_as::<_, TodayAppointmentEntry>(
            r#"
            SELECT id, client_name, service_name, time, status, price
            FROM appointments
            WHERE date = ?
            ORDER BY time ASC
            "#,
        )
        .bind(today)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        let revenue_growth = if last_month_revenue > 0.0 {
            round1((month_revenue - last_month_revenue) / last_month_revenue * 100.0)
        } else {
            0.0
        };
        let appointments_growth = if last_month_appointments > 0 {
            round1(
                (current_month_appointments - last_month_appointments) as f64
                    / last_month_appointments as f64
                    * 100.0,
            )
        } else {
            0.0
        };

        Ok(DashboardMetrics {
            today_revenue: today_appointments_revenue + today_transactions_revenue,
            today_appointments,
            active_clients,
            month_revenue,
            revenue_growth,
            appointments_growth,
            // Sem base de comparação para novos cadastros no momento
            clients_growth: 0.0,
            total_clients,
            appointments_list,
        })
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::round1;

    #[test]
    fn round1_keeps_one_decimal() {
        assert_eq!(round1(12.345), 12.3);
        assert_eq!(round1(-3.27), -3.3);
        assert_eq!(round1(0.0), 0.0);
    }
}
