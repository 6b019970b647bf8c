// src/db/transaction_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::finance::{Transaction, TransactionStatus, TransactionType},
};

#[derive(Clone)]
pub struct TransactionRepository {
    #[allow(dead_code)]
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        kind: Option<&str>,
        status: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Transaction>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut sql = String::from("SELECT * FROM transactions WHERE 1=1");
        let mut binds: Vec<String> = Vec::new();

        if let Some(kind) = kind.filter(|t| *t != "ALL") {
            sql.push_str(" AND type = ?");
            binds.push(kind.to_string());
        }
        if let Some(status) = status.filter(|s| *s != "ALL") {
            sql.push_str(" AND status = ?");
            binds.push(status.to_string());
        }
        if let Some(start_date) = start_date {
            sql.push_str(" AND due_date >= ?");
            binds.push(start_date.to_string());
        }
        if let Some(end_date) = end_date {
            sql.push_str(" AND due_date <= ?");
            binds.push(end_date.to_string());
        }
        sql.push_str(" ORDER BY due_date DESC, created_at DESC");

        let mut query = sqlx::query_as::<_, Transaction>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let transactions = query.fetch_all(executor).await?;
        Ok(transactions)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: &str,
    ) -> Result<Option<Transaction>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let transaction =
            sqlx::query_as::<_, Transaction>("SELECT * FROM transactions WHERE id = ?")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(transaction)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        id: &str,
        kind: TransactionType,
        category: &str,
        description: &str,
        amount: f64,
        status: TransactionStatus,
        payment_method: Option<&str>,
        due_date: NaiveDate,
        paid_date: Option<NaiveDate>,
        client_id: Option<&str>,
        professional_id: Option<&str>,
        notes: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, type, category, description, amount, status, payment_method,
                due_date, paid_date, client_id, professional_id, notes, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(kind)
        .bind(category)
        .bind(description)
        .bind(amount)
        .bind(status)
        .bind(payment_method)
        .bind(due_date)
        .bind(paid_date)
        .bind(client_id)
        .bind(professional_id)
        .bind(notes)
        .bind(chrono::Utc::now().naive_utc())
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Atualização parcial; usada principalmente para marcar um PENDING
    /// como PAID com a data de pagamento.
    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: &str,
        category: Option<&str>,
        description: Option<&str>,
        amount: Option<f64>,
        status: Option<TransactionStatus>,
        payment_method: Option<&str>,
        due_date: Option<NaiveDate>,
        paid_date: Option<NaiveDate>,
        notes: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE transactions SET
                category = COALESCE(?, category),
                description = COALESCE(?, description),
                amount = COALESCE(?, amount),
                status = COALESCE(?, status),
                payment_method = COALESCE(?, payment_method),
                due_date = COALESCE(?, due_date),
                paid_date = COALESCE(?, paid_date),
                notes = COALESCE(?, notes)
            WHERE id = ?
            "#,
        )
        .bind(category)
        .bind(description)
        .bind(amount)
        .bind(status)
        .bind(payment_method)
        .bind(due_date)
        .bind(paid_date)
        .bind(notes)
        .bind(id)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::TransactionNotFound);
        }
        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::TransactionNotFound);
        }
        Ok(())
    }
}
