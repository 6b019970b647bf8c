// src/db/sale_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::sales::{PaymentMethod, Sale, SaleItem, SaleItemKind, SalePayment, SaleStatus},
};

// Persistência de vendas e seus filhos. Vendas são imutáveis depois de
// criadas; não há UPDATE aqui.
#[derive(Clone)]
pub struct SaleRepository {
    #[allow(dead_code)]
    pool: SqlitePool,
}

impl SaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_sale<'e, E>(
        &self,
        executor: E,
        id: &str,
        client_id: Option<&str>,
        professional_id: Option<&str>,
        subtotal: f64,
        discount: f64,
        total: f64,
        status: SaleStatus,
        notes: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO sales (id, client_id, professional_id, subtotal, discount, total, status, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(client_id)
        .bind(professional_id)
        .bind(subtotal)
        .bind(discount)
        .bind(total)
        .bind(status)
        .bind(notes)
        .bind(chrono::Utc::now().naive_utc())
        .execute(executor)
        .await?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_item<'e, E>(
        &self,
        executor: E,
        id: &str,
        sale_id: &str,
        kind: SaleItemKind,
        item_id: &str,
        item_name: &str,
        quantity: f64,
        price: f64,
        discount: f64,
        total: f64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO sale_items (id, sale_id, type, item_id, item_name, quantity, price, discount, total, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(sale_id)
        .bind(kind)
        .bind(item_id)
        .bind(item_name)
        .bind(quantity)
        .bind(price)
        .bind(discount)
        .bind(total)
        .bind(chrono::Utc::now().naive_utc())
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn insert_payment<'e, E>(
        &self,
        executor: E,
        id: &str,
        sale_id: &str,
        method: PaymentMethod,
        amount: f64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO sale_payments (id, sale_id, method, amount, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(sale_id)
        .bind(method)
        .bind(amount)
        .bind(chrono::Utc::now().naive_utc())
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: &str) -> Result<Option<Sale>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(sale)
    }

    pub async fn list_items<'e, E>(
        &self,
        executor: E,
        sale_id: &str,
    ) -> Result<Vec<SaleItem>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let items =
            sqlx::query_as::<_, SaleItem>("SELECT * FROM sale_items WHERE sale_id = ?")
                .bind(sale_id)
                .fetch_all(executor)
                .await?;
        Ok(items)
    }

    pub async fn list_payments<'e, E>(
        &self,
        executor: E,
        sale_id: &str,
    ) -> Result<Vec<SalePayment>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let payments =
            sqlx::query_as::<_, SalePayment>("SELECT * FROM sale_payments WHERE sale_id = ?")
                .bind(sale_id)
                .fetch_all(executor)
                .await?;
        Ok(payments)
    }

    /// Listagem por intervalo de datas de criação, mais recentes primeiro.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Sale>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut sql = String::from("SELECT * FROM sales WHERE 1=1");
        if start_date.is_some() {
            sql.push_str(" AND date(created_at) >= ?");
        }
        if end_date.is_some() {
            sql.push_str(" AND date(created_at) <= ?");
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query_as::<_, Sale>(&sql);
        if let Some(start_date) = start_date {
            query = query.bind(start_date);
        }
        if let Some(end_date) = end_date {
            query = query.bind(end_date);
        }
        let sales = query.fetch_all(executor).await?;
        Ok(sales)
    }
}
