// src/db/stock_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::inventory::{MovementType, StockMovement},
};

// Acesso ao livro-razão de movimentações. A tabela é append-only: este
// repositório não expõe UPDATE nem DELETE.
#[derive(Clone)]
pub struct StockRepository {
    #[allow(dead_code)]
    pool: SqlitePool,
}

impl StockRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert_movement<'e, E>(
        &self,
        executor: E,
        id: &str,
        product_id: &str,
        kind: MovementType,
        quantity: f64,
        reason: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO stock_movements (id, product_id, type, quantity, reason, user_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(product_id)
        .bind(kind)
        .bind(quantity)
        .bind(reason)
        .bind(user_id)
        .bind(chrono::Utc::now().naive_utc())
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Busca a movimentação já juntada com o nome do produto, como o
    /// frontend espera receber no 201.
    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: &str,
    ) -> Result<Option<StockMovement>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT sm.id, sm.product_id, p.name AS product_name, sm.type, sm.quantity,
                   sm.reason, sm.user_id, sm.created_at
            FROM stock_movements sm
            LEFT JOIN products p ON sm.product_id = p.id
            WHERE sm.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(movement)
    }

    /// Histórico de movimentações, mais recentes primeiro. Leitura pura.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        product_id: Option<&str>,
    ) -> Result<Vec<StockMovement>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut sql = String::from(
            r#"
            SELECT sm.id, sm.product_id, p.name AS product_name, sm.type, sm.quantity,
                   sm.reason, sm.user_id, sm.created_at
            FROM stock_movements sm
            LEFT JOIN products p ON sm.product_id = p.id
            WHERE 1=1
            "#,
        );
        if product_id.is_some() {
            sql.push_str(" AND sm.product_id = ?");
        }
        sql.push_str(" ORDER BY sm.created_at DESC");

        let mut query = sqlx::query_as::<_, StockMovement>(&sql);
        if let Some(product_id) = product_id {
            query = query.bind(product_id);
        }
        let movements = query.fetch_all(executor).await?;
        Ok(movements)
    }
}
