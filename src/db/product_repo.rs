// src/db/product_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::inventory::{Product, ProductKind},
};

#[derive(Clone)]
pub struct ProductRepository {
    #[allow(dead_code)]
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        category: Option<&str>,
        kind: Option<&str>,
        low_stock: bool,
    ) -> Result<Vec<Product>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        // Filtros opcionais montados na mesma ordem dos binds.
        let mut sql = String::from("SELECT * FROM products WHERE 1=1");
        let mut binds: Vec<String> = Vec::new();

        if let Some(category) = category.filter(|c| *c != "ALL") {
            sql.push_str(" AND category = ?");
            binds.push(category.to_string());
        }
        if let Some(kind) = kind.filter(|t| *t != "ALL") {
            sql.push_str(" AND type = ?");
            binds.push(kind.to_string());
        }
        if low_stock {
            sql.push_str(" AND current_stock <= min_stock");
        }
        sql.push_str(" ORDER BY name");

        let mut query = sqlx::query_as::<_, Product>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let products = query.fetch_all(executor).await?;
        Ok(products)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: &str,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(product)
    }

    pub async fn sku_exists<'e, E>(&self, executor: E, sku: &str) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let found = sqlx::query_scalar::<_, String>("SELECT id FROM products WHERE sku = ?")
            .bind(sku)
            .fetch_optional(executor)
            .await?;
        Ok(found.is_some())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create<'e, E>(
        &self,
        executor: E,
        id: &str,
        name: &str,
        kind: ProductKind,
        category: &str,
        brand: Option<&str>,
        sku: &str,
        current_stock: f64,
        min_stock: f64,
        max_stock: f64,
        unit: &str,
        cost_price: f64,
        sale_price: Option<f64>,
        supplier: Option<&str>,
        notes: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, type, category, brand, sku, current_stock, min_stock, max_stock,
                unit, cost_price, sale_price, supplier, notes, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(kind)
        .bind(category)
        .bind(brand)
        .bind(sku)
        .bind(current_stock)
        .bind(min_stock)
        .bind(max_stock)
        .bind(unit)
        .bind(cost_price)
        .bind(sale_price)
        .bind(supplier)
        .bind(notes)
        .bind(chrono::Utc::now().naive_utc())
        .execute(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::SkuAlreadyExists;
                }
            }
            e.into()
        })?;
        Ok(())
    }

    /// Atualização parcial: campos ausentes mantêm o valor atual.
    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: &str,
        name: Option<&str>,
        kind: Option<ProductKind>,
        category: Option<&str>,
        brand: Option<&str>,
        sku: Option<&str>,
        min_stock: Option<f64>,
        max_stock: Option<f64>,
        unit: Option<&str>,
        cost_price: Option<f64>,
        sale_price: Option<f64>,
        supplier: Option<&str>,
        notes: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = COALESCE(?, name),
                type = COALESCE(?, type),
                category = COALESCE(?, category),
                brand = COALESCE(?, brand),
                sku = COALESCE(?, sku),
                min_stock = COALESCE(?, min_stock),
                max_stock = COALESCE(?, max_stock),
                unit = COALESCE(?, unit),
                cost_price = COALESCE(?, cost_price),
                sale_price = COALESCE(?, sale_price),
                supplier = COALESCE(?, supplier),
                notes = COALESCE(?, notes)
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(kind)
        .bind(category)
        .bind(brand)
        .bind(sku)
        .bind(min_stock)
        .bind(max_stock)
        .bind(unit)
        .bind(cost_price)
        .bind(sale_price)
        .bind(supplier)
        .bind(notes)
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::SkuAlreadyExists;
                }
            }
            AppError::from(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }

    /// Persiste o novo saldo derivado. Chamado apenas pelo StockService:
    /// qualquer outra escrita em current_stock quebraria o livro-razão.
    pub async fn set_current_stock<'e, E>(
        &self,
        executor: E,
        id: &str,
        current_stock: f64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("UPDATE products SET current_stock = ? WHERE id = ?")
            .bind(current_stock)
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ProductNotFound);
        }
        Ok(())
    }
}
