// src/db/service_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::catalog::Service};

// Catálogo inicial gravado na primeira subida.
const DEFAULT_SERVICES: &[(&str, &str, &str, f64, i64, &str)] = &[
    ("s1", "Corte Feminino", "Corte completo", 80.0, 60, "Cabelo"),
    ("s2", "Corte Masculino", "Corte masculino", 50.0, 30, "Cabelo"),
    ("s3", "Coloração", "Coloração completa", 200.0, 120, "Cabelo"),
    ("s4", "Escova", "Escova modeladora", 60.0, 45, "Cabelo"),
    ("s5", "Manicure", "Manicure completa", 40.0, 45, "Unhas"),
    ("s6", "Pedicure", "Pedicure completa", 50.0, 60, "Unhas"),
];

#[derive(Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Popula o catálogo padrão se a tabela estiver vazia. Idempotente.
    pub async fn seed_defaults(&self) -> Result<(), AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM services")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        for (id, name, description, price, duration, category) in DEFAULT_SERVICES {
            self.create(&self.pool, id, name, Some(description), *price, *duration, category)
                .await?;
        }
        tracing::info!("Catálogo de serviços padrão criado");
        Ok(())
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        category: Option<&str>,
    ) -> Result<Vec<Service>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut sql = String::from("SELECT * FROM services WHERE active = 1");
        if category.is_some() {
            sql.push_str(" AND category = ?");
        }
        sql.push_str(" ORDER BY category, name");

        let mut query = sqlx::query_as::<_, Service>(&sql);
        if let Some(category) = category {
            query = query.bind(category);
        }
        let services = query.fetch_all(executor).await?;
        Ok(services)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: &str,
    ) -> Result<Option<Service>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let service = sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(service)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        id: &str,
        name: &str,
        description: Option<&str>,
        price: f64,
        duration: i64,
        category: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO services (id, name, description, price, duration, category, active, created_at)
            VALUES (?, ?, ?, ?, ?, ?, 1, ?)
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(duration)
        .bind(category)
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
        description: Option<&str>,
        price: Option<f64>,
        duration: Option<i64>,
        category: Option<&str>,
        active: Option<bool>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE services SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                price = COALESCE(?, price),
                duration = COALESCE(?, duration),
                category = COALESCE(?, category),
                active = COALESCE(?, active)
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(duration)
        .bind(category)
        .bind(active)
        .bind(id)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ServiceNotFound);
        }
        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM services WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ServiceNotFound);
        }
        Ok(())
    }
}
