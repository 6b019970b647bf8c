// src/db/user_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::auth::{User, UserPublic, UserRole},
};

// O repositório de usuários. A coluna password (hash bcrypt) só sai daqui
// pela busca por e-mail do login; todas as listagens usam a projeção
// UserPublic.
#[derive(Clone)]
pub struct UserRepository {
    #[allow(dead_code)]
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email<'e, E>(
        &self,
        executor: E,
        email: &str,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: &str,
    ) -> Result<Option<UserPublic>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let user = sqlx::query_as::<_, UserPublic>(
            "SELECT id, name, email, role, phone, active, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(user)
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        role: Option<&str>,
        active: Option<bool>,
        search: Option<&str>,
    ) -> Result<Vec<UserPublic>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut sql = String::from(
            "SELECT id, name, email, role, phone, active, created_at FROM users WHERE 1=1",
        );
        let mut binds: Vec<String> = Vec::new();

        if let Some(role) = role.filter(|r| *r != "all") {
            sql.push_str(" AND role = ?");
            binds.push(role.to_string());
        }
        if let Some(active) = active {
            sql.push_str(" AND active = ?");
            binds.push(if active { "1".into() } else { "0".into() });
        }
        if let Some(search) = search {
            sql.push_str(" AND (name LIKE ? OR email LIKE ?)");
            let pattern = format!("%{}%", search);
            binds.push(pattern.clone());
            binds.push(pattern);
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query_as::<_, UserPublic>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let users = query.fetch_all(executor).await?;
        Ok(users)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        id: &str,
        name: &str,
        email: &str,
        hashed_password: &str,
        role: UserRole,
        phone: Option<&str>,
        active: bool,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password, role, phone, active, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(hashed_password)
        .bind(role)
        .bind(phone)
        .bind(active)
        .bind(chrono::Utc::now().naive_utc())
        .execute(executor)
        .await
        .map_err(|e| {
            // Converte violação de chave única em erro amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            e.into()
        })?;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: &str,
        name: Option<&str>,
        email: Option<&str>,
        hashed_password: Option<&str>,
        role: Option<UserRole>,
        phone: Option<&str>,
        active: Option<bool>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                password = COALESCE(?, password),
                role = COALESCE(?, role),
                phone = COALESCE(?, phone),
                active = COALESCE(?, active)
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(hashed_password)
        .bind(role)
        .bind(phone)
        .bind(active)
        .bind(id)
        .execute(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            AppError::from(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }
}
