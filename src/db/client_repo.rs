// src/db/client_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{
    common::error::AppError,
    models::crm::{Client, ClientStats},
};

#[derive(Clone)]
pub struct ClientRepository {
    #[allow(dead_code)]
    pool: SqlitePool,
}

impl ClientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Lista apenas clientes ativos; busca textual em nome/email/telefone.
    pub async fn list<'e, E>(
        &self,
        executor: E,
        search: Option<&str>,
        segment: Option<&str>,
    ) -> Result<Vec<Client>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut sql = String::from("SELECT * FROM clients WHERE active = 1");
        let mut binds: Vec<String> = Vec::new();

        if let Some(search) = search {
            sql.push_str(" AND (name LIKE ? OR email LIKE ? OR phone LIKE ?)");
            let pattern = format!("%{}%", search);
            binds.push(pattern.clone());
            binds.push(pattern.clone());
            binds.push(pattern);
        }
        if let Some(segment) = segment {
            sql.push_str(" AND segment = ?");
            binds.push(segment.to_string());
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = sqlx::query_as::<_, Client>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let clients = query.fetch_all(executor).await?;
        Ok(clients)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: &str,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ?")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(client)
    }

    pub async fn email_exists<'e, E>(&self, executor: E, email: &str) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let found = sqlx::query_scalar::<_, String>("SELECT id FROM clients WHERE email = ?")
            .bind(email)
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
        email: &str,
        phone: &str,
        birthdate: Option<NaiveDate>,
        address: Option<&str>,
        city: Option<&str>,
        state: Option<&str>,
        zip_code: Option<&str>,
        notes: Option<&str>,
        segment: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            r#"
            INSERT INTO clients (
                id, name, email, phone, birthdate, address, city, state, zip_code,
                notes, segment, total_visits, total_spent, active, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, 0, 1, ?)
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(birthdate)
        .bind(address)
        .bind(city)
        .bind(state)
        .bind(zip_code)
        .bind(notes)
        .bind(segment)
        .bind(chrono::Utc::now().naive_utc())
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Atualização parcial: campos ausentes mantêm o valor atual.
    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: &str,
        name: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        birthdate: Option<NaiveDate>,
        address: Option<&str>,
        city: Option<&str>,
        state: Option<&str>,
        zip_code: Option<&str>,
        notes: Option<&str>,
        segment: Option<&str>,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            r#"
            UPDATE clients SET
                name = COALESCE(?, name),
                email = COALESCE(?, email),
                phone = COALESCE(?, phone),
                birthdate = COALESCE(?, birthdate),
                address = COALESCE(?, address),
                city = COALESCE(?, city),
                state = COALESCE(?, state),
                zip_code = COALESCE(?, zip_code),
                notes = COALESCE(?, notes),
                segment = COALESCE(?, segment)
            WHERE id = ?
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(phone)
        .bind(birthdate)
        .bind(address)
        .bind(city)
        .bind(state)
        .bind(zip_code)
        .bind(notes)
        .bind(segment)
        .bind(id)
        .execute(executor)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ClientNotFound);
        }
        Ok(())
    }

    /// Escreve os contadores de fidelidade com valores absolutos. O motor
    /// de venda lê os valores atuais e envia os incrementados.
    pub async fn update_stats<'e, E>(
        &self,
        executor: E,
        id: &str,
        total_visits: i64,
        total_spent: f64,
        last_visit: NaiveDate,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "UPDATE clients SET total_visits = ?, total_spent = ?, last_visit = ? WHERE id = ?",
        )
        .bind(total_visits)
        .bind(total_spent)
        .bind(last_visit)
        .bind(id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Reconciliação fora do caminho quente: refaz os contadores a partir
    /// do histórico de vendas em vez dos incrementos acumulados.
    pub async fn recalculate_stats<'e, E>(
        &self,
        executor: E,
        client_id: &str,
    ) -> Result<ClientStats, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let stats = sqlx::query_as::<_, ClientStats>(
            r#"
            SELECT COUNT(*) AS total_visits,
                   CAST(COALESCE(SUM(total), 0) AS REAL) AS total_spent,
                   MAX(date(created_at)) AS last_visit
            FROM sales
            WHERE client_id = ?
            "#,
        )
        .bind(client_id)
        .fetch_one(executor)
        .await?;
        Ok(stats)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: &str) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(executor)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::ClientNotFound);
        }
        Ok(())
    }
}
