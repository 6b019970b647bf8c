// src/db/settings_repo.rs

use sqlx::{Executor, Sqlite, SqlitePool};

use crate::{common::error::AppError, models::settings::Setting};

// Valores gravados na primeira inicialização, espelhando o que a tela de
// configurações espera encontrar.
const DEFAULT_SETTINGS: &[(&str, &str, &str)] = &[
    // Gerais
    ("business_name", "SalonX", "general"),
    ("business_email", "contato@bunx.io", "general"),
    ("business_phone", "(11) 99999-9999", "general"),
    ("business_address", "", "general"),
    ("business_city", "", "general"),
    ("business_state", "", "general"),
    ("business_zipcode", "", "general"),
    // Agendamento
    ("booking_interval", "30", "booking"),
    ("booking_start_hour", "08:00", "booking"),
    ("booking_end_hour", "20:00", "booking"),
    ("booking_max_advance_days", "90", "booking"),
    ("booking_allow_overlap", "false", "booking"),
    ("booking_require_confirmation", "true", "booking"),
    // Financeiro
    ("default_commission", "30", "financial"),
    ("accept_credit_card", "true", "financial"),
    ("accept_debit_card", "true", "financial"),
    ("accept_pix", "true", "financial"),
    ("accept_cash", "true", "financial"),
    // Notificações
    ("notify_new_appointment", "true", "notifications"),
    ("notify_appointment_reminder", "true", "notifications"),
    ("notify_low_stock", "true", "notifications"),
    ("notification_reminder_hours", "24", "notifications"),
    // Estoque
    ("stock_alert_threshold", "10", "stock"),
    ("stock_auto_deduct", "false", "stock"),
];

#[derive(Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Grava os padrões na primeira subida. Idempotente: só insere se a
    /// tabela estiver vazia.
    pub async fn seed_defaults(&self) -> Result<(), AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM settings")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        for (key, value, category) in DEFAULT_SETTINGS {
            sqlx::query("INSERT INTO settings (key, value, category) VALUES (?, ?, ?)")
                .bind(key)
                .bind(value)
                .bind(category)
                .execute(&self.pool)
                .await?;
        }
        tracing::info!("Configurações padrão gravadas");
        Ok(())
    }

    pub async fn list<'e, E>(
        &self,
        executor: E,
        category: Option<&str>,
        key: Option<&str>,
    ) -> Result<Vec<Setting>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let mut sql = String::from("SELECT * FROM settings WHERE 1=1");
        let mut binds: Vec<String> = Vec::new();

        if let Some(category) = category {
            sql.push_str(" AND category = ?");
            binds.push(category.to_string());
        }
        if let Some(key) = key {
            sql.push_str(" AND key = ?");
            binds.push(key.to_string());
        }

        let mut query = sqlx::query_as::<_, Setting>(&sql);
        for bind in &binds {
            query = query.bind(bind);
        }
        let settings = query.fetch_all(executor).await?;
        Ok(settings)
    }

    pub async fn find_by_key<'e, E>(
        &self,
        executor: E,
        key: &str,
    ) -> Result<Option<Setting>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let setting = sqlx::query_as::<_, Setting>("SELECT * FROM settings WHERE key = ?")
            .bind(key)
            .fetch_optional(executor)
            .await?;
        Ok(setting)
    }

    /// Atualiza uma chave existente; devolve false se a chave não existe
    /// (o PUT em lote só reporta as que mudaram).
    pub async fn update_value<'e, E>(
        &self,
        executor: E,
        key: &str,
        value: &str,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE settings SET value = ?, updated_at = datetime('now') WHERE key = ?",
        )
        .bind(value)
        .bind(key)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        key: &str,
        value: &str,
        category: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query("INSERT INTO settings (key, value, category) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(category)
            .execute(executor)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::SettingAlreadyExists;
                    }
                }
                e.into()
            })?;
        Ok(())
    }
}
