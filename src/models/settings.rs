// src/models/settings.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub category: String,
    pub updated_at: Option<NaiveDateTime>,
}

// Resultado do PUT em lote: quais chaves de fato existiam e foram escritas.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdateResult {
    pub success: bool,
    pub updated: Vec<String>,
    pub message: String,
}
