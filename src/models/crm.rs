// src/models/crm.rs

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Segmentação usada pelos filtros do CRM. A reclassificação automática
// fica fora do fluxo de venda.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientSegment {
    New,
    Regular,
    Vip,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
    // Contadores incrementados pelo motor de venda a cada checkout com
    // cliente identificado; `recalculate_stats` refaz a partir do histórico.
    pub total_visits: i64,
    pub total_spent: f64,
    pub last_visit: Option<NaiveDate>,
    pub segment: ClientSegment,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

// Estatísticas recalculadas a partir do histórico de vendas, para
// conferência fora do caminho quente.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClientStats {
    pub total_visits: i64,
    pub total_spent: f64,
    pub last_visit: Option<NaiveDate>,
}
