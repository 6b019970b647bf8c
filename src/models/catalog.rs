// src/models/catalog.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// --- Serviços do catálogo ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    // Duração em minutos
    pub duration: i64,
    pub category: Option<String>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

// --- Profissionais ---
// specialties e work_schedule são JSON serializado na coluna TEXT;
// o DTO da API expõe as formas estruturadas.
#[derive(Debug, Clone, FromRow)]
pub struct ProfessionalRow {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialties: Option<String>,
    pub commission_rate: f64,
    pub work_schedule: Option<String>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Professional {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialties: Vec<String>,
    pub commission: f64,
    pub work_schedule: serde_json::Value,
    pub status: &'static str,
    pub created_at: NaiveDateTime,
}

impl From<ProfessionalRow> for Professional {
    fn from(row: ProfessionalRow) -> Self {
        let specialties = row
            .specialties
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default();
        let work_schedule = row
            .work_schedule
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_else(|| serde_json::json!({}));

        Professional {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            specialties,
            commission: row.commission_rate,
            work_schedule,
            status: if row.active { "ACTIVE" } else { "INACTIVE" },
            created_at: row.created_at,
        }
    }
}
