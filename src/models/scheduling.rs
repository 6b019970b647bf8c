// src/models/scheduling.rs

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

// Agendamento com nomes/preço denormalizados no momento da marcação, para
// que a agenda histórica não mude quando o cadastro for editado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub client_id: Option<String>,
    pub client_name: String,
    pub professional_id: Option<String>,
    pub professional_name: String,
    pub service_id: Option<String>,
    pub service_name: String,
    pub date: NaiveDate,
    // Horário "HH:MM" como o frontend envia
    pub time: String,
    pub duration: i64,
    pub price: f64,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}
