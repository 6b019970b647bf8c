// src/models/dashboard.rs

use serde::Serialize;
use sqlx::FromRow;

// Entrada da lista "agenda de hoje" exibida no painel.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TodayAppointmentEntry {
    pub id: String,
    pub client_name: String,
    pub service_name: String,
    pub time: String,
    pub status: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub today_revenue: f64,
    pub today_appointments: i64,
    pub active_clients: i64,
    pub month_revenue: f64,
    pub revenue_growth: f64,
    pub appointments_growth: f64,
    pub clients_growth: f64,
    pub total_clients: i64,
    pub appointments_list: Vec<TodayAppointmentEntry>,
}
