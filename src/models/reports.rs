// src/models/reports.rs
//
// DTOs dos relatórios agregados. Cada relatório é um conjunto de consultas
// GROUP BY somadas em memória; os campos seguem o que a tela de relatórios
// consome.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

// --- Financeiro ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_profit: f64,
    pub transactions_count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: Option<String>,
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodTotal {
    pub payment_method: Option<String>,
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    pub summary: FinancialSummary,
    pub income_by_category: Vec<CategoryTotal>,
    pub expenses_by_category: Vec<CategoryTotal>,
    pub income_by_payment_method: Vec<PaymentMethodTotal>,
}

// --- Serviços ---

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStat {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub price: f64,
    pub total_appointments: i64,
    pub total_revenue: Option<f64>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TopService {
    pub name: String,
    pub count: i64,
    pub revenue: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesReport {
    pub service_stats: Vec<ServiceStat>,
    pub top_services: Vec<TopService>,
}

// --- Profissionais ---

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalStat {
    pub id: String,
    pub name: String,
    pub commission_rate: f64,
    pub total_appointments: i64,
    pub total_revenue: Option<f64>,
    pub total_commission: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalsReport {
    pub professional_stats: Vec<ProfessionalStat>,
}

// --- Clientes ---

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClientsSummary {
    pub total_clients: i64,
    pub active_clients: i64,
    pub avg_spent: Option<f64>,
    pub avg_visits: Option<f64>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TopClient {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub total_visits: i64,
    pub total_spent: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientsReport {
    pub summary: ClientsSummary,
    pub top_clients: Vec<TopClient>,
    pub new_clients: i64,
}

// --- Produtos / Estoque ---

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProductStat {
    pub id: String,
    pub name: String,
    pub category: String,
    pub current_stock: f64,
    pub min_stock: f64,
    pub sale_price: Option<f64>,
    pub needs_restock: bool,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LowStockProduct {
    pub name: String,
    pub current_stock: f64,
    pub min_stock: f64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MovementTypeTotal {
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub count: i64,
    pub total_quantity: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsReport {
    pub product_stats: Vec<ProductStat>,
    pub low_stock_products: Vec<LowStockProduct>,
    pub stock_movements: Vec<MovementTypeTotal>,
}

// --- Agendamentos ---

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentStatusStat {
    pub status: String,
    pub count: i64,
    pub total_revenue: Option<f64>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentsByDay {
    pub day: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentsByHour {
    pub hour: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentsReport {
    pub appointment_stats: Vec<AppointmentStatusStat>,
    pub appointments_by_day: Vec<AppointmentsByDay>,
    pub appointments_by_hour: Vec<AppointmentsByHour>,
}
