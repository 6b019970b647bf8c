// src/models/finance.rs

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

// Lançamento do livro financeiro. Toda venda concluída gera exatamente um
// lançamento INCOME/PAID com categoria SALE; os demais vêm do CRUD.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub description: String,
    pub amount: f64,
    pub status: TransactionStatus,
    pub payment_method: Option<String>,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub client_id: Option<String>,
    pub professional_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}
