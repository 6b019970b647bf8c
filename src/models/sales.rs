// src/models/sales.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleStatus {
    Pending,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleItemKind {
    Service,
    Product,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Money,
    CreditCard,
    DebitCard,
    Pix,
    Transfer,
}

impl PaymentMethod {
    /// Forma textual usada na coluna payment_method dos lançamentos
    /// financeiros (mesmo vocabulário do JSON).
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Money => "MONEY",
            PaymentMethod::CreditCard => "CREDIT_CARD",
            PaymentMethod::DebitCard => "DEBIT_CARD",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Transfer => "TRANSFER",
        }
    }
}

// Cabeçalho da venda. Imutável depois de criado; o motor de checkout só
// produz status COMPLETED.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub client_id: Option<String>,
    pub professional_id: Option<String>,
    pub subtotal: f64,
    pub discount: f64,
    // total = subtotal - discount, conforme enviado pelo PDV. O servidor
    // não recalcula a partir dos itens.
    pub total: f64,
    pub status: SaleStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

// Item da venda com snapshot de nome/preço no momento da venda: editar o
// catálogo depois não pode alterar vendas históricas.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: SaleItemKind,
    pub item_id: String,
    #[serde(rename = "name")]
    pub item_name: String,
    pub quantity: f64,
    pub price: f64,
    pub discount: f64,
    pub total: f64,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalePayment {
    pub id: String,
    pub sale_id: String,
    pub method: PaymentMethod,
    pub amount: f64,
    pub created_at: NaiveDateTime,
}

// Carrinho recebido no POST /api/sales. subtotal/discount/total vêm
// calculados pelo PDV e são confiados como enviados.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    #[serde(default)]
    pub items: Vec<SaleItemInput>,
    #[serde(default)]
    pub payments: Vec<SalePaymentInput>,
    pub client_id: Option<String>,
    pub professional_id: Option<String>,
    pub subtotal: f64,
    #[serde(default)]
    pub discount: f64,
    pub total: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemInput {
    #[serde(rename = "type")]
    pub kind: SaleItemKind,
    pub item_id: String,
    pub name: String,
    pub quantity: f64,
    pub price: f64,
    #[serde(default)]
    pub discount: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePaymentInput {
    pub method: PaymentMethod,
    pub amount: f64,
}

// Venda completa com os filhos, como o POST /api/sales devolve.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleWithChildren {
    pub id: String,
    pub client_id: Option<String>,
    pub professional_id: Option<String>,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub status: SaleStatus,
    pub notes: Option<String>,
    pub items: Vec<SaleItem>,
    pub payments: Vec<SalePayment>,
    pub created_at: NaiveDateTime,
}

impl SaleWithChildren {
    pub fn assemble(sale: Sale, items: Vec<SaleItem>, payments: Vec<SalePayment>) -> Self {
        Self {
            id: sale.id,
            client_id: sale.client_id,
            professional_id: sale.professional_id,
            subtotal: sale.subtotal,
            discount: sale.discount,
            total: sale.total,
            status: sale.status,
            notes: sale.notes,
            items,
            payments,
            created_at: sale.created_at,
        }
    }
}
