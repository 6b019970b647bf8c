// src/models/inventory.rs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// --- 1. Produtos ---

// SERVICE = uso interno nos atendimentos; RESALE = revenda no balcão.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum ProductKind {
    Service,
    Resale,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: ProductKind,
    pub category: String,
    pub brand: Option<String>,
    pub sku: String,
    // Saldo derivado do livro-razão de movimentações. Escrito apenas pelo
    // StockService; valores fracionários são permitidos (ex: 0.5 L).
    pub current_stock: f64,
    pub min_stock: f64,
    pub max_stock: f64,
    pub unit: String,
    pub cost_price: f64,
    pub sale_price: Option<f64>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

// Resumo retornado junto com cada movimentação criada, para o frontend
// atualizar a tela de estoque sem nova consulta.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub id: String,
    pub name: String,
    pub current_stock: f64,
    pub min_stock: f64,
}

// --- 2. Movimentações de Estoque (livro-razão, apenas INSERT) ---

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    In,
    Out,
    Adjustment,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: String,
    pub product_id: String,
    // Nome denormalizado via JOIN com products na leitura.
    pub product_name: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: MovementType,
    pub quantity: f64,
    pub reason: Option<String>,
    pub user_id: Option<String>,
    pub created_at: NaiveDateTime,
}

// --- 3. Semântica das movimentações ---

// IN/OUT carregam um delta; ADJUSTMENT carrega o valor absoluto alvo.
// A assimetria fica explícita no tipo em vez de num `if` sobre strings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StockChange {
    In(f64),
    Out(f64),
    Adjustment(f64),
}

impl StockChange {
    pub fn new(kind: MovementType, quantity: f64) -> Self {
        match kind {
            MovementType::In => StockChange::In(quantity),
            MovementType::Out => StockChange::Out(quantity),
            MovementType::Adjustment => StockChange::Adjustment(quantity),
        }
    }

    /// Aplica a movimentação sobre o saldo atual e devolve o novo saldo.
    pub fn apply(&self, current_stock: f64) -> f64 {
        match *self {
            StockChange::In(qty) => current_stock + qty,
            StockChange::Out(qty) => current_stock - qty,
            StockChange::Adjustment(target) => target,
        }
    }

    pub fn kind(&self) -> MovementType {
        match self {
            StockChange::In(_) => MovementType::In,
            StockChange::Out(_) => MovementType::Out,
            StockChange::Adjustment(_) => MovementType::Adjustment,
        }
    }

    pub fn quantity(&self) -> f64 {
        match *self {
            StockChange::In(qty) | StockChange::Out(qty) | StockChange::Adjustment(qty) => qty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_adds_to_current_stock() {
        assert_eq!(StockChange::In(5.0).apply(10.0), 15.0);
    }

    #[test]
    fn out_subtracts_from_current_stock() {
        assert_eq!(StockChange::Out(3.0).apply(10.0), 7.0);
    }

    #[test]
    fn adjustment_replaces_current_stock() {
        assert_eq!(StockChange::Adjustment(42.0).apply(10.0), 42.0);
        assert_eq!(StockChange::Adjustment(42.0).apply(0.0), 42.0);
    }

    #[test]
    fn fractional_quantities_are_preserved() {
        assert_eq!(StockChange::In(0.5).apply(1.25), 1.75);
    }
}
