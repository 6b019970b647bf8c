// src/handlers/transactions.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::{
    common::error::AppError,
    common::ids::generate_id,
    config::AppState,
    models::finance::{TransactionStatus, TransactionType},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTransactionsQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// GET /api/transactions
pub async fn list_transactions(
    State(app_state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let transactions = app_state
        .transaction_repo
        .list(
            &app_state.db_pool,
            query.kind.as_deref(),
            query.status.as_deref(),
            query.start_date,
            query.end_date,
        )
        .await?;
    Ok(Json(transactions))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<f64>,
    pub status: Option<TransactionStatus>,
    pub payment_method: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub paid_date: Option<NaiveDate>,
    pub client_id: Option<String>,
    pub professional_id: Option<String>,
    pub notes: Option<String>,
}

// POST /api/transactions
pub async fn create_transaction(
    State(app_state): State<AppState>,
    Json(payload): Json<TransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(kind), Some(category), Some(description), Some(amount), Some(due_date)) = (
        payload.kind,
        &payload.category,
        &payload.description,
        payload.amount,
        payload.due_date,
    ) else {
        return Err(AppError::MissingFields(
            "Tipo, categoria, descrição, valor e data de vencimento são obrigatórios".to_string(),
        ));
    };

    let id = generate_id("txn");
    app_state
        .transaction_repo
        .create(
            &app_state.db_pool,
            &id,
            kind,
            category,
            description,
            amount,
            payload.status.unwrap_or(TransactionStatus::Pending),
            payload.payment_method.as_deref(),
            due_date,
            payload.paid_date,
            payload.client_id.as_deref(),
            payload.professional_id.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;

    let transaction = app_state
        .transaction_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::TransactionNotFound)?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

// GET /api/transactions/{id}
pub async fn get_transaction(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let transaction = app_state
        .transaction_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::TransactionNotFound)?;
    Ok(Json(transaction))
}

// PUT /api/transactions/{id}: tipicamente usado para marcar um PENDING
// como PAID informando paidDate.
pub async fn update_transaction(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<TransactionPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .transaction_repo
        .update(
            &app_state.db_pool,
            &id,
            payload.category.as_deref(),
            payload.description.as_deref(),
            payload.amount,
            payload.status,
            payload.payment_method.as_deref(),
            payload.due_date,
            payload.paid_date,
            payload.notes.as_deref(),
        )
        .await?;

    let transaction = app_state
        .transaction_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::TransactionNotFound)?;
    Ok(Json(transaction))
}

// DELETE /api/transactions/{id}
pub async fn delete_transaction(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .transaction_repo
        .delete(&app_state.db_pool, &id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Transação excluída com sucesso"
    })))
}
