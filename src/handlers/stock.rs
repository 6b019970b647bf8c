// src/handlers/stock.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{common::error::AppError, config::AppState, models::inventory::MovementType};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMovementsQuery {
    pub product_id: Option<String>,
}

// GET /api/stock-movements
pub async fn list_movements(
    State(app_state): State<AppState>,
    Query(query): Query<ListMovementsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let movements = app_state
        .stock_service
        .list_movements(&app_state.db_pool, query.product_id.as_deref())
        .await?;
    Ok(Json(movements))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovementPayload {
    pub product_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<MovementType>,
    // Delta para IN/OUT; valor absoluto alvo para ADJUSTMENT
    pub quantity: Option<f64>,
    pub reason: Option<String>,
    pub user_id: Option<String>,
}

// POST /api/stock-movements
pub async fn create_movement(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateMovementPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(product_id), Some(kind), Some(quantity)) =
        (payload.product_id, payload.kind, payload.quantity)
    else {
        return Err(AppError::MissingFields(
            "Produto, tipo e quantidade são obrigatórios".to_string(),
        ));
    };
    if quantity <= 0.0 {
        return Err(AppError::MissingFields(
            "Produto, tipo e quantidade são obrigatórios".to_string(),
        ));
    }

    let (movement, product) = app_state
        .stock_service
        .record_movement(
            &app_state.db_pool,
            &product_id,
            kind,
            quantity,
            payload.reason.as_deref(),
            payload.user_id.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "movement": movement, "product": product })),
    ))
}
