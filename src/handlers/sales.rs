// src/handlers/sales.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{common::error::AppError, config::AppState, models::sales::CreateSalePayload};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSalesQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

// GET /api/sales
pub async fn list_sales(
    State(app_state): State<AppState>,
    Query(query): Query<ListSalesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let sales = app_state
        .sale_service
        .list_sales(query.start_date, query.end_date)
        .await?;
    Ok(Json(sales))
}

// GET /api/sales/{id}
pub async fn get_sale(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state.sale_service.get_sale(&id).await?;
    Ok(Json(sale))
}

// POST /api/sales
pub async fn create_sale(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    let sale = app_state.sale_service.finalize_sale(payload).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}
