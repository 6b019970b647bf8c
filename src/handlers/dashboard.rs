// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState};

// GET /api/dashboard/metrics
pub async fn get_metrics(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let metrics = app_state
        .dashboard_repo
        .get_metrics(&app_state.db_pool)
        .await?;
    Ok(Json(metrics))
}
