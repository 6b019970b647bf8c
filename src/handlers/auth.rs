// src/handlers/auth.rs

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;

use crate::{common::error::AppError, config::AppState};

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub password: Option<String>,
}

// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(AppError::MissingFields(
            "Email e senha são obrigatórios".to_string(),
        ));
    };

    let response = app_state.auth_service.login(&email, &password).await?;
    Ok(Json(response))
}
