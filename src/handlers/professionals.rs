// src/handlers/professionals.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    common::error::AppError, common::ids::generate_id, config::AppState,
    models::catalog::Professional,
};

// GET /api/professionals
pub async fn list_professionals(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.professional_repo.list(&app_state.db_pool).await?;
    let professionals: Vec<Professional> = rows.into_iter().map(Professional::from).collect();
    Ok(Json(professionals))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub commission: Option<f64>,
    pub work_schedule: Option<serde_json::Value>,
    pub active: Option<bool>,
}

// POST /api/professionals
pub async fn create_professional(
    State(app_state): State<AppState>,
    Json(payload): Json<ProfessionalPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(name), Some(email), Some(phone)) =
        (&payload.name, &payload.email, &payload.phone)
    else {
        return Err(AppError::MissingFields(
            "Nome, email e telefone são obrigatórios".to_string(),
        ));
    };

    let specialties = serde_json::to_string(&payload.specialties.unwrap_or_default())
        .unwrap_or_else(|_| "[]".to_string());
    let work_schedule = payload
        .work_schedule
        .map(|ws| ws.to_string())
        .unwrap_or_else(|| "{}".to_string());

    let id = generate_id("pro");
    app_state
        .professional_repo
        .create(
            &app_state.db_pool,
            &id,
            name,
            email,
            phone,
            &specialties,
            payload.commission.unwrap_or(30.0),
            &work_schedule,
        )
        .await?;

    let row = app_state
        .professional_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::ProfessionalNotFound)?;

    Ok((StatusCode::CREATED, Json(Professional::from(row))))
}

// GET /api/professionals/{id}
pub async fn get_professional(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let row = app_state
        .professional_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::ProfessionalNotFound)?;
    Ok(Json(Professional::from(row)))
}

// PUT /api/professionals/{id}
pub async fn update_professional(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ProfessionalPayload>,
) -> Result<impl IntoResponse, AppError> {
    let specialties = payload
        .specialties
        .map(|s| serde_json::to_string(&s).unwrap_or_else(|_| "[]".to_string()));
    let work_schedule = payload.work_schedule.map(|ws| ws.to_string());

    app_state
        .professional_repo
        .update(
            &app_state.db_pool,
            &id,
            payload.name.as_deref(),
            payload.email.as_deref(),
            payload.phone.as_deref(),
            specialties.as_deref(),
            payload.commission,
            work_schedule.as_deref(),
            payload.active,
        )
        .await?;

    let row = app_state
        .professional_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::ProfessionalNotFound)?;
    Ok(Json(Professional::from(row)))
}

// DELETE /api/professionals/{id}
pub async fn delete_professional(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .professional_repo
        .delete(&app_state.db_pool, &id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Profissional excluído com sucesso"
    })))
}
