// src/handlers/appointments.rs

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
    common::error::AppError, common::ids::generate_id, config::AppState,
    models::scheduling::AppointmentStatus,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAppointmentsQuery {
    pub date: Option<NaiveDate>,
    pub professional_id: Option<String>,
    pub status: Option<String>,
}

// GET /api/appointments
pub async fn list_appointments(
    State(app_state): State<AppState>,
    Query(query): Query<ListAppointmentsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let appointments = app_state
        .appointment_repo
        .list(
            &app_state.db_pool,
            query.date,
            query.professional_id.as_deref(),
            query.status.as_deref(),
        )
        .await?;
    Ok(Json(appointments))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPayload {
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub professional_id: Option<String>,
    pub professional_name: Option<String>,
    pub service_id: Option<String>,
    pub service_name: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub duration: Option<i64>,
    pub price: Option<f64>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

// POST /api/appointments
pub async fn create_appointment(
    State(app_state): State<AppState>,
    Json(payload): Json<AppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (
        Some(client_name),
        Some(professional_name),
        Some(service_name),
        Some(date),
        Some(time),
        Some(duration),
        Some(price),
    ) = (
        &payload.client_name,
        &payload.professional_name,
        &payload.service_name,
        payload.date,
        &payload.time,
        payload.duration,
        payload.price,
    )
    else {
        return Err(AppError::MissingFields(
            "Cliente, profissional, serviço, data, horário, duração e preço são obrigatórios"
                .to_string(),
        ));
    };

    let id = generate_id("apt");
    app_state
        .appointment_repo
        .create(
            &app_state.db_pool,
            &id,
            payload.client_id.as_deref(),
            client_name,
            payload.professional_id.as_deref(),
            professional_name,
            payload.service_id.as_deref(),
            service_name,
            date,
            time,
            duration,
            price,
            payload.status.unwrap_or(AppointmentStatus::Scheduled),
            payload.notes.as_deref(),
        )
        .await?;

    let appointment = app_state
        .appointment_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::AppointmentNotFound)?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// GET /api/appointments/{id}
pub async fn get_appointment(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = app_state
        .appointment_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::AppointmentNotFound)?;
    Ok(Json(appointment))
}

// PUT /api/appointments/{id}
pub async fn update_appointment(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .appointment_repo
        .update(
            &app_state.db_pool,
            &id,
            payload.date,
            payload.time.as_deref(),
            payload.duration,
            payload.price,
            payload.status,
            payload.notes.as_deref(),
        )
        .await?;

    let appointment = app_state
        .appointment_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::AppointmentNotFound)?;
    Ok(Json(appointment))
}

// DELETE /api/appointments/{id}
pub async fn delete_appointment(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .appointment_repo
        .delete(&app_state.db_pool, &id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Agendamento excluído com sucesso"
    })))
}
