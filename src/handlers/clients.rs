// src/handlers/clients.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::{common::error::AppError, common::ids::generate_id, config::AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClientsQuery {
    pub search: Option<String>,
    pub segment: Option<String>,
}

// GET /api/clients
pub async fn list_clients(
    State(app_state): State<AppState>,
    Query(query): Query<ListClientsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let clients = app_state
        .client_repo
        .list(
            &app_state.db_pool,
            query.search.as_deref(),
            query.segment.as_deref(),
        )
        .await?;
    Ok(Json(clients))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub notes: Option<String>,
    pub segment: Option<String>,
}

// POST /api/clients
pub async fn create_client(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(name), Some(email), Some(phone)) =
        (&payload.name, &payload.email, &payload.phone)
    else {
        return Err(AppError::MissingFields(
            "Nome, email e telefone são obrigatórios".to_string(),
        ));
    };

    if app_state
        .client_repo
        .email_exists(&app_state.db_pool, email)
        .await?
    {
        return Err(AppError::EmailAlreadyExists);
    }

    let id = generate_id("cli");
    app_state
        .client_repo
        .create(
            &app_state.db_pool,
            &id,
            name,
            email,
            phone,
            payload.birthdate,
            payload.address.as_deref(),
            payload.city.as_deref(),
            payload.state.as_deref(),
            payload.zip_code.as_deref(),
            payload.notes.as_deref(),
            payload.segment.as_deref().unwrap_or("NEW"),
        )
        .await?;

    let client = app_state
        .client_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::ClientNotFound)?;

    Ok((StatusCode::CREATED, Json(client)))
}

// GET /api/clients/{id}
pub async fn get_client(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let client = app_state
        .client_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::ClientNotFound)?;
    Ok(Json(client))
}

// PUT /api/clients/{id}
pub async fn update_client(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CreateClientPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .client_repo
        .update(
            &app_state.db_pool,
            &id,
            payload.name.as_deref(),
            payload.email.as_deref(),
            payload.phone.as_deref(),
            payload.birthdate,
            payload.address.as_deref(),
            payload.city.as_deref(),
            payload.state.as_deref(),
            payload.zip_code.as_deref(),
            payload.notes.as_deref(),
            payload.segment.as_deref(),
        )
        .await?;

    let client = app_state
        .client_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::ClientNotFound)?;
    Ok(Json(client))
}

// DELETE /api/clients/{id}
pub async fn delete_client(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .client_repo
        .delete(&app_state.db_pool, &id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Cliente excluído com sucesso"
    })))
}

// GET /api/clients/{id}/stats: reconciliação dos contadores a partir do
// histórico de vendas, para conferência fora do caminho de checkout.
pub async fn get_client_stats(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .client_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::ClientNotFound)?;

    let stats = app_state
        .client_repo
        .recalculate_stats(&app_state.db_pool, &id)
        .await?;
    Ok(Json(stats))
}
