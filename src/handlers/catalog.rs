// src/handlers/catalog.rs
//
// CRUD do catálogo de serviços (/api/services).

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{common::error::AppError, common::ids::generate_id, config::AppState};

#[derive(Debug, Deserialize)]
pub struct ListServicesQuery {
    pub category: Option<String>,
}

// GET /api/services
pub async fn list_services(
    State(app_state): State<AppState>,
    Query(query): Query<ListServicesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let services = app_state
        .service_repo
        .list(&app_state.db_pool, query.category.as_deref())
        .await?;
    Ok(Json(services))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration: Option<i64>,
    pub category: Option<String>,
    pub active: Option<bool>,
}

// POST /api/services
pub async fn create_service(
    State(app_state): State<AppState>,
    Json(payload): Json<ServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(name), Some(price), Some(duration), Some(category)) = (
        &payload.name,
        payload.price,
        payload.duration,
        &payload.category,
    ) else {
        return Err(AppError::MissingFields(
            "Nome, preço, duração e categoria são obrigatórios".to_string(),
        ));
    };

    let id = generate_id("srv");
    app_state
        .service_repo
        .create(
            &app_state.db_pool,
            &id,
            name,
            payload.description.as_deref(),
            price,
            duration,
            category,
        )
        .await?;

    let service = app_state
        .service_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::ServiceNotFound)?;

    Ok((StatusCode::CREATED, Json(service)))
}

// GET /api/services/{id}
pub async fn get_service(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let service = app_state
        .service_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::ServiceNotFound)?;
    Ok(Json(service))
}

// PUT /api/services/{id}
pub async fn update_service(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .service_repo
        .update(
            &app_state.db_pool,
            &id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.price,
            payload.duration,
            payload.category.as_deref(),
            payload.active,
        )
        .await?;

    let service = app_state
        .service_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::ServiceNotFound)?;
    Ok(Json(service))
}

// DELETE /api/services/{id}
pub async fn delete_service(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .service_repo
        .delete(&app_state.db_pool, &id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Serviço excluído com sucesso"
    })))
}
