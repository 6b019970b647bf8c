// src/handlers/users.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    common::error::AppError, common::ids::generate_id, config::AppState, models::auth::UserRole,
};

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<String>,
    pub active: Option<String>,
    pub search: Option<String>,
}

// GET /api/users
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(query): Query<ListUsersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let active = query
        .active
        .as_deref()
        .filter(|a| *a != "all")
        .map(|a| a == "true");
    let users = app_state
        .user_repo
        .list(
            &app_state.db_pool,
            query.role.as_deref(),
            active,
            query.search.as_deref(),
        )
        .await?;
    Ok(Json(users))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<UserRole>,
    pub phone: Option<String>,
    pub active: Option<bool>,
}

// POST /api/users
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(name), Some(email), Some(password), Some(role)) = (
        &payload.name,
        &payload.email,
        &payload.password,
        payload.role,
    ) else {
        return Err(AppError::MissingFields(
            "Campos obrigatórios: name, email, password, role".to_string(),
        ));
    };

    let hashed = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    let id = generate_id("usr");
    app_state
        .user_repo
        .create(
            &app_state.db_pool,
            &id,
            name,
            email,
            &hashed,
            role,
            payload.phone.as_deref(),
            payload.active.unwrap_or(true),
        )
        .await?;

    let user = app_state
        .user_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::UserNotFound)?;

    Ok((StatusCode::CREATED, Json(user)))
}

// GET /api/users/{id}
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .user_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::UserNotFound)?;
    Ok(Json(user))
}

// PUT /api/users/{id}
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UserPayload>,
) -> Result<impl IntoResponse, AppError> {
    // Senha só é trocada quando enviada; o restante é atualização parcial
    let hashed = match payload.password.as_deref() {
        Some(password) => Some(bcrypt::hash(password, bcrypt::DEFAULT_COST)?),
        None => None,
    };

    app_state
        .user_repo
        .update(
            &app_state.db_pool,
            &id,
            payload.name.as_deref(),
            payload.email.as_deref(),
            hashed.as_deref(),
            payload.role,
            payload.phone.as_deref(),
            payload.active,
        )
        .await?;

    let user = app_state
        .user_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::UserNotFound)?;
    Ok(Json(user))
}

// DELETE /api/users/{id}
pub async fn delete_user(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.user_repo.delete(&app_state.db_pool, &id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Usuário excluído com sucesso"
    })))
}
