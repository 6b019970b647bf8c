// src/handlers/settings.rs

use std::collections::BTreeMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    common::error::AppError,
    config::AppState,
    models::settings::SettingsUpdateResult,
};

#[derive(Debug, Deserialize)]
pub struct SettingsQuery {
    pub category: Option<String>,
    pub key: Option<String>,
}

// GET /api/settings: por chave devolve a linha; sem chave devolve o mapa
// agrupado por categoria.
pub async fn get_settings(
    State(app_state): State<AppState>,
    Query(query): Query<SettingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let settings = app_state
        .settings_repo
        .list(
            &app_state.db_pool,
            query.category.as_deref(),
            query.key.as_deref(),
        )
        .await?;

    if query.key.is_some() && settings.len() == 1 {
        return Ok(Json(json!(settings[0])));
    }

    let mut organized: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for setting in settings {
        organized
            .entry(setting.category)
            .or_default()
            .insert(setting.key, setting.value);
    }
    Ok(Json(json!(organized)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsPayload {
    pub settings: Option<BTreeMap<String, serde_json::Value>>,
}

// PUT /api/settings: atualização em lote { settings: { chave: valor } }
pub async fn update_settings(
    State(app_state): State<AppState>,
    Json(payload): Json<UpdateSettingsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let Some(settings) = payload.settings else {
        return Err(AppError::MissingFields(
            "Formato inválido. Envie { settings: { key: value, ... } }".to_string(),
        ));
    };

    let mut updated = Vec::new();
    for (key, value) in settings {
        let value = match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        if app_state
            .settings_repo
            .update_value(&app_state.db_pool, &key, &value)
            .await?
        {
            updated.push(key);
        }
    }

    let message = format!("{} configurações atualizadas", updated.len());
    Ok(Json(SettingsUpdateResult {
        success: true,
        updated,
        message,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateSettingPayload {
    pub key: Option<String>,
    pub value: Option<String>,
    pub category: Option<String>,
}

// POST /api/settings
pub async fn create_setting(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSettingPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(key), Some(value), Some(category)) =
        (&payload.key, &payload.value, &payload.category)
    else {
        return Err(AppError::MissingFields(
            "Campos obrigatórios: key, value, category".to_string(),
        ));
    };

    if app_state
        .settings_repo
        .find_by_key(&app_state.db_pool, key)
        .await?
        .is_some()
    {
        return Err(AppError::SettingAlreadyExists);
    }

    app_state
        .settings_repo
        .create(&app_state.db_pool, key, value, category)
        .await?;

    let setting = app_state
        .settings_repo
        .find_by_key(&app_state.db_pool, key)
        .await?;

    Ok((StatusCode::CREATED, Json(json!(setting))))
}
