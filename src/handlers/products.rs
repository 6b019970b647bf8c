// src/handlers/products.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError, common::ids::generate_id, config::AppState,
    models::inventory::ProductKind,
};

fn validate_not_negative(val: f64) -> Result<(), ValidationError> {
    if val < 0.0 {
        let mut err = ValidationError::new("range");
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub low_stock: Option<String>,
}

// GET /api/products
pub async fn list_products(
    State(app_state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let low_stock = query.low_stock.as_deref() == Some("true");
    let products = app_state
        .product_repo
        .list(
            &app_state.db_pool,
            query.category.as_deref(),
            query.kind.as_deref(),
            low_stock,
        )
        .await?;
    Ok(Json(products))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<ProductKind>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub sku: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    pub current_stock: Option<f64>,
    #[validate(custom(function = "validate_not_negative"))]
    pub min_stock: Option<f64>,
    #[validate(custom(function = "validate_not_negative"))]
    pub max_stock: Option<f64>,
    pub unit: Option<String>,
    #[validate(custom(function = "validate_not_negative"))]
    pub cost_price: Option<f64>,
    pub sale_price: Option<f64>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
}

// POST /api/products
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (Some(name), Some(kind), Some(category), Some(sku), Some(cost_price)) = (
        &payload.name,
        payload.kind,
        &payload.category,
        &payload.sku,
        payload.cost_price,
    ) else {
        return Err(AppError::MissingFields(
            "Nome, tipo, categoria, SKU e preço de custo são obrigatórios".to_string(),
        ));
    };

    if app_state
        .product_repo
        .sku_exists(&app_state.db_pool, sku)
        .await?
    {
        return Err(AppError::SkuAlreadyExists);
    }

    let id = generate_id("prd");
    app_state
        .product_repo
        .create(
            &app_state.db_pool,
            &id,
            name,
            kind,
            category,
            payload.brand.as_deref(),
            sku,
            payload.current_stock.unwrap_or(0.0),
            payload.min_stock.unwrap_or(10.0),
            payload.max_stock.unwrap_or(50.0),
            payload.unit.as_deref().unwrap_or("UN"),
            cost_price,
            payload.sale_price,
            payload.supplier.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;

    let product = app_state
        .product_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::ProductNotFound)?;

    Ok((StatusCode::CREATED, Json(product)))
}

// GET /api/products/{id}
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state
        .product_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::ProductNotFound)?;
    Ok(Json(product))
}

// PUT /api/products/{id}
//
// current_stock fica de fora de propósito: depois da criação, o saldo só
// muda pelo livro-razão de movimentações.
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .product_repo
        .update(
            &app_state.db_pool,
            &id,
            payload.name.as_deref(),
            payload.kind,
            payload.category.as_deref(),
            payload.brand.as_deref(),
            payload.sku.as_deref(),
            payload.min_stock,
            payload.max_stock,
            payload.unit.as_deref(),
            payload.cost_price,
            payload.sale_price,
            payload.supplier.as_deref(),
            payload.notes.as_deref(),
        )
        .await?;

    let product = app_state
        .product_repo
        .find_by_id(&app_state.db_pool, &id)
        .await?
        .ok_or(AppError::ProductNotFound)?;
    Ok(Json(product))
}

// DELETE /api/products/{id}
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .product_repo
        .delete(&app_state.db_pool, &id)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Produto excluído com sucesso"
    })))
}
