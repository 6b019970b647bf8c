// Testes do livro-razão de estoque: o saldo derivado tem que acompanhar o
// histórico de movimentações em todos os caminhos.

use std::str::FromStr;

use salonx_backend::{
    common::error::AppError,
    config::AppState,
    models::inventory::{MovementType, ProductKind},
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

async fn setup_state() -> AppState {
    // Banco em memória exige uma única conexão na pool
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    AppState::from_pool(pool, false)
}

async fn create_product(state: &AppState, sku: &str, initial_stock: f64) -> String {
    let id = format!("prd-{}", sku);
    state
        .product_repo
        .create(
            &state.db_pool,
            &id,
            "Shampoo Profissional",
            ProductKind::Resale,
            "Cabelo",
            None,
            sku,
            initial_stock,
            10.0,
            50.0,
            "UN",
            12.5,
            Some(35.0),
            None,
            None,
        )
        .await
        .unwrap();
    id
}

#[tokio::test]
async fn in_then_out_leaves_the_difference() {
    let state = setup_state().await;
    let product_id = create_product(&state, "SH-001", 0.0).await;

    state
        .stock_service
        .record_movement(&state.db_pool, &product_id, MovementType::In, 10.0, Some("Compra"), None)
        .await
        .unwrap();
    let (_, summary) = state
        .stock_service
        .record_movement(&state.db_pool, &product_id, MovementType::Out, 4.0, None, None)
        .await
        .unwrap();

    assert_eq!(summary.current_stock, 6.0);

    let product = state
        .product_repo
        .find_by_id(&state.db_pool, &product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.current_stock, 6.0);
}

#[tokio::test]
async fn adjustment_sets_absolute_value() {
    let state = setup_state().await;
    let product_id = create_product(&state, "SH-002", 0.0).await;

    state
        .stock_service
        .record_movement(&state.db_pool, &product_id, MovementType::In, 10.0, None, None)
        .await
        .unwrap();
    let (_, summary) = state
        .stock_service
        .record_movement(
            &state.db_pool,
            &product_id,
            MovementType::Adjustment,
            3.0,
            Some("Inventário"),
            None,
        )
        .await
        .unwrap();

    // Ajuste substitui o saldo, não soma
    assert_eq!(summary.current_stock, 3.0);

    let (_, summary) = state
        .stock_service
        .record_movement(&state.db_pool, &product_id, MovementType::Adjustment, 42.0, None, None)
        .await
        .unwrap();
    assert_eq!(summary.current_stock, 42.0);
}

#[tokio::test]
async fn out_beyond_stock_fails_without_writes() {
    let state = setup_state().await;
    let product_id = create_product(&state, "SH-003", 5.0).await;

    let result = state
        .stock_service
        .record_movement(&state.db_pool, &product_id, MovementType::Out, 8.0, None, None)
        .await;
    assert!(matches!(result, Err(AppError::InsufficientStock)));

    // Nem o saldo nem o histórico podem ter sido tocados
    let product = state
        .product_repo
        .find_by_id(&state.db_pool, &product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.current_stock, 5.0);

    let movements = state
        .stock_service
        .list_movements(&state.db_pool, Some(&product_id))
        .await
        .unwrap();
    assert!(movements.is_empty());
    let rows = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM stock_movements WHERE product_id = ?",
    )
    .bind(&product_id)
    .fetch_one(&state.db_pool)
    .await
    .unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn unknown_product_is_not_found() {
    let state = setup_state().await;

    let result = state
        .stock_service
        .record_movement(&state.db_pool, "prd-inexistente", MovementType::In, 1.0, None, None)
        .await;
    assert!(matches!(result, Err(AppError::ProductNotFound)));
}

#[tokio::test]
async fn movement_carries_product_name_and_updated_summary() {
    let state = setup_state().await;
    let product_id = create_product(&state, "SH-004", 2.0).await;

    let (movement, summary) = state
        .stock_service
        .record_movement(
            &state.db_pool,
            &product_id,
            MovementType::In,
            3.5,
            Some("Reposição"),
            Some("usr-1"),
        )
        .await
        .unwrap();

    assert_eq!(movement.product_id, product_id);
    assert_eq!(movement.product_name.as_deref(), Some("Shampoo Profissional"));
    assert_eq!(movement.kind, MovementType::In);
    assert_eq!(movement.quantity, 3.5);
    assert_eq!(movement.reason.as_deref(), Some("Reposição"));
    assert_eq!(movement.user_id.as_deref(), Some("usr-1"));

    assert_eq!(summary.id, product_id);
    assert_eq!(summary.current_stock, 5.5);
    assert_eq!(summary.min_stock, 10.0);
}

#[tokio::test]
async fn listing_is_newest_first_and_idempotent() {
    let state = setup_state().await;
    let product_id = create_product(&state, "SH-005", 0.0).await;

    for quantity in [1.0, 2.0, 3.0] {
        state
            .stock_service
            .record_movement(&state.db_pool, &product_id, MovementType::In, quantity, None, None)
            .await
            .unwrap();
        // Garante timestamps distintos entre as inserções
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let movements = state
        .stock_service
        .list_movements(&state.db_pool, Some(&product_id))
        .await
        .unwrap();
    let quantities: Vec<f64> = movements.iter().map(|m| m.quantity).collect();
    assert_eq!(quantities, vec![3.0, 2.0, 1.0]);
    for pair in movements.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }

    // Leitura pura: repetir a consulta não muda nada
    let again = state
        .stock_service
        .list_movements(&state.db_pool, Some(&product_id))
        .await
        .unwrap();
    assert_eq!(again.len(), movements.len());

    let product = state
        .product_repo
        .find_by_id(&state.db_pool, &product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(product.current_stock, 6.0);
}

#[tokio::test]
async fn listing_without_filter_covers_all_products() {
    let state = setup_state().await;
    let first = create_product(&state, "SH-006", 0.0).await;
    let second = create_product(&state, "SH-007", 0.0).await;

    state
        .stock_service
        .record_movement(&state.db_pool, &first, MovementType::In, 1.0, None, None)
        .await
        .unwrap();
    state
        .stock_service
        .record_movement(&state.db_pool, &second, MovementType::In, 2.0, None, None)
        .await
        .unwrap();

    let all = state
        .stock_service
        .list_movements(&state.db_pool, None)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let filtered = state
        .stock_service
        .list_movements(&state.db_pool, Some(&first))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].product_id, first);
}

#[tokio::test]
async fn fractional_quantities_are_supported() {
    let state = setup_state().await;
    let product_id = create_product(&state, "SH-008", 0.0).await;

    state
        .stock_service
        .record_movement(&state.db_pool, &product_id, MovementType::In, 2.5, None, None)
        .await
        .unwrap();
    let (_, summary) = state
        .stock_service
        .record_movement(&state.db_pool, &product_id, MovementType::Out, 0.75, None, None)
        .await
        .unwrap();

    assert!((summary.current_stock - 1.75).abs() < 1e-9);
}
