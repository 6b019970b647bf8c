// Cobertura da superfície colaboradora: autenticação, CRUD com checagens
// de unicidade, configurações, métricas do painel e relatórios.

use std::str::FromStr;

use chrono::Utc;
use salonx_backend::{
    common::error::AppError,
    config::AppState,
    models::{
        auth::UserRole,
        finance::{TransactionStatus, TransactionType},
        inventory::ProductKind,
        scheduling::AppointmentStatus,
    },
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

async fn setup_state() -> AppState {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    let state = AppState::from_pool(pool, false);
    state.seed().await.unwrap();
    state
}

#[tokio::test]
async fn seeded_admin_can_login_and_receives_mock_token() {
    let state = setup_state().await;

    let response = state
        .auth_service
        .login("admin@bunx.io", "admin123")
        .await
        .unwrap();
    assert!(response.success);
    assert_eq!(response.user.email, "admin@bunx.io");
    assert_eq!(response.user.role, UserRole::Admin);
    assert_eq!(response.token, format!("mock-jwt-token-{}", response.user.id));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_rejected() {
    let state = setup_state().await;

    let wrong = state.auth_service.login("admin@bunx.io", "errada").await;
    assert!(matches!(wrong, Err(AppError::InvalidCredentials)));

    let unknown = state.auth_service.login("ninguem@bunx.io", "admin123").await;
    assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn duplicate_user_email_conflicts() {
    let state = setup_state().await;

    let hashed = bcrypt::hash("segredo1", bcrypt::DEFAULT_COST).unwrap();
    let result = state
        .user_repo
        .create(
            &state.db_pool,
            "usr-1",
            "Outra Pessoa",
            "admin@bunx.io",
            &hashed,
            UserRole::Manager,
            None,
            true,
        )
        .await;
    assert!(matches!(result, Err(AppError::EmailAlreadyExists)));
}

#[tokio::test]
async fn client_crud_round_trip() {
    let state = setup_state().await;

    state
        .client_repo
        .create(
            &state.db_pool,
            "cli-1",
            "Joana Lima",
            "joana@example.com",
            "(11) 97777-6666",
            None,
            Some("Rua das Flores, 10"),
            Some("São Paulo"),
            Some("SP"),
            None,
            None,
            "NEW",
        )
        .await
        .unwrap();

    assert!(state
        .client_repo
        .email_exists(&state.db_pool, "joana@example.com")
        .await
        .unwrap());

    state
        .client_repo
        .update(
            &state.db_pool,
            "cli-1",
            None,
            None,
            Some("(11) 90000-0000"),
            None,
            None,
            None,
            None,
            None,
            None,
            Some("VIP"),
        )
        .await
        .unwrap();

    let client = state
        .client_repo
        .find_by_id(&state.db_pool, "cli-1")
        .await
        .unwrap()
        .unwrap();
    // Atualização parcial: só telefone e segmento mudaram
    assert_eq!(client.name, "Joana Lima");
    assert_eq!(client.phone.as_deref(), Some("(11) 90000-0000"));

    let filtered = state
        .client_repo
        .list(&state.db_pool, Some("Joana"), Some("VIP"))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);

    state
        .client_repo
        .delete(&state.db_pool, "cli-1")
        .await
        .unwrap();
    let gone = state
        .client_repo
        .find_by_id(&state.db_pool, "cli-1")
        .await
        .unwrap();
    assert!(gone.is_none());

    let missing = state.client_repo.delete(&state.db_pool, "cli-1").await;
    assert!(matches!(missing, Err(AppError::ClientNotFound)));
}

#[tokio::test]
async fn duplicate_sku_is_rejected() {
    let state = setup_state().await;

    for (id, result_ok) in [("prd-1", true), ("prd-2", false)] {
        let result = state
            .product_repo
            .create(
                &state.db_pool,
                id,
                "Esmalte Vermelho",
                ProductKind::Resale,
                "Unhas",
                None,
                "ESM-001",
                0.0,
                10.0,
                50.0,
                "UN",
                3.5,
                Some(9.9),
                None,
                None,
            )
            .await;
        if result_ok {
            result.unwrap();
        } else {
            assert!(matches!(result, Err(AppError::SkuAlreadyExists)));
        }
    }
}

#[tokio::test]
async fn low_stock_filter_matches_threshold() {
    let state = setup_state().await;

    state
        .product_repo
        .create(
            &state.db_pool,
            "prd-baixo",
            "Base Coat",
            ProductKind::Resale,
            "Unhas",
            None,
            "BSC-001",
            2.0,
            10.0,
            50.0,
            "UN",
            5.0,
            None,
            None,
            None,
        )
        .await
        .unwrap();
    state
        .product_repo
        .create(
            &state.db_pool,
            "prd-cheio",
            "Top Coat",
            ProductKind::Resale,
            "Unhas",
            None,
            "TPC-001",
            30.0,
            10.0,
            50.0,
            "UN",
            5.0,
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let low = state
        .product_repo
        .list(&state.db_pool, None, None, true)
        .await
        .unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].id, "prd-baixo");

    let all = state
        .product_repo
        .list(&state.db_pool, None, None, false)
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn settings_are_seeded_updated_and_protected_against_duplicates() {
    let state = setup_state().await;

    let setting = state
        .settings_repo
        .find_by_key(&state.db_pool, "business_name")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(setting.value, "SalonX");
    assert_eq!(setting.category, "general");

    // Rodar o seed de novo não duplica nada
    state.settings_repo.seed_defaults().await.unwrap();
    let general = state
        .settings_repo
        .list(&state.db_pool, Some("general"), None)
        .await
        .unwrap();
    assert_eq!(general.len(), 7);

    assert!(state
        .settings_repo
        .update_value(&state.db_pool, "business_name", "Espaço Grace")
        .await
        .unwrap());
    assert!(!state
        .settings_repo
        .update_value(&state.db_pool, "chave_inexistente", "x")
        .await
        .unwrap());

    let conflict = state
        .settings_repo
        .create(&state.db_pool, "business_name", "Outro", "general")
        .await;
    assert!(matches!(conflict, Err(AppError::SettingAlreadyExists)));
}

#[tokio::test]
async fn dashboard_metrics_reflect_todays_activity() {
    let state = setup_state().await;
    let today = Utc::now().date_naive();

    state
        .appointment_repo
        .create(
            &state.db_pool,
            "apt-1",
            None,
            "Joana Lima",
            None,
            "Carla Dias",
            Some("s1"),
            "Corte Feminino",
            today,
            "10:00",
            60,
            80.0,
            AppointmentStatus::Completed,
            None,
        )
        .await
        .unwrap();

    state
        .transaction_repo
        .create(
            &state.db_pool,
            "txn-1",
            TransactionType::Income,
            "SALE",
            "Venda #sal-teste",
            120.0,
            TransactionStatus::Paid,
            Some("PIX"),
            today,
            Some(today),
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let metrics = state
        .dashboard_repo
        .get_metrics(&state.db_pool)
        .await
        .unwrap();

    assert_eq!(metrics.today_appointments, 1);
    // 80 do agendamento concluído + 120 da transação paga
    assert_eq!(metrics.today_revenue, 200.0);
    assert_eq!(metrics.month_revenue, 120.0);
    assert_eq!(metrics.appointments_list.len(), 1);
    assert_eq!(metrics.appointments_list[0].service_name, "Corte Feminino");
}

#[tokio::test]
async fn financial_report_aggregates_paid_transactions() {
    let state = setup_state().await;
    let today = Utc::now().date_naive();

    for (id, kind, category, amount) in [
        ("txn-r1", TransactionType::Income, "SALE", 100.0),
        ("txn-r2", TransactionType::Income, "SERVICE", 50.0),
        ("txn-r3", TransactionType::Expense, "SUPPLIES", 30.0),
    ] {
        state
            .transaction_repo
            .create(
                &state.db_pool,
                id,
                kind,
                category,
                "Lançamento de teste",
                amount,
                TransactionStatus::Paid,
                Some("MONEY"),
                today,
                Some(today),
                None,
                None,
                None,
            )
            .await
            .unwrap();
    }
    // Transação pendente fica de fora do relatório
    state
        .transaction_repo
        .create(
            &state.db_pool,
            "txn-r4",
            TransactionType::Expense,
            "RENT",
            "Aluguel",
            500.0,
            TransactionStatus::Pending,
            None,
            today,
            None,
            None,
            None,
            None,
        )
        .await
        .unwrap();

    let report = state
        .report_repo
        .financial(&state.db_pool, Default::default())
        .await
        .unwrap();

    assert_eq!(report.summary.total_income, 150.0);
    assert_eq!(report.summary.total_expenses, 30.0);
    assert_eq!(report.summary.net_profit, 120.0);
    assert_eq!(report.summary.transactions_count, 3);
    assert_eq!(report.income_by_category.len(), 2);
}

#[tokio::test]
async fn products_report_flags_restock_and_sums_movements() {
    let state = setup_state().await;

    state
        .product_repo
        .create(
            &state.db_pool,
            "prd-rep",
            "Máscara Capilar",
            ProductKind::Resale,
            "Tratamento",
            None,
            "MSC-001",
            1.0,
            10.0,
            50.0,
            "UN",
            8.0,
            Some(25.0),
            None,
            None,
        )
        .await
        .unwrap();

    state
        .stock_service
        .record_movement(
            &state.db_pool,
            "prd-rep",
            salonx_backend::models::inventory::MovementType::In,
            5.0,
            Some("Compra"),
            None,
        )
        .await
        .unwrap();

    let report = state
        .report_repo
        .products(&state.db_pool, Default::default())
        .await
        .unwrap();

    assert_eq!(report.product_stats.len(), 1);
    assert!(report.product_stats[0].needs_restock);
    assert_eq!(report.low_stock_products.len(), 1);
    assert_eq!(report.stock_movements.len(), 1);
    assert_eq!(report.stock_movements[0].kind, "IN");
    assert_eq!(report.stock_movements[0].total_quantity, Some(5.0));
}

#[tokio::test]
async fn default_service_catalog_is_seeded_once() {
    let state = setup_state().await;

    let services = state
        .service_repo
        .list(&state.db_pool, None)
        .await
        .unwrap();
    assert_eq!(services.len(), 6);

    state.seed().await.unwrap();
    let again = state
        .service_repo
        .list(&state.db_pool, None)
        .await
        .unwrap();
    assert_eq!(again.len(), 6);

    let hair = state
        .service_repo
        .list(&state.db_pool, Some("Cabelo"))
        .await
        .unwrap();
    assert_eq!(hair.len(), 4);
}
