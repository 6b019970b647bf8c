//src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;

use salonx_backend::{config::AppState, handlers};

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Dados iniciais (configurações, admin, catálogo)
    app_state
        .seed()
        .await
        .expect("Falha ao gravar os dados iniciais.");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new().route("/login", post(handlers::auth::login));

    let user_routes = Router::new()
        .route(
            "/",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .route(
            "/{id}",
            get(handlers::users::get_user)
                .put(handlers::users::update_user)
                .delete(handlers::users::delete_user),
        );

    let client_routes = Router::new()
        .route(
            "/",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        .route("/{id}/stats", get(handlers::clients::get_client_stats));

    let professional_routes = Router::new()
        .route(
            "/",
            get(handlers::professionals::list_professionals)
                .post(handlers::professionals::create_professional),
        )
        .route(
            "/{id}",
            get(handlers::professionals::get_professional)
                .put(handlers::professionals::update_professional)
                .delete(handlers::professionals::delete_professional),
        );

    let service_routes = Router::new()
        .route(
            "/",
            get(handlers::catalog::list_services).post(handlers::catalog::create_service),
        )
        .route(
            "/{id}",
            get(handlers::catalog::get_service)
                .put(handlers::catalog::update_service)
                .delete(handlers::catalog::delete_service),
        );

    let appointment_routes = Router::new()
        .route(
            "/",
            get(handlers::appointments::list_appointments)
                .post(handlers::appointments::create_appointment),
        )
        .route(
            "/{id}",
            get(handlers::appointments::get_appointment)
                .put(handlers::appointments::update_appointment)
                .delete(handlers::appointments::delete_appointment),
        );

    let product_routes = Router::new()
        .route(
            "/",
            get(handlers::products::list_products).post(handlers::products::create_product),
        )
        .route(
            "/{id}",
            get(handlers::products::get_product)
                .put(handlers::products::update_product)
                .delete(handlers::products::delete_product),
        );

    // O livro-razão de estoque
    let stock_routes = Router::new().route(
        "/",
        get(handlers::stock::list_movements).post(handlers::stock::create_movement),
    );

    // O motor de checkout do PDV
    let sale_routes = Router::new()
        .route(
            "/",
            get(handlers::sales::list_sales).post(handlers::sales::create_sale),
        )
        .route("/{id}", get(handlers::sales::get_sale));

    let transaction_routes = Router::new()
        .route(
            "/",
            get(handlers::transactions::list_transactions)
                .post(handlers::transactions::create_transaction),
        )
        .route(
            "/{id}",
            get(handlers::transactions::get_transaction)
                .put(handlers::transactions::update_transaction)
                .delete(handlers::transactions::delete_transaction),
        );

    let settings_routes = Router::new().route(
        "/",
        get(handlers::settings::get_settings)
            .post(handlers::settings::create_setting)
            .put(handlers::settings::update_settings),
    );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/professionals", professional_routes)
        .nest("/api/services", service_routes)
        .nest("/api/appointments", appointment_routes)
        .nest("/api/products", product_routes)
        .nest("/api/stock-movements", stock_routes)
        .nest("/api/sales", sale_routes)
        .nest("/api/transactions", transaction_routes)
        .nest("/api/settings", settings_routes)
        .route("/api/dashboard/metrics", get(handlers::dashboard::get_metrics))
        .route("/api/reports", get(handlers::reports::get_report))
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
