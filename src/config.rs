// src/config.rs

use std::{env, str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    db::{
        AppointmentRepository, ClientRepository, DashboardRepository, ProductRepository,
        ProfessionalRepository, ReportRepository, SaleRepository, ServiceRepository,
        SettingsRepository, StockRepository, TransactionRepository, UserRepository,
    },
    services::{AuthService, SaleService, StockService},
};

// O estado compartilhado que será acessível em toda a aplicação.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    // Repositórios de CRUD simples, usados direto pelos handlers
    pub client_repo: ClientRepository,
    pub professional_repo: ProfessionalRepository,
    pub service_repo: ServiceRepository,
    pub appointment_repo: AppointmentRepository,
    pub product_repo: ProductRepository,
    pub transaction_repo: TransactionRepository,
    pub user_repo: UserRepository,
    pub settings_repo: SettingsRepository,
    pub dashboard_repo: DashboardRepository,
    pub report_repo: ReportRepository,
    // Serviços com regra de negócio
    pub auth_service: AuthService,
    pub stock_service: StockService,
    pub sale_service: SaleService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // Um único arquivo SQLite guarda todas as tabelas.
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:salonx.db".to_string());

        // ATOMIC_CHECKOUT=true embrulha o checkout inteiro numa transação;
        // o padrão mantém a sequência de statements independentes.
        let atomic_checkout = env::var("ATOMIC_CHECKOUT")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let connect_options = SqliteConnectOptions::from_str(&database_url)?
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .create_if_missing(true);

        let db_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(connect_options)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, atomic_checkout))
    }

    // Monta o gráfico de dependências a partir de uma pool pronta.
    // Também é o ponto de entrada dos testes de integração.
    pub fn from_pool(db_pool: SqlitePool, atomic_checkout: bool) -> Self {
        let client_repo = ClientRepository::new(db_pool.clone());
        let professional_repo = ProfessionalRepository::new(db_pool.clone());
        let service_repo = ServiceRepository::new(db_pool.clone());
        let appointment_repo = AppointmentRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let stock_repo = StockRepository::new(db_pool.clone());
        let sale_repo = SaleRepository::new(db_pool.clone());
        let transaction_repo = TransactionRepository::new(db_pool.clone());
        let user_repo = UserRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());
        let report_repo = ReportRepository::new(db_pool.clone());

        let auth_service = AuthService::new(db_pool.clone(), user_repo.clone());
        let stock_service = StockService::new(product_repo.clone(), stock_repo.clone());
        let sale_service = SaleService::new(
            db_pool.clone(),
            sale_repo.clone(),
            transaction_repo.clone(),
            client_repo.clone(),
            stock_service.clone(),
            atomic_checkout,
        );

        Self {
            db_pool,
            client_repo,
            professional_repo,
            service_repo,
            appointment_repo,
            product_repo,
            transaction_repo,
            user_repo,
            settings_repo,
            dashboard_repo,
            report_repo,
            auth_service,
            stock_service,
            sale_service,
        }
    }

    /// Dados iniciais: configurações padrão, usuário administrador e
    /// catálogo de serviços. Idempotente.
    pub async fn seed(&self) -> anyhow::Result<()> {
        self.settings_repo.seed_defaults().await?;
        self.auth_service.seed_admin().await?;
        self.service_repo.seed_defaults().await?;
        Ok(())
    }
}
