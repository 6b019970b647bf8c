pub mod appointment_repo;
pub mod client_repo;
pub mod dashboard_repo;
pub mod product_repo;
pub mod professional_repo;
pub mod report_repo;
pub mod sale_repo;
pub mod service_repo;
pub mod settings_repo;
pub mod stock_repo;
pub mod transaction_repo;
pub mod user_repo;

pub use appointment_repo::AppointmentRepository;
pub use client_repo::ClientRepository;
pub use dashboard_repo::DashboardRepository;
pub use product_repo::ProductRepository;
pub use professional_repo::ProfessionalRepository;
pub use report_repo::ReportRepository;
pub use sale_repo::SaleRepository;
pub use service_repo::ServiceRepository;
pub use settings_repo::SettingsRepository;
pub use stock_repo::StockRepository;
pub use transaction_repo::TransactionRepository;
pub use user_repo::UserRepository;
