pub mod auth_service;
pub mod sale_service;
pub mod stock_service;

pub use auth_service::AuthService;
pub use sale_service::SaleService;
pub use stock_service::StockService;
