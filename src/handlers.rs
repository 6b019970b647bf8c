pub mod appointments;
pub mod auth;
pub mod catalog;
pub mod clients;
pub mod dashboard;
pub mod products;
pub mod professionals;
pub mod reports;
pub mod sales;
pub mod settings;
pub mod stock;
pub mod transactions;
pub mod users;
