// Módulos da aplicação, expostos como biblioteca para o binário e para os
// testes de integração.
pub mod common;
pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod services;
