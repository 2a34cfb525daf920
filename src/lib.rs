// Library Crate Root
// lib.rs

// main.rs imports through lib.rs like an external crate
pub mod api;
pub mod config;
pub mod database;
pub mod models;
pub mod service;

// pub use = re-export at crate root
pub use api::{create_router, AppState};
pub use config::AppConfig;
pub use database::{InMemoryStockRepository, StockRepository, StockRepositoryImpl};
pub use models::{PriceError, Stock, StockRequest};
pub use service::{StockError, StockService};
