/// Database module for the stock store
///
/// This module provides:
/// - Connection pooling for PostgreSQL
/// - The `StockRepository` trait with a PostgreSQL and an in-memory adapter
/// - Database models and schema
/// - Embedded Diesel migrations

pub mod connection;
pub mod models;
pub mod repositories;
pub mod schema;

pub use connection::{establish_connection_pool, DatabaseError, DatabasePool};
pub use repositories::{InMemoryStockRepository, StockRepository, StockRepositoryImpl};
