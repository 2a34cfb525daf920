/// Entity store implementations
///
/// - `StockRepository` is the narrow contract the service depends on
/// - `StockRepositoryImpl` backs it with PostgreSQL through Diesel
/// - `InMemoryStockRepository` backs it with an in-process vector

pub mod in_memory;
pub mod stock_repository;

pub use in_memory::InMemoryStockRepository;
pub use stock_repository::{StockRepository, StockRepositoryImpl};
