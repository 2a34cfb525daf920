//! Stock service module
//!
//! - `errors` - Error types for stock operations
//! - `validation` - Field rules and request checks
//! - `stock_service` - Operations over the entity store

pub mod errors;
pub mod stock_service;
pub mod validation;

pub use errors::{FieldViolation, StockError, ValidationErrors};
pub use stock_service::StockService;
pub use validation::{ensure_positive_price, is_valid_id, validate_stock_request};
