pub mod stock;

pub use stock::{PriceError, Stock, StockRequest};
