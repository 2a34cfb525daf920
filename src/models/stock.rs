use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

/// A stock record held by the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    /// Generated once at construction, never taken from input
    #[schema(example = "f19197c4-38be-462c-a99f-4d32e91c74f3")]
    pub id: String,
    #[schema(example = "SANB4")]
    pub symbol: String,
    #[schema(example = "Banco Santander")]
    pub company_name: String,
    #[schema(example = 45.2)]
    pub price: f64,
}

/// Body accepted by the create and update endpoints
///
/// Every field is optional on the wire so that a missing field surfaces as a
/// rule violation rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockRequest {
    #[schema(example = "SANB4")]
    pub symbol: Option<String>,
    #[schema(example = "Test Stock")]
    pub company_name: Option<String>,
    #[schema(example = 45.2)]
    pub price: Option<f64>,
}

impl StockRequest {
    pub fn new(symbol: impl Into<String>, company_name: impl Into<String>, price: f64) -> Self {
        Self {
            symbol: Some(symbol.into()),
            company_name: Some(company_name.into()),
            price: Some(price),
        }
    }
}

/// Raised when a price helper would leave the stock below zero
///
/// This is a caller contract violation: the amount must be checked against
/// the current price before calling `decrease_price`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PriceError {
    #[error("Price cannot be negative: {symbol} at {price} decreased by {amount}")]
    NegativePrice {
        symbol: String,
        price: f64,
        amount: f64,
    },
}

impl Stock {
    /// Build a stock with a fresh id. Fields are taken as given.
    pub fn new(symbol: impl Into<String>, company_name: impl Into<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            symbol: symbol.into(),
            company_name: company_name.into(),
            price,
        }
    }

    /// Overwrite every mutable field, keeping the id
    pub fn replace_fields(&mut self, symbol: String, company_name: String, price: f64) {
        self.symbol = symbol;
        self.company_name = company_name;
        self.price = price;
    }

    /// Price after raising it by `amount`. The stock itself is left untouched.
    pub fn increase_price(&self, amount: f64) -> f64 {
        tracing::debug!(symbol = %self.symbol, amount, "Increasing price");
        self.price + amount
    }

    /// Price after lowering it by `amount`
    ///
    /// # Returns
    /// * `Ok(new_price)` when the result is zero or above
    /// * `Err(PriceError::NegativePrice)` when the result would be below zero
    pub fn decrease_price(&self, amount: f64) -> Result<f64, PriceError> {
        tracing::debug!(symbol = %self.symbol, amount, "Decreasing price");
        let new_price = self.price - amount;
        if new_price < 0.0 {
            tracing::error!(
                symbol = %self.symbol,
                price = self.price,
                amount,
                "Decrease would leave a negative price"
            );
            return Err(PriceError::NegativePrice {
                symbol: self.symbol.clone(),
                price: self.price,
                amount,
            });
        }
        Ok(new_price)
    }

    /// Dispatch to `increase_price` or `decrease_price`
    pub fn change_price(&self, amount: f64, increase: bool) -> Result<f64, PriceError> {
        let new_price = if increase {
            self.increase_price(amount)
        } else {
            self.decrease_price(amount)?
        };
        tracing::debug!(symbol = %self.symbol, new_price, "Price changed");
        Ok(new_price)
    }
}
