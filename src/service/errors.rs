//! Error types for stock operations
//!
//! Every failure a request can hit is one of these variants. The HTTP status
//! each maps to lives next to the handlers.

use std::fmt;

use thiserror::Error;

use crate::database::DatabaseError;
use crate::models::PriceError;

/// A single failed field rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name as it appears in the JSON body
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}: {}]", self.field, self.message)
    }
}

/// Every violation found in one payload, in rule order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

/// Errors that can occur while serving stock requests
///
/// # Error Categories
///
/// - **Validation Errors**: `InvalidBody`, `InvalidId`, `NonPositivePrice`, `Validation`, `MissingField`
/// - **State Errors**: `NotFound`
/// - **Internal Errors**: `Price`, `Database`
#[derive(Debug, Error)]
pub enum StockError {
    /// No stock stored under the requested ID
    #[error("Stock not found: {0}")]
    NotFound(String),

    /// Body is not JSON or a field has the wrong type
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// ID is empty or whitespace
    #[error("Invalid ID: ID cannot be blank")]
    InvalidId,

    /// Creation price is zero or negative
    #[error("Invalid price: Price must be positive, got: {0}")]
    NonPositivePrice(f64),

    /// One or more field rules failed
    #[error("Validation failed. Details: {0}")]
    Validation(ValidationErrors),

    /// Full replacement needs every field in the body
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A price helper was called with an amount it cannot apply
    #[error("Price error: {0}")]
    Price(#[from] PriceError),

    #[error("Storage error: {0}")]
    Database(#[from] DatabaseError),
}

impl StockError {
    /// Returns true if the request itself was malformed
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            StockError::InvalidBody(_)
                | StockError::InvalidId
                | StockError::NonPositivePrice(_)
                | StockError::Validation(_)
                | StockError::MissingField(_)
        )
    }

    /// Returns true if the request referred to a stock that does not exist
    pub fn is_state_error(&self) -> bool {
        matches!(self, StockError::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_violation() {
        let err = StockError::Validation(ValidationErrors(vec![
            FieldViolation {
                field: "symbol",
                message: "Symbol does not match the B3 pattern",
            },
            FieldViolation {
                field: "companyName",
                message: "Company name cannot be blank",
            },
        ]));

        assert_eq!(
            err.to_string(),
            "Validation failed. Details: [symbol: Symbol does not match the B3 pattern], \
             [companyName: Company name cannot be blank]"
        );
    }

    #[test]
    fn test_error_categories() {
        assert!(StockError::InvalidId.is_validation_error());
        assert!(StockError::InvalidBody("expected f64".to_string()).is_validation_error());
        assert!(StockError::NonPositivePrice(0.0).is_validation_error());
        assert!(StockError::NotFound("x".to_string()).is_state_error());
        assert!(!StockError::NotFound("x".to_string()).is_validation_error());
    }
}
