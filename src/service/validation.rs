//! Stock payload validation
//!
//! Field rules are an ordered list evaluated in full against a
//! `StockRequest`; every violation is reported, not just the first. The
//! positive-price check is separate and runs before the rules on creation.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::{Stock, StockRequest};

use super::errors::{FieldViolation, StockError, ValidationErrors};

/// Four uppercase letters, one or two digits, then an optional B3 suffix
pub const SYMBOL_PATTERN: &str = r"^[A-Z]{4}[0-9]{1,2}([A-Z]?|[A-Z][0-9]|F|B|N[1-3])?$";

fn symbol_regex() -> &'static Regex {
    static SYMBOL_REGEX: OnceLock<Regex> = OnceLock::new();
    SYMBOL_REGEX.get_or_init(|| Regex::new(SYMBOL_PATTERN).expect("symbol pattern is valid"))
}

/// Returns true if `symbol` follows the B3 ticker convention
pub fn symbol_matches(symbol: &str) -> bool {
    symbol_regex().is_match(symbol)
}

/// A declarative constraint on one field of the payload
struct FieldRule {
    field: &'static str,
    message: &'static str,
    is_valid: fn(&StockRequest) -> bool,
}

const STOCK_RULES: [FieldRule; 3] = [
    FieldRule {
        field: "symbol",
        message: "Symbol does not match the B3 pattern",
        is_valid: |r| r.symbol.as_deref().is_some_and(symbol_matches),
    },
    FieldRule {
        field: "companyName",
        message: "Company name cannot be blank",
        is_valid: |r| r.company_name.as_deref().is_some_and(|n| !n.trim().is_empty()),
    },
    FieldRule {
        field: "price",
        message: "Price cannot be null",
        is_valid: |r| r.price.is_some(),
    },
];

/// The three stock fields, all present
#[derive(Debug, Clone, PartialEq)]
pub struct StockFields {
    pub symbol: String,
    pub company_name: String,
    pub price: f64,
}

impl From<StockFields> for Stock {
    fn from(fields: StockFields) -> Self {
        Stock::new(fields.symbol, fields.company_name, fields.price)
    }
}

/// Run every field rule and return the violations in rule order
pub fn check_stock_request(request: &StockRequest) -> Vec<FieldViolation> {
    STOCK_RULES
        .iter()
        .filter(|rule| !(rule.is_valid)(request))
        .map(|rule| FieldViolation {
            field: rule.field,
            message: rule.message,
        })
        .collect()
}

/// Validate a creation payload
///
/// # Returns
/// * `Ok(StockFields)` if all rules pass
/// * `Err(StockError::Validation)` carrying every violation otherwise
pub fn validate_stock_request(request: StockRequest) -> Result<StockFields, StockError> {
    let violations = check_stock_request(&request);
    if !violations.is_empty() {
        return Err(StockError::Validation(ValidationErrors(violations)));
    }

    require_fields(request)
}

/// Take all three fields out of a payload without running the rules
///
/// Used by update, which replaces every field wholesale.
pub fn require_fields(request: StockRequest) -> Result<StockFields, StockError> {
    Ok(StockFields {
        symbol: request.symbol.ok_or(StockError::MissingField("symbol"))?,
        company_name: request
            .company_name
            .ok_or(StockError::MissingField("companyName"))?,
        price: request.price.ok_or(StockError::MissingField("price"))?,
    })
}

/// Reject a creation price that is zero or negative
///
/// A missing price is left to the field rules.
pub fn ensure_positive_price(price: Option<f64>) -> Result<(), StockError> {
    match price {
        Some(p) if p <= 0.0 => Err(StockError::NonPositivePrice(p)),
        _ => Ok(()),
    }
}

/// Returns true if the ID is neither empty nor whitespace
pub fn is_valid_id(id: &str) -> bool {
    !id.trim().is_empty()
}
