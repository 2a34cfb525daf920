use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::models::{Stock, StockRequest};
use crate::service::{ensure_positive_price, is_valid_id, StockError, StockService};

use super::responses::*;

/// Shared application state
pub type AppState = Arc<StockService>;

/// Convert StockError to HTTP response
impl IntoResponse for StockError {
    fn into_response(self) -> Response {
        let status = if self.is_state_error() {
            StatusCode::NOT_FOUND
        } else if self.is_validation_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Malformed JSON or a wrongly typed field becomes a 400 with the usual error body
impl From<JsonRejection> for StockError {
    fn from(rejection: JsonRejection) -> Self {
        StockError::InvalidBody(rejection.body_text())
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(State(service): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        storage: service.backend().to_string(),
        timestamp: Utc::now(),
    })
}

/// List all stocks
#[utoipa::path(
    get,
    path = "/stocks",
    tag = "Stocks",
    responses(
        (status = 200, description = "Every stored stock", body = Vec<Stock>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_stocks(State(service): State<AppState>) -> Result<Json<Vec<Stock>>, StockError> {
    Ok(Json(service.list_stocks().await?))
}

/// Get a stock by ID
#[utoipa::path(
    get,
    path = "/stocks/{id}",
    tag = "Stocks",
    params(
        ("id" = String, Path, description = "Stock ID")
    ),
    responses(
        (status = 200, description = "Stock found", body = Stock),
        (status = 404, description = "Stock not found", body = ErrorResponse)
    )
)]
pub async fn get_stock(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Stock>, StockError> {
    Ok(Json(service.get_stock(&id).await?))
}

/// Create a stock
///
/// A price of zero or below is rejected before the field rules run.
#[utoipa::path(
    post,
    path = "/stocks",
    tag = "Stocks",
    request_body = StockRequest,
    responses(
        (status = 201, description = "Stock created", body = Stock),
        (status = 400, description = "Malformed body, non-positive price or field rule violation", body = ErrorResponse)
    )
)]
pub async fn create_stock(
    State(service): State<AppState>,
    payload: Result<Json<StockRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Stock>), StockError> {
    let Json(request) = payload?;

    if let Err(e) = ensure_positive_price(request.price) {
        tracing::error!("Invalid price provided for new stock creation: {}", e);
        return Err(e);
    }

    let stock = service.create_stock(request).await?;
    Ok((StatusCode::CREATED, Json(stock)))
}

/// Replace symbol, company name and price of a stock
///
/// Responds 201 on success, matching create.
#[utoipa::path(
    put,
    path = "/stocks/{id}",
    tag = "Stocks",
    params(
        ("id" = String, Path, description = "Stock ID")
    ),
    request_body = StockRequest,
    responses(
        (status = 201, description = "Stock updated", body = Stock),
        (status = 400, description = "Blank ID, malformed or incomplete body", body = ErrorResponse),
        (status = 404, description = "Stock not found", body = ErrorResponse)
    )
)]
pub async fn update_stock(
    State(service): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StockRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Stock>), StockError> {
    let Json(request) = payload?;

    // A blank segment never reaches this route; the check guards direct callers.
    if !is_valid_id(&id) {
        tracing::error!("Invalid ID provided for update operation");
        return Err(StockError::InvalidId);
    }

    if !service.stock_exists(&id).await? {
        tracing::error!("Stock with ID {} not found for update", id);
        return Err(StockError::NotFound(id));
    }

    let stock = service.update_stock(&id, request).await?;
    Ok((StatusCode::CREATED, Json(stock)))
}

/// Delete a stock by ID
#[utoipa::path(
    delete,
    path = "/stocks/{id}",
    tag = "Stocks",
    params(
        ("id" = String, Path, description = "Stock ID")
    ),
    responses(
        (status = 200, description = "Stock deleted"),
        (status = 400, description = "Blank ID", body = ErrorResponse),
        (status = 404, description = "Stock not found", body = ErrorResponse)
    )
)]
pub async fn delete_stock(
    State(service): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, StockError> {
    if !is_valid_id(&id) {
        tracing::error!("Invalid ID provided for delete operation");
        return Err(StockError::InvalidId);
    }

    if !service.stock_exists(&id).await? {
        tracing::error!("Stock with ID {} not found for deletion", id);
        return Err(StockError::NotFound(id));
    }

    service.delete_stock(&id).await?;
    Ok(StatusCode::OK)
}
