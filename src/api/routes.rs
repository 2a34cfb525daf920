use axum::{routing::get, Router};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::service::StockService;

use super::handlers::*;
use super::openapi::ApiDoc;

/// Create the API router with Swagger UI
///
/// Only the verbs registered per path are routed; anything else on
/// `/stocks` or `/stocks/:id` (bulk delete, create with an ID) is answered
/// with 405 by the router.
pub fn create_router(service: Arc<StockService>) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health_check))
        .route("/stocks", get(list_stocks).post(create_stock))
        .route(
            "/stocks/:id",
            get(get_stock).put(update_stock).delete(delete_stock),
        )
        .with_state(service)
}
