use utoipa::OpenApi;

use crate::api::handlers;
use crate::api::responses::*;
use crate::models::{Stock, StockRequest};

/// OpenAPI specification for the stock registry
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stock Registry API",
        version = "1.0.0",
        description = "Create, list, fetch, update and delete stock records",
        license(
            name = "MIT"
        )
    ),
    paths(
        handlers::health_check,
        handlers::list_stocks,
        handlers::get_stock,
        handlers::create_stock,
        handlers::update_stock,
        handlers::delete_stock,
    ),
    components(
        schemas(
            Stock,
            StockRequest,
            HealthResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Stocks", description = "Stock record management"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_stock_paths() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/stocks"));
        assert!(doc.paths.paths.contains_key("/stocks/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}
