use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    /// Backing store: "postgres" or "memory"
    #[schema(example = "postgres")]
    pub storage: String,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "404 Not Found")]
    pub error: String,
    #[schema(example = "Stock not found: non_existing_id")]
    pub message: String,
}
