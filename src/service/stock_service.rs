use std::sync::Arc;

use tracing::Span;

use crate::database::StockRepository;
use crate::models::{Stock, StockRequest};

use super::errors::StockError;
use super::validation::{require_fields, validate_stock_request};

/// Stock operations over an entity store
///
/// The service owns no state of its own beyond the repository handle and the
/// span its events are recorded under.
pub struct StockService {
    repository: Arc<dyn StockRepository>,
    span: Span,
}

impl StockService {
    pub fn new(repository: Arc<dyn StockRepository>) -> Self {
        Self::with_span(repository, tracing::info_span!("stock_service"))
    }

    /// Create the service with the span its events should be recorded under
    pub fn with_span(repository: Arc<dyn StockRepository>, span: Span) -> Self {
        Self { repository, span }
    }

    /// Name of the backing store
    pub fn backend(&self) -> &'static str {
        self.repository.backend()
    }

    pub async fn list_stocks(&self) -> Result<Vec<Stock>, StockError> {
        tracing::info!(parent: &self.span, "Retrieving all stocks");
        Ok(self.repository.find_all().await?)
    }

    pub async fn get_stock(&self, id: &str) -> Result<Stock, StockError> {
        tracing::info!(parent: &self.span, %id, "Retrieving stock by ID");
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| StockError::NotFound(id.to_string()))
    }

    pub async fn stock_exists(&self, id: &str) -> Result<bool, StockError> {
        Ok(self.repository.exists_by_id(id).await?)
    }

    /// Validate the payload, build a stock with a fresh ID and persist it
    ///
    /// Nothing is written when any field rule fails.
    pub async fn create_stock(&self, request: StockRequest) -> Result<Stock, StockError> {
        tracing::info!(parent: &self.span, "Creating new stock");

        let fields = validate_stock_request(request).map_err(|e| {
            tracing::error!(parent: &self.span, "{}", e);
            e
        })?;

        let saved = self.repository.save(Stock::from(fields)).await?;
        tracing::info!(parent: &self.span, id = %saved.id, symbol = %saved.symbol, "Stock created");
        Ok(saved)
    }

    /// Replace symbol, company name and price of an existing stock
    ///
    /// The body is applied as-is; field rules are not re-run.
    pub async fn update_stock(&self, id: &str, request: StockRequest) -> Result<Stock, StockError> {
        tracing::info!(parent: &self.span, %id, "Updating stock");

        let mut stock = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| StockError::NotFound(id.to_string()))?;

        let fields = require_fields(request)?;
        stock.replace_fields(fields.symbol, fields.company_name, fields.price);

        Ok(self.repository.save(stock).await?)
    }

    pub async fn delete_stock(&self, id: &str) -> Result<(), StockError> {
        tracing::info!(parent: &self.span, %id, "Deleting stock");

        if self.repository.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(StockError::NotFound(id.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryStockRepository;

    fn service() -> (StockService, Arc<InMemoryStockRepository>) {
        let repository = Arc::new(InMemoryStockRepository::new());
        (StockService::new(repository.clone()), repository)
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (service, _) = service();

        let created = service
            .create_stock(StockRequest::new("SANB4", "Test Stock", 45.2))
            .await
            .unwrap();
        let fetched = service.get_stock(&created.id).await.unwrap();

        assert!(!created.id.is_empty());
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_with_violations_persists_nothing() {
        let (service, repository) = service();

        let err = service
            .create_stock(StockRequest::new("bad", " ", 10.0))
            .await
            .unwrap_err();

        assert!(matches!(err, StockError::Validation(ref v) if v.0.len() == 2));
        assert!(repository.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let (service, _) = service();
        let created = service
            .create_stock(StockRequest::new("SANB4", "Test Stock", 45.2))
            .await
            .unwrap();

        let updated = service
            .update_stock(&created.id, StockRequest::new("TST4", "Renamed", 45.0))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.symbol, "TST4");
        assert_eq!(updated.company_name, "Renamed");
        assert_eq!(updated.price, 45.0);
        assert_eq!(service.get_stock(&created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_with_partial_body_keeps_stock() {
        let (service, _) = service();
        let created = service
            .create_stock(StockRequest::new("SANB4", "Test Stock", 45.2))
            .await
            .unwrap();

        let request = StockRequest {
            symbol: Some("UPD".to_string()),
            ..Default::default()
        };
        let err = service.update_stock(&created.id, request).await.unwrap_err();

        assert!(matches!(err, StockError::MissingField("companyName")));
        assert_eq!(service.get_stock(&created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let (service, _) = service();

        assert!(service.get_stock("non_existing_id").await.unwrap_err().is_state_error());
        assert!(service
            .update_stock("non_existing_id", StockRequest::new("TST4", "Test Stock", 45.0))
            .await
            .unwrap_err()
            .is_state_error());
        assert!(service.delete_stock("non_existing_id").await.unwrap_err().is_state_error());
        assert!(!service.stock_exists("non_existing_id").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_removes_stock() {
        let (service, _) = service();
        let created = service
            .create_stock(StockRequest::new("PETR4", "Petrobras", 38.0))
            .await
            .unwrap();

        service.delete_stock(&created.id).await.unwrap();

        assert!(matches!(
            service.get_stock(&created.id).await,
            Err(StockError::NotFound(_))
        ));
        assert!(service.list_stocks().await.unwrap().is_empty());
    }
}
