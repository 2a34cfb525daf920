use parking_lot::RwLock;

use super::stock_repository::StockRepository;
use crate::database::connection::DatabaseError;
use crate::models::Stock;

/// In-process stock store
///
/// Records are kept in insertion order. Used when no database is configured
/// and as the store behind the API tests.
#[derive(Debug, Default)]
pub struct InMemoryStockRepository {
    stocks: RwLock<Vec<Stock>>,
}

impl InMemoryStockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.stocks.read().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.stocks.read().is_empty()
    }
}

#[async_trait::async_trait]
impl StockRepository for InMemoryStockRepository {
    async fn find_all(&self) -> Result<Vec<Stock>, DatabaseError> {
        Ok(self.stocks.read().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Stock>, DatabaseError> {
        Ok(self.stocks.read().iter().find(|s| s.id == id).cloned())
    }

    async fn save(&self, stock: Stock) -> Result<Stock, DatabaseError> {
        let mut stocks = self.stocks.write();

        match stocks.iter_mut().find(|s| s.id == stock.id) {
            Some(existing) => *existing = stock.clone(),
            None => stocks.push(stock.clone()),
        }

        Ok(stock)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut stocks = self.stocks.write();
        let before = stocks.len();
        stocks.retain(|s| s.id != id);

        Ok(stocks.len() < before)
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, DatabaseError> {
        Ok(self.stocks.read().iter().any(|s| s.id == id))
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
