use crate::database::connection::{DatabaseError, PgPooledConnection};
use crate::database::models::StockRecord;
use crate::database::schema::stocks;
use crate::models::Stock;
use diesel::prelude::*;
use std::sync::Arc;

/// Stock repository trait - the entity store behind the API
///
/// `save` inserts a new record or replaces the one sharing its id.
#[async_trait::async_trait]
pub trait StockRepository: Send + Sync {
    /// Get all stocks in store order
    async fn find_all(&self) -> Result<Vec<Stock>, DatabaseError>;

    /// Find stock by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Stock>, DatabaseError>;

    /// Insert or replace a stock, returning the persisted copy
    async fn save(&self, stock: Stock) -> Result<Stock, DatabaseError>;

    /// Delete stock by ID. Returns true if a record was removed.
    async fn delete_by_id(&self, id: &str) -> Result<bool, DatabaseError>;

    /// Check whether a stock with the ID exists
    async fn exists_by_id(&self, id: &str) -> Result<bool, DatabaseError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Short name of the backing store, reported by the health endpoint
    fn backend(&self) -> &'static str;
}

type ConnectionProvider = dyn Fn() -> Result<PgPooledConnection, DatabaseError> + Send + Sync;

/// PostgreSQL implementation of StockRepository
///
/// Diesel calls block, so each operation runs on the blocking thread pool
/// with its own pooled connection.
pub struct StockRepositoryImpl {
    get_conn: Arc<ConnectionProvider>,
}

impl StockRepositoryImpl {
    /// Create new stock repository with connection provider
    pub fn new<F>(get_conn: F) -> Self
    where
        F: Fn() -> Result<PgPooledConnection, DatabaseError> + Send + Sync + 'static,
    {
        Self {
            get_conn: Arc::new(get_conn),
        }
    }

    async fn with_conn<T, F>(&self, op: F) -> Result<T, DatabaseError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgPooledConnection) -> Result<T, DatabaseError> + Send + 'static,
    {
        let get_conn = Arc::clone(&self.get_conn);

        tokio::task::spawn_blocking(move || {
            let mut conn = get_conn()?;
            op(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::TaskError(e.to_string()))?
    }
}

#[async_trait::async_trait]
impl StockRepository for StockRepositoryImpl {
    async fn find_all(&self) -> Result<Vec<Stock>, DatabaseError> {
        self.with_conn(|conn| {
            let records = stocks::table
                .select(StockRecord::as_select())
                .load::<StockRecord>(conn)?;

            Ok(records.into_iter().map(Stock::from).collect())
        })
        .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Stock>, DatabaseError> {
        let id = id.to_string();

        self.with_conn(move |conn| {
            let record = stocks::table
                .filter(stocks::id.eq(&id))
                .select(StockRecord::as_select())
                .first::<StockRecord>(conn)
                .optional()?;

            Ok(record.map(Stock::from))
        })
        .await
    }

    async fn save(&self, stock: Stock) -> Result<Stock, DatabaseError> {
        let record = StockRecord::from(stock);

        self.with_conn(move |conn| {
            let saved = diesel::insert_into(stocks::table)
                .values(&record)
                .on_conflict(stocks::id)
                .do_update()
                .set((
                    stocks::symbol.eq(&record.symbol),
                    stocks::company_name.eq(&record.company_name),
                    stocks::price.eq(record.price),
                ))
                .returning(StockRecord::as_returning())
                .get_result::<StockRecord>(conn)?;

            Ok(Stock::from(saved))
        })
        .await
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, DatabaseError> {
        let id = id.to_string();

        self.with_conn(move |conn| {
            let deleted = diesel::delete(stocks::table)
                .filter(stocks::id.eq(&id))
                .execute(conn)?;

            Ok(deleted > 0)
        })
        .await
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, DatabaseError> {
        let id = id.to_string();

        self.with_conn(move |conn| {
            let exists = diesel::select(diesel::dsl::exists(
                stocks::table.filter(stocks::id.eq(&id)),
            ))
            .get_result::<bool>(conn)?;

            Ok(exists)
        })
        .await
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::establish_connection_pool;

    // Needs a live PostgreSQL; skipped when DATABASE_URL is unset
    fn repository() -> Option<StockRepositoryImpl> {
        let database_url = std::env::var("DATABASE_URL").ok()?;
        let pool = establish_connection_pool(&database_url, 2).ok()?;
        pool.run_migrations().ok()?;

        Some(StockRepositoryImpl::new(move || pool.get_conn()))
    }

    #[tokio::test]
    async fn test_stock_repository_lifecycle() {
        let Some(repo) = repository() else {
            return;
        };

        let stock = Stock::new("SANB4", "Test Stock", 45.2);
        let saved = repo.save(stock.clone()).await.unwrap();
        assert_eq!(saved, stock);
        assert!(repo.exists_by_id(&stock.id).await.unwrap());

        let mut changed = saved.clone();
        changed.replace_fields("TST4".to_string(), "Changed".to_string(), 45.0);
        repo.save(changed.clone()).await.unwrap();
        assert_eq!(repo.find_by_id(&stock.id).await.unwrap(), Some(changed));

        assert!(repo.delete_by_id(&stock.id).await.unwrap());
        assert!(!repo.exists_by_id(&stock.id).await.unwrap());
        assert!(!repo.delete_by_id(&stock.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_stock_repository_stores_long_symbol() {
        let Some(repo) = repository() else {
            return;
        };

        let symbol = "THIS_SYMBOL_IS_LONGER_THAN_SIXTEEN_CHARACTERS";
        let mut stock = repo.save(Stock::new("SANB4", "Test Stock", 45.2)).await.unwrap();
        stock.replace_fields(symbol.to_string(), "Test Stock".to_string(), 45.2);

        let saved = repo.save(stock.clone()).await.unwrap();
        assert_eq!(saved.symbol, symbol);
        assert_eq!(repo.find_by_id(&stock.id).await.unwrap(), Some(stock.clone()));

        repo.delete_by_id(&stock.id).await.unwrap();
    }
}
