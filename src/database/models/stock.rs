use diesel::prelude::*;

use crate::models::Stock;

/// Row in the `stocks` table
///
/// Kept apart from `models::Stock` so the entity carries no storage concerns.
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Insertable, Identifiable)]
#[diesel(table_name = crate::database::schema::stocks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StockRecord {
    pub id: String,
    pub symbol: String,
    pub company_name: String,
    pub price: f64,
}

impl From<Stock> for StockRecord {
    fn from(stock: Stock) -> Self {
        Self {
            id: stock.id,
            symbol: stock.symbol,
            company_name: stock.company_name,
            price: stock.price,
        }
    }
}

impl From<StockRecord> for Stock {
    fn from(record: StockRecord) -> Self {
        Self {
            id: record.id,
            symbol: record.symbol,
            company_name: record.company_name,
            price: record.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_conversion_keeps_fields() {
        let stock = Stock::new("ITUB4", "Itau Unibanco", 32.1);
        let record = StockRecord::from(stock.clone());

        assert_eq!(record.id, stock.id);
        assert_eq!(record.company_name, "Itau Unibanco");
        assert_eq!(Stock::from(record), stock);
    }
}
