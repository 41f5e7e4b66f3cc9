//! # Sale Repository
//!
//! Sales live in `usuarios/{uid}/ventas` with auto-generated IDs.
//!
//! Recording a sale does NOT record its income. Callers that want the
//! matching transaction call
//! [`TransactionRepository::register_sale_income`](crate::TransactionRepository::register_sale_income)
//! themselves.

use ledger_core::{Document, SaleRow, Session, Table, SALES_COLLECTION};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::DbResult;
use crate::store::DocumentStore;

/// Repository for sale documents.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    store: Arc<dyn DocumentStore>,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        SaleRepository { store }
    }

    /// Stores a sale record as-is and returns its generated ID.
    ///
    /// No field is required; an incomplete record is stored as given.
    pub async fn add(&self, session: &Session, sale: &Document) -> DbResult<String> {
        let id = self
            .store
            .add(&session.collection(SALES_COLLECTION), sale)
            .await?;

        info!(user_id = %session.user_id(), id = %id, "Sale saved");
        Ok(id)
    }

    /// Lists all sales as an 11-column table.
    pub async fn list(&self, session: &Session) -> DbResult<Table<SaleRow>> {
        let docs = self
            .store
            .list(&session.collection(SALES_COLLECTION))
            .await?;

        debug!(user_id = %session.user_id(), count = docs.len(), "Read sales");
        Ok(Table::from_documents(&docs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use ledger_core::TableRow;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_empty_sales_keeps_columns() {
        let db = Database::connect(DbConfig::in_memory()).await.unwrap();
        let session = Session::new("uid-1").unwrap();

        let table = db.sales().list(&session).await.unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns(), SaleRow::COLUMNS);
        assert_eq!(table.columns().len(), 11);
    }

    #[tokio::test]
    async fn test_add_sale_and_coerce_numbers() {
        let db = Database::connect(DbConfig::in_memory()).await.unwrap();
        let session = Session::new("uid-1").unwrap();
        let sale: Document = serde_json::from_value(json!({
            "Fecha": "2024-05-01",
            "Cliente": "Ana",
            "Producto": "Café",
            "Cantidad": 2,
            "Precio Unitario": "75.25",
            "Total": 150.5,
            "Monto Crédito": "sin dato",
            "Método de pago": "Efectivo"
        }))
        .unwrap();

        db.sales().add(&session, &sale).await.unwrap();

        let rows = db.sales().list(&session).await.unwrap().into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 2.0);
        assert_eq!(rows[0].unit_price, 75.25);
        assert_eq!(rows[0].total, 150.5);
        assert_eq!(rows[0].credit_amount, 0.0);
        assert_eq!(rows[0].cash_amount, 0.0);
        assert_eq!(rows[0].sale_type, None);
    }

    #[tokio::test]
    async fn test_add_sale_does_not_record_income() {
        let db = Database::connect(DbConfig::in_memory()).await.unwrap();
        let session = Session::new("uid-1").unwrap();
        let sale: Document = serde_json::from_value(json!({ "Total": 10 })).unwrap();

        db.sales().add(&session, &sale).await.unwrap();

        assert!(db.transactions().list(&session).await.unwrap().is_empty());
    }
}
