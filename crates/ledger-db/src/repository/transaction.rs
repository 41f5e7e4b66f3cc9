//! # Transaction Repository
//!
//! Transactions live in `usuarios/{uid}/transacciones`. Collection payments
//! ("cobranza") are transactions too; the collections view is a filter on
//! their category.
//!
//! ## Views Over One Collection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  transacciones                                                          │
//! │  ├── { Categoría: "Cobranza", Tipo: "Ingreso", Monto: 500 } ─┐          │
//! │  ├── { Categoría: "Ventas",   Tipo: "Ingreso", Monto: 150 }  │          │
//! │  └── { Categoría: "Renta",    Tipo: "Egreso",  Monto: 300 }  │          │
//! │                                                              │          │
//! │  list()             → all three (7 columns)                  │          │
//! │  list_collections() → Categoría == "Cobranza" (5 columns) ◄──┘          │
//! │  balance()          → income 650, expense 300, net 350                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Local;
use ledger_core::document::fields;
use ledger_core::ledger::{collection_payment, sale_income};
use ledger_core::{
    CollectionRow, Document, LedgerBalance, Session, Table, TransactionRow,
    CATEGORY_COLLECTION, TRANSACTIONS_COLLECTION,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::DbResult;
use crate::store::DocumentStore;

/// Repository for transaction documents.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    store: Arc<dyn DocumentStore>,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        TransactionRepository { store }
    }

    /// Stores a transaction record as-is and returns its generated ID.
    pub async fn add(&self, session: &Session, transaction: &Document) -> DbResult<String> {
        let id = self
            .store
            .add(&session.collection(TRANSACTIONS_COLLECTION), transaction)
            .await?;

        info!(user_id = %session.user_id(), id = %id, "Transaction saved");
        Ok(id)
    }

    /// Records a payment received against a client's credit.
    ///
    /// Stored as an income transaction in the "Cobranza" category. When
    /// `description` is `None` or empty it becomes
    /// `"Abono de crédito por parte de {client}"`. A NaN or infinite `amount`
    /// fails with `DbError::Validation` and nothing is written.
    pub async fn record_collection_payment(
        &self,
        session: &Session,
        client: &str,
        amount: f64,
        payment_method: &str,
        date: &str,
        description: Option<&str>,
    ) -> DbResult<String> {
        let payment = collection_payment(client, amount, payment_method, date, description)?;
        let id = self
            .store
            .add(&session.collection(TRANSACTIONS_COLLECTION), &payment)
            .await?;

        info!(
            user_id = %session.user_id(),
            id = %id,
            client = %client,
            amount,
            "Collection payment recorded"
        );
        Ok(id)
    }

    /// Records the income for a sale: its Total, dated with the sale's Fecha
    /// (today when absent), in the "Ventas" category.
    ///
    /// Never called by `SaleRepository::add`; invoke it after recording a
    /// sale when the income should appear in the ledger.
    ///
    /// ## Returns
    /// * `Ok(id)` - Income transaction stored
    /// * `Err(DbError::Validation)` - Total present but not numeric; nothing
    ///   is written
    pub async fn register_sale_income(
        &self,
        session: &Session,
        sale: &Document,
    ) -> DbResult<String> {
        let today = Local::now().date_naive();
        let income = sale_income(sale, today)?;
        let id = self
            .store
            .add(&session.collection(TRANSACTIONS_COLLECTION), &income)
            .await?;

        info!(user_id = %session.user_id(), id = %id, "Automatic income recorded for sale");
        Ok(id)
    }

    /// Lists all transactions as a 7-column table.
    pub async fn list(&self, session: &Session) -> DbResult<Table<TransactionRow>> {
        let docs = self
            .store
            .list(&session.collection(TRANSACTIONS_COLLECTION))
            .await?;

        debug!(user_id = %session.user_id(), count = docs.len(), "Read transactions");
        Ok(Table::from_documents(&docs))
    }

    /// Lists collection payments (Categoría == "Cobranza"), filtered by the
    /// store.
    pub async fn list_collections(&self, session: &Session) -> DbResult<Table<CollectionRow>> {
        let docs = self
            .store
            .find_eq(
                &session.collection(TRANSACTIONS_COLLECTION),
                fields::CATEGORY,
                &Value::from(CATEGORY_COLLECTION),
            )
            .await?;

        debug!(user_id = %session.user_id(), count = docs.len(), "Read collections");
        Ok(Table::from_documents(&docs))
    }

    /// Sums income ("Ingreso") and expense ("Egreso") over all transactions.
    ///
    /// Transactions with any other Tipo count toward neither total.
    pub async fn balance(&self, session: &Session) -> DbResult<LedgerBalance> {
        let transactions = self.list(session).await?;
        let balance = LedgerBalance::from_rows(&transactions);

        debug!(
            user_id = %session.user_id(),
            income = balance.income,
            expense = balance.expense,
            net = balance.net,
            "Computed ledger balance"
        );
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    async fn setup() -> (Database, Session) {
        let db = Database::connect(DbConfig::in_memory()).await.unwrap();
        (db, Session::new("uid-1").unwrap())
    }

    #[tokio::test]
    async fn test_balance_ignores_other_kinds() {
        let (db, session) = setup().await;
        let repo = db.transactions();

        for (kind, amount) in [("Ingreso", 100), ("Egreso", 40), ("Other", 999)] {
            repo.add(&session, &doc(json!({ "Tipo": kind, "Monto": amount })))
                .await
                .unwrap();
        }

        let balance = repo.balance(&session).await.unwrap();
        assert_eq!(balance.income, 100.0);
        assert_eq!(balance.expense, 40.0);
        assert_eq!(balance.net, 60.0);
    }

    #[tokio::test]
    async fn test_balance_coerces_text_amounts() {
        let (db, session) = setup().await;
        let repo = db.transactions();

        repo.add(&session, &doc(json!({ "Tipo": "Ingreso", "Monto": "250.75" })))
            .await
            .unwrap();
        repo.add(&session, &doc(json!({ "Tipo": "Egreso", "Monto": "mucho" })))
            .await
            .unwrap();

        let balance = repo.balance(&session).await.unwrap();
        assert_eq!(balance.income, 250.75);
        assert_eq!(balance.expense, 0.0);
    }

    #[tokio::test]
    async fn test_collection_payment_default_description() {
        let (db, session) = setup().await;
        let repo = db.transactions();

        repo.record_collection_payment(&session, "Ana", 500.0, "cash", "2024-01-01", None)
            .await
            .unwrap();

        let rows = repo.list_collections(&session).await.unwrap().into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].description.as_deref(),
            Some("Abono de crédito por parte de Ana")
        );
        assert_eq!(rows[0].amount, 500.0);
        assert_eq!(rows[0].date.as_deref(), Some("2024-01-01"));
        assert_eq!(rows[0].payment_method.as_deref(), Some("cash"));

        let all = repo.list(&session).await.unwrap().into_rows();
        assert_eq!(all[0].kind.as_deref(), Some("Ingreso"));
        assert_eq!(all[0].category.as_deref(), Some("Cobranza"));
    }

    #[tokio::test]
    async fn test_collections_view_filters_by_category() {
        let (db, session) = setup().await;
        let repo = db.transactions();

        let rent = doc(json!({ "Categoría": "Renta", "Tipo": "Egreso", "Monto": 300 }));
        repo.add(&session, &rent).await.unwrap();
        repo.record_collection_payment(
            &session,
            "Luis",
            80.0,
            "transfer",
            "2024-02-02",
            Some("Pago parcial"),
        )
        .await
        .unwrap();

        let collections = repo.list_collections(&session).await.unwrap();
        assert_eq!(collections.len(), 1);
        assert_eq!(collections.columns().len(), 5);
        assert_eq!(
            collections.rows()[0].description.as_deref(),
            Some("Pago parcial")
        );
        assert_eq!(repo.list(&session).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_register_sale_income_defaults_to_today() {
        let (db, session) = setup().await;
        let repo = db.transactions();
        let sale = doc(json!({ "Cliente": "Ana", "Total": "150.5" }));

        repo.register_sale_income(&session, &sale).await.unwrap();

        let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let rows = repo.list(&session).await.unwrap().into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date.as_deref(), Some(today.as_str()));
        assert_eq!(rows[0].amount, 150.5);
        assert_eq!(rows[0].category.as_deref(), Some("Ventas"));
        assert_eq!(rows[0].kind.as_deref(), Some("Ingreso"));
        assert_eq!(rows[0].description.as_deref(), Some("Venta a Ana"));
    }

    #[tokio::test]
    async fn test_register_sale_income_rejects_bad_total() {
        let (db, session) = setup().await;
        let repo = db.transactions();

        for total in [json!("ciento cincuenta"), serde_json::Value::Null] {
            let sale = doc(json!({ "Cliente": "Ana", "Total": total }));

            let err = repo.register_sale_income(&session, &sale).await.unwrap_err();
            assert!(matches!(err, DbError::Validation(_)));
        }

        assert!(repo.list(&session).await.unwrap().is_empty());
        assert_eq!(repo.balance(&session).await.unwrap(), LedgerBalance::default());
    }

    #[tokio::test]
    async fn test_collection_payment_rejects_nan_amount() {
        let (db, session) = setup().await;
        let repo = db.transactions();

        let err = repo
            .record_collection_payment(&session, "Ana", f64::NAN, "cash", "2024-01-01", None)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
        assert!(repo.list_collections(&session).await.unwrap().is_empty());
    }
}
