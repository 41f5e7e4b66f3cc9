//! # Product Repository
//!
//! Products live in `usuarios/{uid}/productos` with auto-generated IDs and
//! are maintained through their business code ("Clave").
//!
//! ## Keyed Maintenance
//! ```text
//! update_by_key("CAF-01", fields)
//!       │
//!       ▼
//! find_eq(Clave == "CAF-01")   ── no match ──► Ok(false), nothing written
//!       │ first match (insertion order)
//!       ▼
//! update(id, fields)           ──────────────► Ok(true)
//! ```
//!
//! The lookup and the mutation are two separate store calls. A product
//! deleted between them surfaces as `DbError::NotFound` from the update.

use ledger_core::document::fields;
use ledger_core::{Document, ProductRow, Session, Table, PRODUCTS_COLLECTION};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::DbResult;
use crate::store::DocumentStore;

/// Repository for product documents.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: Arc<dyn DocumentStore>,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        ProductRepository { store }
    }

    /// Stores a product record as-is and returns its generated ID.
    ///
    /// Clave uniqueness is not enforced.
    pub async fn add(&self, session: &Session, product: &Document) -> DbResult<String> {
        let id = self
            .store
            .add(&session.collection(PRODUCTS_COLLECTION), product)
            .await?;

        info!(user_id = %session.user_id(), id = %id, "Product saved");
        Ok(id)
    }

    /// Lists all products as a 7-column table.
    pub async fn list(&self, session: &Session) -> DbResult<Table<ProductRow>> {
        let docs = self
            .store
            .list(&session.collection(PRODUCTS_COLLECTION))
            .await?;

        debug!(user_id = %session.user_id(), count = docs.len(), "Read products");
        Ok(Table::from_documents(&docs))
    }

    /// Finds the document ID of the first product whose Clave equals `key`.
    pub async fn resolve_id(&self, session: &Session, key: &str) -> DbResult<Option<String>> {
        let matches = self
            .store
            .find_eq(
                &session.collection(PRODUCTS_COLLECTION),
                fields::KEY,
                &Value::from(key),
            )
            .await?;

        if matches.len() > 1 {
            debug!(key = %key, count = matches.len(), "Duplicate product keys, using first");
        }

        let id = matches.into_iter().next().map(|doc| doc.id);
        debug!(
            user_id = %session.user_id(),
            key = %key,
            found = id.is_some(),
            "Resolved product key"
        );
        Ok(id)
    }

    /// Merges `fields` into the product with Clave `key`.
    ///
    /// ## Returns
    /// * `Ok(true)` - Product found and updated
    /// * `Ok(false)` - No product with that key; nothing written
    pub async fn update_by_key(
        &self,
        session: &Session,
        key: &str,
        fields: &Document,
    ) -> DbResult<bool> {
        let Some(id) = self.resolve_id(session, key).await? else {
            debug!(key = %key, "No product to update");
            return Ok(false);
        };

        self.store
            .update(&session.collection(PRODUCTS_COLLECTION), &id, fields)
            .await?;

        info!(user_id = %session.user_id(), key = %key, id = %id, "Product updated");
        Ok(true)
    }

    /// Deletes the product with Clave `key`.
    ///
    /// ## Returns
    /// * `Ok(true)` - Product found and deleted
    /// * `Ok(false)` - No product with that key
    pub async fn delete_by_key(&self, session: &Session, key: &str) -> DbResult<bool> {
        let Some(id) = self.resolve_id(session, key).await? else {
            debug!(key = %key, "No product to delete");
            return Ok(false);
        };

        self.store
            .delete(&session.collection(PRODUCTS_COLLECTION), &id)
            .await?;

        info!(user_id = %session.user_id(), key = %key, id = %id, "Product deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    async fn test_update_by_missing_key_is_noop() {
        let (db, session) = setup().await;
        let products = db.products();
        products
            .add(&session, &doc(json!({ "Clave": "A", "Nombre": "Café" })))
            .await
            .unwrap();
        let before = products.list(&session).await.unwrap().into_rows();

        let updated = products
            .update_by_key(&session, "X", &doc(json!({ "Nombre": "Té" })))
            .await
            .unwrap();
        let deleted = products.delete_by_key(&session, "X").await.unwrap();

        assert!(!updated);
        assert!(!deleted);
        assert_eq!(products.list(&session).await.unwrap().into_rows(), before);
    }

    #[tokio::test]
    async fn test_update_by_key_merges_fields() {
        let (db, session) = setup().await;
        let products = db.products();
        products
            .add(
                &session,
                &doc(json!({ "Clave": "CAF-01", "Nombre": "Café", "Precio Unitario": 80 })),
            )
            .await
            .unwrap();

        let updated = products
            .update_by_key(&session, "CAF-01", &doc(json!({ "Precio Unitario": "95.5" })))
            .await
            .unwrap();

        assert!(updated);
        let rows = products.list(&session).await.unwrap().into_rows();
        assert_eq!(rows[0].name.as_deref(), Some("Café"));
        assert_eq!(rows[0].unit_price, 95.5);
    }

    #[tokio::test]
    async fn test_resolve_returns_first_inserted_match() {
        let (db, session) = setup().await;
        let products = db.products();
        let first = products
            .add(&session, &doc(json!({ "Clave": "DUP", "Nombre": "uno" })))
            .await
            .unwrap();
        products
            .add(&session, &doc(json!({ "Clave": "DUP", "Nombre": "dos" })))
            .await
            .unwrap();

        assert_eq!(products.resolve_id(&session, "DUP").await.unwrap(), Some(first));
        assert_eq!(products.resolve_id(&session, "NADA").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_by_key_removes_only_first_match() {
        let (db, session) = setup().await;
        let products = db.products();
        for name in ["uno", "dos"] {
            products
                .add(&session, &doc(json!({ "Clave": "DUP", "Nombre": name })))
                .await
                .unwrap();
        }

        assert!(products.delete_by_key(&session, "DUP").await.unwrap());

        let rows = products.list(&session).await.unwrap().into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name.as_deref(), Some("dos"));
    }
}
