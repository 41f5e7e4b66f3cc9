//! # Client Repository
//!
//! Clients live in `usuarios/{uid}/clientes` under caller-supplied IDs.
//!
//! ## Write Semantics
//! ```text
//! stored:        { Nombre: "Ana", RFC: "XAXX" }
//!
//! upsert(id, { Nombre: "Ana M." })  →  { Nombre: "Ana M." }            (replace)
//! update(id, { Correo: "a@x.mx" })  →  { Nombre: "Ana", RFC: "XAXX",
//!                                        Correo: "a@x.mx" }            (merge)
//! ```

use ledger_core::validation::validate_document_id;
use ledger_core::{ClientRow, Document, Session, Table, CLIENTS_COLLECTION};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::store::DocumentStore;

/// Repository for client documents.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    store: Arc<dyn DocumentStore>,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        ClientRepository { store }
    }

    /// Writes a client at `id`, replacing any existing document.
    pub async fn upsert(&self, session: &Session, id: &str, client: &Document) -> DbResult<()> {
        validate_document_id(id)?;

        self.store
            .set(&session.collection(CLIENTS_COLLECTION), id, client)
            .await?;

        info!(user_id = %session.user_id(), id = %id, "Client saved");
        Ok(())
    }

    /// Merges `fields` into the client at `id`.
    ///
    /// ## Returns
    /// * `Ok(())` - Fields merged
    /// * `Err(DbError::NotFound)` - No client with that ID
    pub async fn update(&self, session: &Session, id: &str, fields: &Document) -> DbResult<()> {
        validate_document_id(id)?;

        self.store
            .update(&session.collection(CLIENTS_COLLECTION), id, fields)
            .await
            .map_err(|e| match e {
                DbError::NotFound { .. } => DbError::not_found("Client", id),
                other => other,
            })?;

        info!(user_id = %session.user_id(), id = %id, "Client updated");
        Ok(())
    }

    /// Lists all clients. The "ID" column is always the document ID.
    pub async fn list(&self, session: &Session) -> DbResult<Table<ClientRow>> {
        let docs = self
            .store
            .list(&session.collection(CLIENTS_COLLECTION))
            .await?;

        debug!(user_id = %session.user_id(), count = docs.len(), "Read clients");
        Ok(Table::from_documents(&docs))
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

    #[tokio::test]
    async fn test_list_injects_document_id() {
        let db = Database::connect(DbConfig::in_memory()).await.unwrap();
        let session = Session::new("uid-1").unwrap();

        db.clients()
            .upsert(
                &session,
                "cli-001",
                &doc(json!({ "ID": "otro", "Nombre": "Ana", "Límite de crédito": "2500" })),
            )
            .await
            .unwrap();

        let rows = db.clients().list(&session).await.unwrap().into_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "cli-001");
        assert_eq!(rows[0].credit_limit, 2500.0);
        assert_eq!(rows[0].email, None);
    }

    #[tokio::test]
    async fn test_upsert_replaces_and_update_merges() {
        let db = Database::connect(DbConfig::in_memory()).await.unwrap();
        let session = Session::new("uid-1").unwrap();
        let clients = db.clients();

        clients
            .upsert(&session, "c1", &doc(json!({ "Nombre": "Ana", "RFC": "XAXX010101000" })))
            .await
            .unwrap();
        clients
            .upsert(&session, "c1", &doc(json!({ "Nombre": "Ana María" })))
            .await
            .unwrap();
        clients
            .update(&session, "c1", &doc(json!({ "Correo": "ana@example.com" })))
            .await
            .unwrap();

        let rows = clients.list(&session).await.unwrap().into_rows();
        assert_eq!(rows[0].name.as_deref(), Some("Ana María"));
        assert_eq!(rows[0].tax_id, None);
        assert_eq!(rows[0].email.as_deref(), Some("ana@example.com"));
    }

    #[tokio::test]
    async fn test_update_missing_client_fails() {
        let db = Database::connect(DbConfig::in_memory()).await.unwrap();
        let session = Session::new("uid-1").unwrap();

        let err = db
            .clients()
            .update(&session, "nadie", &doc(json!({ "Nombre": "x" })))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Client not found: nadie");
    }

    #[tokio::test]
    async fn test_rejects_path_like_ids() {
        let db = Database::connect(DbConfig::in_memory()).await.unwrap();
        let session = Session::new("uid-1").unwrap();

        let err = db
            .clients()
            .upsert(&session, "../otro", &Document::new())
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
    }
}
