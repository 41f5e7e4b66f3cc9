//! # SQLite Document Store
//!
//! Stores every collection in one `documents` table, with the document body
//! as JSON text.
//!
//! ## Addressing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  usuarios/uid-1/productos/7f3a…                                        │
//! │  └──── parent ───┘└ collection ┘└ id ┘                                 │
//! │                                                                         │
//! │  documents                                                              │
//! │  ┌──────────────┬────────────────┬────────────┬───────┬─────────────┐  │
//! │  │ project      │ parent         │ collection │ id    │ data (JSON) │  │
//! │  ├──────────────┼────────────────┼────────────┼───────┼─────────────┤  │
//! │  │ libro-ventas │ usuarios/uid-1 │ productos  │ 7f3a… │ {"Clave":…} │  │
//! │  └──────────────┴────────────────┴────────────┴───────┴─────────────┘  │
//! │                                                                         │
//! │  project comes from the service-account credential, so two projects    │
//! │  can share a database file without seeing each other's documents.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Equality Filters
//! `find_eq(col, "Clave", "X-1")` compiles to
//! `json_type(data, '$."Clave"') = 'text' AND json_extract(data, '$."Clave"') = 'X-1'`.
//! The type check keeps `"5"` from matching `5`, like a typed document query.

use async_trait::async_trait;
use chrono::Utc;
use ledger_core::{CollectionPath, Document, StoredDocument};
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::store::DocumentStore;

/// SQLite-backed [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
    project: String,
}

impl SqliteDocumentStore {
    /// Creates a store over `pool`, scoped to `project`.
    pub fn new(pool: SqlitePool, project: impl Into<String>) -> Self {
        SqliteDocumentStore {
            pool,
            project: project.into(),
        }
    }

    /// The project every document is scoped to.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Counts documents in a collection (for diagnostics).
    pub async fn count(&self, collection: &CollectionPath) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM documents WHERE project = ?1 AND parent = ?2 AND collection = ?3",
        )
        .bind(&self.project)
        .bind(collection.parent())
        .bind(collection.name())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

/// Builds a JSON path selecting one top-level field.
fn json_path(field: &str) -> DbResult<String> {
    if field.is_empty() {
        return Err(DbError::InvalidQuery("field name is empty".to_string()));
    }
    if field.contains('"') {
        return Err(DbError::InvalidQuery(format!(
            "field name '{}' contains a double quote",
            field
        )));
    }
    Ok(format!("$.\"{}\"", field))
}

fn decode_rows(rows: Vec<(String, String)>) -> DbResult<Vec<StoredDocument>> {
    rows.into_iter()
        .map(|(id, data)| {
            let fields: Document = serde_json::from_str(&data)?;
            Ok(StoredDocument::new(id, fields))
        })
        .collect()
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn add(&self, collection: &CollectionPath, fields: &Document) -> DbResult<String> {
        let id = Uuid::new_v4().simple().to_string();
        let data = serde_json::to_string(fields)?;
        let now = Utc::now().to_rfc3339();

        debug!(collection = %collection, id = %id, "Adding document");

        sqlx::query(
            r#"
            INSERT INTO documents (project, parent, collection, id, data, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
        )
        .bind(&self.project)
        .bind(collection.parent())
        .bind(collection.name())
        .bind(&id)
        .bind(&data)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn set(&self, collection: &CollectionPath, id: &str, fields: &Document) -> DbResult<()> {
        let data = serde_json::to_string(fields)?;
        let now = Utc::now().to_rfc3339();

        debug!(collection = %collection, id = %id, "Setting document");

        // ON CONFLICT keeps the original rowid, so the document keeps its
        // place in store order.
        sqlx::query(
            r#"
            INSERT INTO documents (project, parent, collection, id, data, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            ON CONFLICT (project, parent, collection, id) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&self.project)
        .bind(collection.parent())
        .bind(collection.name())
        .bind(id)
        .bind(&data)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(
        &self,
        collection: &CollectionPath,
        id: &str,
        fields: &Document,
    ) -> DbResult<()> {
        debug!(collection = %collection, id = %id, fields = fields.len(), "Merging document");

        let mut tx = self.pool.begin().await?;

        let current: Option<String> = sqlx::query_scalar(
            r#"
            SELECT data FROM documents
            WHERE project = ?1 AND parent = ?2 AND collection = ?3 AND id = ?4
            "#,
        )
        .bind(&self.project)
        .bind(collection.parent())
        .bind(collection.name())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(current) = current else {
            return Err(DbError::not_found(collection.to_string(), id));
        };

        let mut merged: Document = serde_json::from_str(&current)?;
        for (field, value) in fields {
            merged.insert(field.clone(), value.clone());
        }
        let data = serde_json::to_string(&merged)?;

        sqlx::query(
            r#"
            UPDATE documents SET data = ?5, updated_at = ?6
            WHERE project = ?1 AND parent = ?2 AND collection = ?3 AND id = ?4
            "#,
        )
        .bind(&self.project)
        .bind(collection.parent())
        .bind(collection.name())
        .bind(id)
        .bind(&data)
        .bind(Utc::now().to_rfc3339())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, collection: &CollectionPath, id: &str) -> DbResult<bool> {
        debug!(collection = %collection, id = %id, "Deleting document");

        let result = sqlx::query(
            r#"
            DELETE FROM documents
            WHERE project = ?1 AND parent = ?2 AND collection = ?3 AND id = ?4
            "#,
        )
        .bind(&self.project)
        .bind(collection.parent())
        .bind(collection.name())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get(
        &self,
        collection: &CollectionPath,
        id: &str,
    ) -> DbResult<Option<StoredDocument>> {
        let data: Option<String> = sqlx::query_scalar(
            r#"
            SELECT data FROM documents
            WHERE project = ?1 AND parent = ?2 AND collection = ?3 AND id = ?4
            "#,
        )
        .bind(&self.project)
        .bind(collection.parent())
        .bind(collection.name())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match data {
            Some(data) => {
                let fields: Document = serde_json::from_str(&data)?;
                Ok(Some(StoredDocument::new(id, fields)))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, collection: &CollectionPath) -> DbResult<Vec<StoredDocument>> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            r#"
            SELECT id, data FROM documents
            WHERE project = ?1 AND parent = ?2 AND collection = ?3
            ORDER BY rowid
            "#,
        )
        .bind(&self.project)
        .bind(collection.parent())
        .bind(collection.name())
        .fetch_all(&self.pool)
        .await?;

        debug!(collection = %collection, count = rows.len(), "Listed documents");
        decode_rows(rows)
    }

    async fn find_eq(
        &self,
        collection: &CollectionPath,
        field: &str,
        value: &Value,
    ) -> DbResult<Vec<StoredDocument>> {
        let path = json_path(field)?;

        let condition = match value {
            Value::Null => "json_type(data, ?4) = 'null'",
            Value::Bool(_) => "json_type(data, ?4) = ?5",
            Value::Number(_) => {
                "json_type(data, ?4) IN ('integer', 'real') AND json_extract(data, ?4) = ?5"
            }
            Value::String(_) => "json_type(data, ?4) = 'text' AND json_extract(data, ?4) = ?5",
            Value::Array(_) | Value::Object(_) => {
                return Err(DbError::InvalidQuery(format!(
                    "equality filter on '{}' needs a scalar value",
                    field
                )));
            }
        };

        let sql = format!(
            "SELECT id, data FROM documents \
             WHERE project = ?1 AND parent = ?2 AND collection = ?3 AND {} \
             ORDER BY rowid",
            condition
        );

        let query = sqlx::query_as::<_, (String, String)>(&sql)
            .bind(&self.project)
            .bind(collection.parent())
            .bind(collection.name())
            .bind(&path);

        let query = match value {
            Value::Bool(true) => query.bind("true"),
            Value::Bool(false) => query.bind("false"),
            Value::Number(n) => query.bind(n.as_f64()),
            Value::String(s) => query.bind(s.as_str()),
            _ => query,
        };

        let rows = query.fetch_all(&self.pool).await?;

        debug!(
            collection = %collection,
            field = %field,
            count = rows.len(),
            "Equality query returned documents"
        );
        decode_rows(rows)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use serde_json::json;

    async fn store() -> SqliteDocumentStore {
        let db = Database::connect(DbConfig::in_memory()).await.unwrap();
        SqliteDocumentStore::new(db.pool().clone(), "test-project")
    }

    fn doc(value: Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    fn col(name: &str) -> CollectionPath {
        CollectionPath::new("usuarios/u1", name)
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let store = store().await;
        let id = store
            .add(&col("ventas"), &doc(json!({ "Total": 10 })))
            .await
            .unwrap();

        let found = store.get(&col("ventas"), &id).await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.fields["Total"], json!(10));
        assert_eq!(id.len(), 32);
    }

    #[tokio::test]
    async fn test_set_replaces_whole_document() {
        let store = store().await;
        let c = col("clientes");
        store
            .set(&c, "cli-1", &doc(json!({ "Nombre": "Ana", "RFC": "XAXX" })))
            .await
            .unwrap();
        store
            .set(&c, "cli-1", &doc(json!({ "Nombre": "Ana María" })))
            .await
            .unwrap();

        let found = store.get(&c, "cli-1").await.unwrap().unwrap();
        assert_eq!(found.fields.len(), 1);
        assert_eq!(found.fields["Nombre"], json!("Ana María"));
    }

    #[tokio::test]
    async fn test_update_merges_and_requires_existing() {
        let store = store().await;
        let c = col("clientes");
        store
            .set(&c, "cli-1", &doc(json!({ "Nombre": "Ana", "RFC": "XAXX" })))
            .await
            .unwrap();
        store
            .update(&c, "cli-1", &doc(json!({ "Correo": "ana@example.com", "Nombre": null })))
            .await
            .unwrap();

        let found = store.get(&c, "cli-1").await.unwrap().unwrap();
        assert_eq!(found.fields["RFC"], json!("XAXX"));
        assert_eq!(found.fields["Correo"], json!("ana@example.com"));
        assert_eq!(found.fields["Nombre"], Value::Null);

        let err = store
            .update(&c, "missing", &doc(json!({ "Nombre": "x" })))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let store = store().await;
        let c = col("productos");
        let id = store.add(&c, &doc(json!({ "Clave": "A" }))).await.unwrap();

        assert!(store.delete(&c, &id).await.unwrap());
        assert!(!store.delete(&c, &id).await.unwrap());
        assert!(store.get(&c, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_eq_is_type_strict_and_ordered() {
        let store = store().await;
        let c = col("productos");
        let first = store
            .add(&c, &doc(json!({ "Clave": "X", "Nombre": "uno" })))
            .await
            .unwrap();
        store.add(&c, &doc(json!({ "Clave": 5 }))).await.unwrap();
        let second = store
            .add(&c, &doc(json!({ "Clave": "X", "Nombre": "dos" })))
            .await
            .unwrap();
        store.add(&c, &doc(json!({ "Clave": "5" }))).await.unwrap();

        let found = store.find_eq(&c, "Clave", &json!("X")).await.unwrap();
        let ids: Vec<_> = found.iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids, vec![first, second]);

        assert_eq!(store.find_eq(&c, "Clave", &json!(5)).await.unwrap().len(), 1);
        assert_eq!(store.find_eq(&c, "Clave", &json!(5.0)).await.unwrap().len(), 1);
        assert_eq!(store.find_eq(&c, "Clave", &json!("5")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_eq_handles_accented_field_names() {
        let store = store().await;
        let c = col("transacciones");
        store
            .add(&c, &doc(json!({ "Categoría": "Cobranza" })))
            .await
            .unwrap();
        store
            .add(&c, &doc(json!({ "Categoría": "Ventas" })))
            .await
            .unwrap();

        let found = store
            .find_eq(&c, "Categoría", &json!("Cobranza"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_find_eq_rejects_unsupported_filters() {
        let store = store().await;
        let c = col("productos");

        assert!(matches!(
            store.find_eq(&c, "bad\"field", &json!("x")).await,
            Err(DbError::InvalidQuery(_))
        ));
        assert!(matches!(
            store.find_eq(&c, "Clave", &json!(["x"])).await,
            Err(DbError::InvalidQuery(_))
        ));
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = store().await;
        let mine = CollectionPath::new("usuarios/u1", "ventas");
        let theirs = CollectionPath::new("usuarios/u2", "ventas");
        store.add(&mine, &doc(json!({ "Total": 1 }))).await.unwrap();

        assert_eq!(store.list(&mine).await.unwrap().len(), 1);
        assert!(store.list(&theirs).await.unwrap().is_empty());
        assert_eq!(store.count(&mine).await.unwrap(), 1);

        let other_project = SqliteDocumentStore::new(store.pool.clone(), "other");
        assert!(other_project.list(&mine).await.unwrap().is_empty());
    }
}
