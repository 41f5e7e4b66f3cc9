//! # Tabular Views
//!
//! Fixed-column row types returned by every read operation.
//!
//! ## Read-Side Columns
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stored document (any shape)                          │
//! │   { "Cliente": "Ana", "Total": "150.5", "Extra": 1 }                    │
//! │                              │                                          │
//! │                              ▼  TableRow::from_document                 │
//! │   ┌─────────┬─────────┬──────────┬──────────┬───────┬─────┐            │
//! │   │ Fecha   │ Cliente │ Producto │ Cantidad │ Total │ ... │            │
//! │   ├─────────┼─────────┼──────────┼──────────┼───────┼─────┤            │
//! │   │ None    │ "Ana"   │ None     │ 0.0      │ 150.5 │ ... │            │
//! │   └─────────┴─────────┴──────────┴──────────┴───────┴─────┘            │
//! │                                                                         │
//! │  Columns are defined here, not by what happens to be stored, so        │
//! │  partial or legacy documents always produce the same table shape.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows serialize with the stored (Spanish) column names.

use serde::{Deserialize, Serialize};

use crate::document::{fields, StoredDocument};

// =============================================================================
// Table
// =============================================================================

/// A row type with a fixed set of columns.
pub trait TableRow: Sized {
    /// Column names, in display order.
    const COLUMNS: &'static [&'static str];

    /// Builds a row from a stored document, filling defaults.
    fn from_document(doc: &StoredDocument) -> Self;
}

/// A fixed-column table of rows.
///
/// An empty table still reports its columns.
///
/// ## Example
/// ```rust
/// use ledger_core::{SaleRow, Table};
///
/// let table: Table<SaleRow> = Table::from_documents(&[]);
/// assert_eq!(table.columns().len(), 11);
/// assert!(table.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table<R> {
    rows: Vec<R>,
}

impl<R: TableRow> Table<R> {
    /// Materializes a table from stored documents, in store order.
    pub fn from_documents(docs: &[StoredDocument]) -> Self {
        Table {
            rows: docs.iter().map(R::from_document).collect(),
        }
    }

    /// Column names, independent of the rows.
    pub fn columns(&self) -> &'static [&'static str] {
        R::COLUMNS
    }
}

impl<R> Table<R> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Table { rows: Vec::new() }
    }
}

impl<R> IntoIterator for Table<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One row of the sales table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRow {
    #[serde(rename = "Fecha")]
    pub date: Option<String>,

    #[serde(rename = "Cliente")]
    pub client: Option<String>,

    #[serde(rename = "Producto")]
    pub product: Option<String>,

    #[serde(rename = "Cantidad")]
    pub quantity: f64,

    #[serde(rename = "Precio Unitario")]
    pub unit_price: f64,

    #[serde(rename = "Total")]
    pub total: f64,

    /// Portion of the sale sold on credit.
    #[serde(rename = "Monto Crédito")]
    pub credit_amount: f64,

    /// Portion of the sale paid in cash.
    #[serde(rename = "Monto Contado")]
    pub cash_amount: f64,

    /// Prior advance payment applied to this sale.
    #[serde(rename = "Anticipo Aplicado")]
    pub advance_applied: f64,

    #[serde(rename = "Método de pago")]
    pub payment_method: Option<String>,

    #[serde(rename = "Tipo de venta")]
    pub sale_type: Option<String>,
}

impl TableRow for SaleRow {
    const COLUMNS: &'static [&'static str] = &[
        fields::DATE,
        fields::CLIENT,
        fields::PRODUCT,
        fields::QUANTITY,
        fields::UNIT_PRICE,
        fields::TOTAL,
        fields::CREDIT_AMOUNT,
        fields::CASH_AMOUNT,
        fields::ADVANCE_APPLIED,
        fields::PAYMENT_METHOD,
        fields::SALE_TYPE,
    ];

    fn from_document(doc: &StoredDocument) -> Self {
        SaleRow {
            date: doc.text(fields::DATE),
            client: doc.text(fields::CLIENT),
            product: doc.text(fields::PRODUCT),
            quantity: doc.number(fields::QUANTITY),
            unit_price: doc.number(fields::UNIT_PRICE),
            total: doc.number(fields::TOTAL),
            credit_amount: doc.number(fields::CREDIT_AMOUNT),
            cash_amount: doc.number(fields::CASH_AMOUNT),
            advance_applied: doc.number(fields::ADVANCE_APPLIED),
            payment_method: doc.text(fields::PAYMENT_METHOD),
            sale_type: doc.text(fields::SALE_TYPE),
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// One row of the clients table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRow {
    /// Always the store document ID, never a stored "ID" field.
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Nombre")]
    pub name: Option<String>,

    #[serde(rename = "Correo")]
    pub email: Option<String>,

    #[serde(rename = "Teléfono")]
    pub phone: Option<String>,

    #[serde(rename = "Empresa")]
    pub company: Option<String>,

    /// Tax ID (RFC).
    #[serde(rename = "RFC")]
    pub tax_id: Option<String>,

    #[serde(rename = "Límite de crédito")]
    pub credit_limit: f64,
}

impl TableRow for ClientRow {
    const COLUMNS: &'static [&'static str] = &[
        fields::ID,
        fields::NAME,
        fields::EMAIL,
        fields::PHONE,
        fields::COMPANY,
        fields::TAX_ID,
        fields::CREDIT_LIMIT,
    ];

    fn from_document(doc: &StoredDocument) -> Self {
        ClientRow {
            id: doc.id.clone(),
            name: doc.text(fields::NAME),
            email: doc.text(fields::EMAIL),
            phone: doc.text(fields::PHONE),
            company: doc.text(fields::COMPANY),
            tax_id: doc.text(fields::TAX_ID),
            credit_limit: doc.number(fields::CREDIT_LIMIT),
        }
    }
}

// =============================================================================
// Transaction
// =============================================================================

/// One row of the transactions table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    #[serde(rename = "Fecha")]
    pub date: Option<String>,

    #[serde(rename = "Descripción")]
    pub description: Option<String>,

    #[serde(rename = "Categoría")]
    pub category: Option<String>,

    /// "Ingreso" or "Egreso"; anything else is kept but ignored by the balance.
    #[serde(rename = "Tipo")]
    pub kind: Option<String>,

    #[serde(rename = "Monto")]
    pub amount: f64,

    #[serde(rename = "Cliente")]
    pub client: Option<String>,

    #[serde(rename = "Método de pago")]
    pub payment_method: Option<String>,
}

impl TableRow for TransactionRow {
    const COLUMNS: &'static [&'static str] = &[
        fields::DATE,
        fields::DESCRIPTION,
        fields::CATEGORY,
        fields::TYPE,
        fields::AMOUNT,
        fields::CLIENT,
        fields::PAYMENT_METHOD,
    ];

    fn from_document(doc: &StoredDocument) -> Self {
        TransactionRow {
            date: doc.text(fields::DATE),
            description: doc.text(fields::DESCRIPTION),
            category: doc.text(fields::CATEGORY),
            kind: doc.text(fields::TYPE),
            amount: doc.number(fields::AMOUNT),
            client: doc.text(fields::CLIENT),
            payment_method: doc.text(fields::PAYMENT_METHOD),
        }
    }
}

// =============================================================================
// Collection ("cobranza")
// =============================================================================

/// One row of the collections view: a transaction in the "Cobranza" category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionRow {
    #[serde(rename = "Fecha")]
    pub date: Option<String>,

    #[serde(rename = "Cliente")]
    pub client: Option<String>,

    #[serde(rename = "Descripción")]
    pub description: Option<String>,

    #[serde(rename = "Monto")]
    pub amount: f64,

    #[serde(rename = "Método de pago")]
    pub payment_method: Option<String>,
}

impl TableRow for CollectionRow {
    const COLUMNS: &'static [&'static str] = &[
        fields::DATE,
        fields::CLIENT,
        fields::DESCRIPTION,
        fields::AMOUNT,
        fields::PAYMENT_METHOD,
    ];

    fn from_document(doc: &StoredDocument) -> Self {
        CollectionRow {
            date: doc.text(fields::DATE),
            client: doc.text(fields::CLIENT),
            description: doc.text(fields::DESCRIPTION),
            amount: doc.number(fields::AMOUNT),
            payment_method: doc.text(fields::PAYMENT_METHOD),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// One row of the products table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    /// Business code ("Clave"); not the document ID.
    #[serde(rename = "Clave")]
    pub key: Option<String>,

    #[serde(rename = "Nombre")]
    pub name: Option<String>,

    #[serde(rename = "Categoría")]
    pub category: Option<String>,

    #[serde(rename = "Precio Unitario")]
    pub unit_price: f64,

    #[serde(rename = "Costo Unitario")]
    pub unit_cost: f64,

    #[serde(rename = "Cantidad")]
    pub quantity: f64,

    #[serde(rename = "Descripción")]
    pub description: Option<String>,
}

impl TableRow for ProductRow {
    const COLUMNS: &'static [&'static str] = &[
        fields::KEY,
        fields::NAME,
        fields::CATEGORY,
        fields::UNIT_PRICE,
        fields::UNIT_COST,
        fields::QUANTITY,
        fields::DESCRIPTION,
    ];

    fn from_document(doc: &StoredDocument) -> Self {
        ProductRow {
            key: doc.text(fields::KEY),
            name: doc.text(fields::NAME),
            category: doc.text(fields::CATEGORY),
            unit_price: doc.number(fields::UNIT_PRICE),
            unit_cost: doc.number(fields::UNIT_COST),
            quantity: doc.number(fields::QUANTITY),
            description: doc.text(fields::DESCRIPTION),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use serde_json::json;

    fn doc(id: &str, value: serde_json::Value) -> StoredDocument {
        let fields: Document = match value {
            serde_json::Value::Object(map) => map,
            _ => Document::new(),
        };
        StoredDocument::new(id, fields)
    }

    #[test]
    fn test_column_counts() {
        assert_eq!(SaleRow::COLUMNS.len(), 11);
        assert_eq!(ClientRow::COLUMNS.len(), 7);
        assert_eq!(TransactionRow::COLUMNS.len(), 7);
        assert_eq!(CollectionRow::COLUMNS.len(), 5);
        assert_eq!(ProductRow::COLUMNS.len(), 7);
    }

    #[test]
    fn test_empty_table_keeps_columns() {
        let table: Table<SaleRow> = Table::from_documents(&[]);
        assert_eq!(table.len(), 0);
        assert_eq!(table.columns(), SaleRow::COLUMNS);
    }

    #[test]
    fn test_sale_row_fills_defaults() {
        let row = SaleRow::from_document(&doc(
            "s1",
            json!({ "Cliente": "Ana", "Total": "150.5", "Cantidad": "dos", "Extra": 1 }),
        ));

        assert_eq!(row.client.as_deref(), Some("Ana"));
        assert_eq!(row.total, 150.5);
        assert_eq!(row.quantity, 0.0);
        assert_eq!(row.credit_amount, 0.0);
        assert_eq!(row.date, None);
    }

    #[test]
    fn test_client_row_uses_document_id() {
        let row = ClientRow::from_document(&doc(
            "cli-7",
            json!({ "ID": "stale", "Nombre": "Ana", "Límite de crédito": "5000" }),
        ));

        assert_eq!(row.id, "cli-7");
        assert_eq!(row.credit_limit, 5000.0);
    }

    #[test]
    fn test_rows_serialize_with_stored_names() {
        let row = ProductRow::from_document(&doc("p1", json!({ "Clave": "X-1" })));
        let value = serde_json::to_value(&row).unwrap();

        assert_eq!(value["Clave"], json!("X-1"));
        assert_eq!(value["Costo Unitario"], json!(0.0));
        assert_eq!(value.as_object().unwrap().len(), ProductRow::COLUMNS.len());
    }
}
