//! # Documents
//!
//! Schema-less documents as they live in the store, plus the read-side
//! helpers that turn stored values into display columns.
//!
//! ## Coercion-to-Zero
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Stored value            coerce_number        field_text               │
//! │  ─────────────────────   ─────────────        ──────────────────────   │
//! │  150.5  (number)         150.5                Some("150.5")            │
//! │  "150.5" (string)        150.5                Some("150.5")            │
//! │  "  42 " (string)        42.0                 Some("  42 ")            │
//! │  "abc"  (string)         0.0                  Some("abc")              │
//! │  true   (bool)           0.0                  Some("true")             │
//! │  null / missing          0.0                  None                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! "Zero" and "invalid" are indistinguishable after coercion. Existing data
//! relies on that, so it is kept.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A schema-less record: field name to JSON value.
pub type Document = Map<String, Value>;

/// Stored field names, shared by the write builders and the row types.
pub mod fields {
    pub const DATE: &str = "Fecha";
    pub const CLIENT: &str = "Cliente";
    pub const PRODUCT: &str = "Producto";
    pub const QUANTITY: &str = "Cantidad";
    pub const UNIT_PRICE: &str = "Precio Unitario";
    pub const TOTAL: &str = "Total";
    pub const CREDIT_AMOUNT: &str = "Monto Crédito";
    pub const CASH_AMOUNT: &str = "Monto Contado";
    pub const ADVANCE_APPLIED: &str = "Anticipo Aplicado";
    pub const PAYMENT_METHOD: &str = "Método de pago";
    pub const SALE_TYPE: &str = "Tipo de venta";

    pub const ID: &str = "ID";
    pub const NAME: &str = "Nombre";
    pub const EMAIL: &str = "Correo";
    pub const PHONE: &str = "Teléfono";
    pub const COMPANY: &str = "Empresa";
    pub const TAX_ID: &str = "RFC";
    pub const CREDIT_LIMIT: &str = "Límite de crédito";

    pub const DESCRIPTION: &str = "Descripción";
    pub const CATEGORY: &str = "Categoría";
    pub const TYPE: &str = "Tipo";
    pub const AMOUNT: &str = "Monto";

    pub const KEY: &str = "Clave";
    pub const UNIT_COST: &str = "Costo Unitario";
}

/// A document together with its store-assigned ID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Document ID (auto-generated or caller-supplied).
    pub id: String,

    /// The stored fields, exactly as written.
    pub fields: Document,
}

impl StoredDocument {
    pub fn new(id: impl Into<String>, fields: Document) -> Self {
        StoredDocument {
            id: id.into(),
            fields,
        }
    }

    /// Returns a field value, if present.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a field rendered as display text. See [`field_text`].
    pub fn text(&self, field: &str) -> Option<String> {
        field_text(self.fields.get(field))
    }

    /// Returns a field coerced to a number. See [`coerce_number`].
    pub fn number(&self, field: &str) -> f64 {
        coerce_number(self.fields.get(field))
    }
}

/// Path to a collection: the parent document path plus the collection name.
///
/// ## Example
/// ```rust
/// use ledger_core::CollectionPath;
///
/// let sales = CollectionPath::new("usuarios/uid-1", "ventas");
/// assert_eq!(sales.to_string(), "usuarios/uid-1/ventas");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionPath {
    parent: String,
    name: String,
}

impl CollectionPath {
    pub fn new(parent: impl Into<String>, name: impl Into<String>) -> Self {
        CollectionPath {
            parent: parent.into(),
            name: name.into(),
        }
    }

    /// Path of the document that owns this collection.
    pub fn parent(&self) -> &str {
        &self.parent
    }

    /// Collection name (e.g., `ventas`).
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.parent, self.name)
    }
}

/// Coerces a stored value to a number.
///
/// JSON numbers pass through. Strings are trimmed and parsed as `f64`.
/// Everything else (missing, null, booleans, arrays, objects, unparsable
/// text, NaN) becomes `0.0`.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(n) if !n.is_nan() => n,
        _ => 0.0,
    }
}

/// Renders a stored value as display text.
///
/// Strings are returned as-is, numbers and booleans via their display form,
/// arrays and objects as compact JSON. Missing and null yield `None`.
pub fn field_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_number_valid_values_pass_through() {
        assert_eq!(coerce_number(Some(&json!(100))), 100.0);
        assert_eq!(coerce_number(Some(&json!(-40.25))), -40.25);
        assert_eq!(coerce_number(Some(&json!("150.5"))), 150.5);
        assert_eq!(coerce_number(Some(&json!(" 7 "))), 7.0);
        assert_eq!(coerce_number(Some(&json!("1e3"))), 1000.0);
    }

    #[test]
    fn test_coerce_number_invalid_values_are_zero() {
        assert_eq!(coerce_number(None), 0.0);
        assert_eq!(coerce_number(Some(&Value::Null)), 0.0);
        assert_eq!(coerce_number(Some(&json!("doce"))), 0.0);
        assert_eq!(coerce_number(Some(&json!(""))), 0.0);
        assert_eq!(coerce_number(Some(&json!("NaN"))), 0.0);
        assert_eq!(coerce_number(Some(&json!(true))), 0.0);
        assert_eq!(coerce_number(Some(&json!([1, 2]))), 0.0);
        assert_eq!(coerce_number(Some(&json!({"v": 1}))), 0.0);
    }

    #[test]
    fn test_field_text() {
        assert_eq!(field_text(Some(&json!("Ana"))), Some("Ana".to_string()));
        assert_eq!(field_text(Some(&json!(12))), Some("12".to_string()));
        assert_eq!(field_text(Some(&json!(false))), Some("false".to_string()));
        assert_eq!(field_text(Some(&json!(["a"]))), Some("[\"a\"]".to_string()));
        assert_eq!(field_text(Some(&Value::Null)), None);
        assert_eq!(field_text(None), None);
    }

    #[test]
    fn test_stored_document_accessors() {
        let mut fields = Document::new();
        fields.insert(fields::TOTAL.to_string(), json!("99.9"));
        fields.insert(fields::CLIENT.to_string(), json!("Ana"));
        let doc = StoredDocument::new("doc-1", fields);

        assert_eq!(doc.number(fields::TOTAL), 99.9);
        assert_eq!(doc.number(fields::QUANTITY), 0.0);
        assert_eq!(doc.text(fields::CLIENT).as_deref(), Some("Ana"));
        assert_eq!(doc.text(fields::DATE), None);
    }
}
