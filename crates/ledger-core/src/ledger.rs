//! # Ledger Rules
//!
//! Builders for derived transactions and the income/expense balance.
//!
//! ## Derived Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  collection_payment(client, amount, method, date, description?)         │
//! │      └── { Categoría: "Cobranza", Tipo: "Ingreso", ... }               │
//! │                                                                         │
//! │  sale_income(sale, today)                                               │
//! │      └── { Categoría: "Ventas",   Tipo: "Ingreso", Monto: Total }      │
//! │                                                                         │
//! │  Both validate their amount: a write never turns bad input into 0.0.   │
//! │                                                                         │
//! │  Neither is triggered by recording a sale. Callers invoke them         │
//! │  explicitly through the transaction repository.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{field_text, fields, Document};
use crate::error::ValidationError;
use crate::types::TransactionRow;
use crate::{CATEGORY_COLLECTION, CATEGORY_SALES};

/// Client name used when a sale has none.
pub const UNKNOWN_CLIENT: &str = "Cliente desconocido";

// =============================================================================
// Entry Kind
// =============================================================================

/// Direction of a transaction, stored in the "Tipo" field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    #[serde(rename = "Ingreso")]
    Income,
    #[serde(rename = "Egreso")]
    Expense,
}

impl EntryKind {
    /// The stored label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Income => "Ingreso",
            EntryKind::Expense => "Egreso",
        }
    }

    /// Parses a stored label. Matching is exact: "ingreso" is not income.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Ingreso" => Some(EntryKind::Income),
            "Egreso" => Some(EntryKind::Expense),
            _ => None,
        }
    }
}

// =============================================================================
// Balance
// =============================================================================

/// Totals over all transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerBalance {
    /// Sum of amounts where Tipo == "Ingreso".
    pub income: f64,

    /// Sum of amounts where Tipo == "Egreso".
    pub expense: f64,

    /// `income - expense`.
    pub net: f64,
}

impl LedgerBalance {
    /// Sums transaction rows. Rows with any other Tipo are skipped.
    ///
    /// ## Example
    /// ```rust
    /// use ledger_core::{LedgerBalance, TransactionRow};
    ///
    /// let row = |kind: &str, amount: f64| TransactionRow {
    ///     date: None,
    ///     description: None,
    ///     category: None,
    ///     kind: Some(kind.to_string()),
    ///     amount,
    ///     client: None,
    ///     payment_method: None,
    /// };
    /// let rows = [row("Ingreso", 100.0), row("Egreso", 40.0), row("Other", 999.0)];
    ///
    /// let balance = LedgerBalance::from_rows(&rows);
    /// assert_eq!((balance.income, balance.expense, balance.net), (100.0, 40.0, 60.0));
    /// ```
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a TransactionRow>) -> Self {
        let (income, expense) = rows.into_iter().fold((0.0, 0.0), |(inc, exp), row| {
            match row.kind.as_deref().and_then(EntryKind::from_label) {
                Some(EntryKind::Income) => (inc + row.amount, exp),
                Some(EntryKind::Expense) => (inc, exp + row.amount),
                None => (inc, exp),
            }
        });

        LedgerBalance {
            income,
            expense,
            net: income - expense,
        }
    }
}

// =============================================================================
// Derived Transactions
// =============================================================================

/// Builds the transaction recorded for a collection payment.
///
/// An absent or empty description defaults to a note naming the client.
///
/// ## Errors
/// `InvalidFormat` on "Monto" when `amount` is NaN or infinite. JSON has no
/// such numbers, so they would be stored as null.
pub fn collection_payment(
    client: &str,
    amount: f64,
    payment_method: &str,
    date: &str,
    description: Option<&str>,
) -> Result<Document, ValidationError> {
    if !amount.is_finite() {
        return Err(invalid_amount(fields::AMOUNT, amount.to_string()));
    }

    let description = match description {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => format!("Abono de crédito por parte de {}", client),
    };

    let mut doc = Document::new();
    doc.insert(fields::DATE.to_string(), Value::from(date));
    doc.insert(fields::DESCRIPTION.to_string(), Value::from(description));
    doc.insert(fields::CATEGORY.to_string(), Value::from(CATEGORY_COLLECTION));
    doc.insert(fields::TYPE.to_string(), Value::from(EntryKind::Income.as_str()));
    doc.insert(fields::AMOUNT.to_string(), Value::from(amount));
    doc.insert(fields::CLIENT.to_string(), Value::from(client));
    doc.insert(fields::PAYMENT_METHOD.to_string(), Value::from(payment_method));
    Ok(doc)
}

/// Builds the income transaction derived from a sale record.
///
/// - Fecha: the sale's date as stored (an explicit null stays null), or
///   `today` as `YYYY-MM-DD` when the field is absent
/// - Descripción: `"Venta a {Cliente}"`
/// - Monto: the sale's Total; `0.0` when the field is absent
///
/// ## Errors
/// `InvalidFormat` on "Total" when it is present but not a finite number or
/// numeric text (null, booleans, `"ciento cincuenta"`, ...). Unlike reads,
/// this write does not coerce to zero.
pub fn sale_income(sale: &Document, today: NaiveDate) -> Result<Document, ValidationError> {
    let amount = match sale.get(fields::TOTAL) {
        None => 0.0,
        Some(value) => parse_amount(value)
            .ok_or_else(|| invalid_amount(fields::TOTAL, value.to_string()))?,
    };
    let date = match sale.get(fields::DATE) {
        Some(value) => value.clone(),
        None => Value::from(today.format("%Y-%m-%d").to_string()),
    };
    let client =
        field_text(sale.get(fields::CLIENT)).unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

    let mut doc = Document::new();
    doc.insert(fields::DATE.to_string(), date);
    doc.insert(
        fields::DESCRIPTION.to_string(),
        Value::from(format!("Venta a {}", client)),
    );
    doc.insert(fields::CATEGORY.to_string(), Value::from(CATEGORY_SALES));
    doc.insert(fields::TYPE.to_string(), Value::from(EntryKind::Income.as_str()));
    doc.insert(fields::AMOUNT.to_string(), Value::from(amount));
    Ok(doc)
}

/// Strict number for writes: JSON numbers and trimmed numeric text only.
fn parse_amount(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}

fn invalid_amount(field: &str, got: String) -> ValidationError {
    ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("expected a finite number, got {}", got),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
