//! # ledger-core: Pure Types for the Bookkeeping Data Layer
//!
//! This crate holds everything about sales, clients, transactions and
//! products that can be expressed without touching a database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ledger Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Caller (UI layer, external)                     │   │
//! │  │     builds a Session, passes plain records, renders Tables      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 ledger-db (Repositories)                        │   │
//! │  │       one document-store operation per call                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ uses                                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ledger-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ document  │  │   types   │  │  ledger   │  │credentials│  │   │
//! │  │   │ coercion  │  │ Table/Row │  │  balance  │  │  base64   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`document`] - Schema-less documents, field names, numeric coercion
//! - [`types`] - Fixed-column row types and [`Table`]
//! - [`ledger`] - Derived transactions and the income/expense balance
//! - [`session`] - Explicit per-user session handle
//! - [`credentials`] - Service-account credential decoding
//! - [`validation`] - Identifier validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use ledger_core::document::coerce_number;
//! use serde_json::json;
//!
//! assert_eq!(coerce_number(Some(&json!("150.5"))), 150.5);
//! assert_eq!(coerce_number(Some(&json!("n/a"))), 0.0);
//! assert_eq!(coerce_number(None), 0.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod credentials;
pub mod document;
pub mod error;
pub mod ledger;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use credentials::{CredentialSource, ServiceAccountKey};
pub use document::{CollectionPath, Document, StoredDocument};
pub use error::{CredentialError, ValidationError};
pub use ledger::{EntryKind, LedgerBalance};
pub use session::Session;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Top-level collection holding one root document per user.
pub const USERS_COLLECTION: &str = "usuarios";

/// Sales collection, nested under the user's root document.
pub const SALES_COLLECTION: &str = "ventas";

/// Clients collection, nested under the user's root document.
pub const CLIENTS_COLLECTION: &str = "clientes";

/// Transactions collection (collections/"cobranza" live here too).
pub const TRANSACTIONS_COLLECTION: &str = "transacciones";

/// Products collection, nested under the user's root document.
pub const PRODUCTS_COLLECTION: &str = "productos";

/// Category marking a transaction as a collection payment.
pub const CATEGORY_COLLECTION: &str = "Cobranza";

/// Category used for income derived from a sale.
pub const CATEGORY_SALES: &str = "Ventas";
