//! # ledger-db: Document Store Layer for the Sales Ledger
//!
//! Per-user persistence for sales, clients, transactions and products.
//! Documents are schema-less JSON, stored locally in SQLite through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ledger Data Flow                                 │
//! │                                                                         │
//! │  UI / CLI  (db.transactions().balance(&session))                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     ledger-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  sale/client  │    │  (embedded)  │  │   │
//! │  │   │               │    │  transaction  │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  product      │    │ 001_docs.sql │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │                               │   │
//! │  │                        dyn DocumentStore                       │   │
//! │  │                     (SqliteDocumentStore)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  documents(project, "usuarios/{uid}", "ventas", id, data JSON)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Secrets file, environment and credential resolution
//! - [`pool`] - Database handle and connection configuration
//! - [`store`] - The `DocumentStore` seam and its SQLite implementation
//! - [`repository`] - Per-collection repositories
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledger_core::Session;
//! use ledger_db::{Database, LedgerConfig};
//!
//! let config = LedgerConfig::load()?;
//! let db = Database::connect(config.db).await?;
//!
//! let session = Session::new("uid-123")?;
//! let sale_id = db.sales().add(&session, &sale).await?;
//! db.transactions().register_sale_income(&session, &sale).await?;
//!
//! let balance = db.transactions().balance(&session).await?;
//! db.close().await;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, LedgerConfig, Secrets};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{DocumentStore, SqliteDocumentStore};

// Repository re-exports for convenience
pub use repository::client::ClientRepository;
pub use repository::product::ProductRepository;
pub use repository::sale::SaleRepository;
pub use repository::transaction::TransactionRepository;
