//! # Repository Module
//!
//! Per-user repositories over the [`DocumentStore`](crate::store::DocumentStore).
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Call Flow                                 │
//! │                                                                         │
//! │  Caller                                                                │
//! │       │  db.sales().add(&session, &record)                             │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │       │  session.collection("ventas") → usuarios/{uid}/ventas          │
//! │       ▼                                                                 │
//! │  DocumentStore::add  (exactly one store operation)                     │
//! │       │                                                                 │
//! │       ▼  reads only                                                     │
//! │  Table<SaleRow>  (fixed columns, numeric coercion)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`SaleRepository`] - Record and list sales
//! - [`ClientRepository`] - Upsert, merge-update and list clients
//! - [`TransactionRepository`] - Transactions, collection payments, sale
//!   income, the collections view and the ledger balance
//! - [`ProductRepository`] - Products and keyed (Clave) maintenance

pub mod client;
pub mod product;
pub mod sale;
pub mod transaction;

pub use client::ClientRepository;
pub use product::ProductRepository;
pub use sale::SaleRepository;
pub use transaction::TransactionRepository;
