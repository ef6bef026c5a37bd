//! # Ledger Database Crate
//!
//! This crate is the read-only gateway to the trade ledger, a single SQLite
//! table of trade records. It is the "query facade" every metric goes through.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** This crate encapsulates all database-specific logic. It
//!   provides a small, abstract API to the rest of the application, hiding
//!   the underlying SQL and database implementation details.
//! - **Closed table set:** The ledger table comes from the `LedgerTable`
//!   allow-list in the configuration. Every value that originates from a
//!   request is bound through a placeholder.
//! - **Asynchronous & Pooled:** All operations are asynchronous and stateless
//!   reads over a connection pool (`SqlitePool`). Nothing is cached.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the ledger connection pool.
//! - `LedgerRepository`: Holds the pool and the resolved table, and provides the
//!   aggregate queries (`distinct_strategies`, `total_quantity`, `signed_cash_flow`).
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use repository::LedgerRepository;
