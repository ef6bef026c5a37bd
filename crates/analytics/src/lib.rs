//! # Trading Metrics Engine
//!
//! This crate computes the reported trading metrics from the trade ledger:
//! total buy volume, total sell volume and per-strategy profit-and-loss.
//!
//! ## Architectural Principles
//!
//! - **Stateless Calculation:** The `MetricsEngine` keeps no state between
//!   calls. Every metric is a fresh aggregate over the ledger, so repeated calls
//!   against an unchanged ledger return identical values.
//! - **Validate, then compute:** A PnL lookup first checks the strategy against
//!   the ledger's distinct strategies. An unknown strategy is an error carrying
//!   the valid identifiers, never a zero.
//!
//! ## Public API
//!
//! - `MetricsEngine`: The main struct that contains the metric operations.
//! - `PnlReport` / `VolumeReport`: A metric value together with its unit tag.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::MetricsEngine;
pub use error::AnalyticsError;
pub use report::{PnlReport, VolumeReport};
