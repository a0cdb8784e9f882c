//! peratio-core
//!
//! Core types and traits shared across the peratio crates.
//!
//! - `series`: valuation history entries and the ordered series that owns them.
//! - `stats`: order statistics (median) over plain value slices.
//! - `connector`: the `PeConnector` trait and the `HistoryPeProvider` role trait.
//!
//! Connectors are async and runtime-agnostic at this layer; the EastMoney
//! connector uses Tokio for its request deadline.
#![warn(missing_docs)]

/// Connector capability traits and the primary `PeConnector` interface.
pub mod connector;
/// Valuation history entries and series.
pub mod series;
/// Order statistics over value slices.
pub mod stats;

pub use connector::{HistoryPeProvider, PeConnector, median_history_pe};
pub use peratio_types::{
    ConnectorKey, EASTMONEY_HISTORY_PE_URL, EastMoneyConfig, HistoryWindow, PeRatioError,
    ValuationMetric,
};
pub use series::{HistoryPe, HistoryPeSeries};
