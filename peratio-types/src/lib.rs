//! Error taxonomy and configuration primitives shared by the peratio crates.
#![warn(missing_docs)]

mod config;
mod connector;
mod error;

pub use config::{EASTMONEY_HISTORY_PE_URL, EastMoneyConfig, HistoryWindow, ValuationMetric};
pub use connector::ConnectorKey;
pub use error::PeRatioError;
