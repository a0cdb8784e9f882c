use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the peratio workspace.
///
/// Transport and data-availability failures abort a fetch. `RecordParse` is
/// produced for a single malformed record and is only ever logged by
/// connectors; it never reaches the caller of a fetch.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PeRatioError {
    /// Network, HTTP status, deadline, or body-decode failure at the provider boundary.
    #[error("{connector} transport failed: {msg}")]
    Transport {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The provider answered successfully but returned nothing usable.
    #[error("no data: {what}")]
    NoData {
        /// Description of the missing data, e.g. "history pe for 600519.SH".
        what: String,
    },

    /// A single record carried a value that is not a finite number.
    #[error("cannot parse value {raw:?} dated {date}: {reason}")]
    RecordParse {
        /// Opaque date token of the offending record.
        date: String,
        /// Raw value as sent by the provider.
        raw: String,
        /// Parser message.
        reason: String,
    },

    /// A median was requested for a series with zero entries.
    #[error("empty series: median is undefined")]
    EmptySeries,

    /// Invalid input argument (security code, configuration value).
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "history_pe").
        capability: String,
    },
}

impl PeRatioError {
    /// Helper: build a `Transport` error with the connector name and message.
    pub fn transport(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Transport {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NoData` error for a description of the missing data.
    pub fn no_data(what: impl Into<String>) -> Self {
        Self::NoData { what: what.into() }
    }

    /// Helper: build a `RecordParse` error for one malformed record.
    pub fn record_parse(
        date: impl Into<String>,
        raw: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::RecordParse {
            date: date.into(),
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Returns true for failures raised at the provider boundary.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns true when the provider had nothing to return.
    #[must_use]
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData { .. })
    }
}
