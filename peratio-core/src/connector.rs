use async_trait::async_trait;

use crate::{HistoryPeSeries, PeRatioError};
pub use peratio_types::ConnectorKey;

/// Focused role trait for connectors that provide valuation (PE) history.
#[async_trait]
pub trait HistoryPeProvider: Send + Sync {
    /// Fetch the PE history for `security_code` (e.g. `600519.SH`).
    ///
    /// Records the provider sends with an unparseable value are skipped, so an
    /// empty series is a valid result. Dropping the returned future aborts the
    /// in-flight request.
    ///
    /// # Errors
    /// - `InvalidArg` when the code cannot be mapped to the provider's convention.
    /// - `Transport` for network, status, deadline, or decode failures.
    /// - `NoData` when the provider returns no history groups at all.
    async fn history_pe(&self, security_code: &str) -> Result<HistoryPeSeries, PeRatioError>;
}

/// Primary connector interface.
///
/// Capabilities are advertised through `as_*_provider` accessors that return a
/// trait object when supported.
pub trait PeConnector: Send + Sync {
    /// A stable identifier (e.g. "peratio-eastmoney").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise PE history capability.
    fn as_history_pe_provider(&self) -> Option<&dyn HistoryPeProvider> {
        None
    }
}

/// Fetch the PE history through `connector` and reduce it to its median.
///
/// # Errors
/// `Unsupported` when the connector has no PE history capability, any error of
/// [`HistoryPeProvider::history_pe`], or `EmptySeries` when every record was
/// skipped.
pub async fn median_history_pe(
    connector: &dyn PeConnector,
    security_code: &str,
) -> Result<f64, PeRatioError> {
    let provider = connector
        .as_history_pe_provider()
        .ok_or_else(|| PeRatioError::unsupported("history_pe"))?;
    let series = provider.history_pe(security_code).await?;
    series.median()
}
