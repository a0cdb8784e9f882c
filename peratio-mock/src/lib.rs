//! Mock connectors for tests of code built on top of `peratio-core`.
#![warn(missing_docs)]

use async_trait::async_trait;
use peratio_core::connector::{HistoryPeProvider, PeConnector};
use peratio_core::{HistoryPeSeries, PeRatioError};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

/// Mock connector serving deterministic PE histories from static fixtures.
///
/// Special codes: `FAIL` fails with a transport error, `TIMEOUT` answers after
/// 200ms, `SKIPPED` returns an empty series. Unknown codes yield `NoData`.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Create the mock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_timeout(code: &str) -> Result<(), PeRatioError> {
        match code {
            "FAIL" => Err(PeRatioError::transport(
                "peratio-mock",
                "forced failure: history_pe",
            )),
            "TIMEOUT" => {
                // Slow enough to trip a short caller-side deadline.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

impl PeConnector for MockConnector {
    fn name(&self) -> &'static str {
        "peratio-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_history_pe_provider(&self) -> Option<&dyn HistoryPeProvider> {
        Some(self as &dyn HistoryPeProvider)
    }
}

#[async_trait]
impl HistoryPeProvider for MockConnector {
    async fn history_pe(&self, security_code: &str) -> Result<HistoryPeSeries, PeRatioError> {
        Self::maybe_fail_or_timeout(security_code).await?;
        fixtures::history_pe::by_code(security_code)
            .ok_or_else(|| PeRatioError::no_data(format!("history pe for {security_code}")))
    }
}
