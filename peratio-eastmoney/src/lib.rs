//! peratio-eastmoney
//!
//! Connector that implements `PeConnector` on top of the EastMoney F10
//! valuation-analysis endpoint. Exposes the historical PE series of an A-share.
#![warn(missing_docs)]

/// Transport definitions and the production adapter backed by `reqwest`.
pub mod adapter;
/// Builder for configuring an [`EmConnector`].
pub mod builder;
/// Security code translation into the provider's convention.
pub mod code;
/// Response wire format.
pub mod wire;

use std::sync::Arc;

use adapter::{EmTransport, RealAdapter};
use async_trait::async_trait;
use peratio_core::{
    EastMoneyConfig, HistoryPeSeries, PeRatioError,
    connector::{ConnectorKey, HistoryPeProvider, PeConnector},
};
use wire::{PRIMARY_GROUP, RawHistoryPe};

pub use builder::EmConnectorBuilder;

/// Public connector type. Production users construct it with `EmConnector::builder()`.
pub struct EmConnector {
    transport: Arc<dyn EmTransport>,
    cfg: EastMoneyConfig,
}

impl EmConnector {
    /// Static connector key.
    pub const KEY: ConnectorKey = ConnectorKey::new("peratio-eastmoney");

    /// Build with a fresh `reqwest` client and the default configuration.
    ///
    /// # Errors
    /// Returns `Transport` if the HTTP client cannot be constructed.
    pub fn try_new_default() -> Result<Self, PeRatioError> {
        let a = RealAdapter::try_new_default()?;
        Ok(Self::from_adapter(Arc::new(a)))
    }

    /// Build from a provided `reqwest::Client`.
    #[must_use]
    pub fn new_with_reqwest_client(http: reqwest::Client) -> Self {
        Self::from_adapter(Arc::new(RealAdapter::new(http)))
    }

    /// Build around an injected transport with the default configuration.
    #[must_use]
    pub fn from_adapter(transport: Arc<dyn EmTransport>) -> Self {
        Self {
            transport,
            cfg: EastMoneyConfig::default(),
        }
    }

    pub(crate) fn from_parts(transport: Arc<dyn EmTransport>, cfg: EastMoneyConfig) -> Self {
        Self { transport, cfg }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &EastMoneyConfig {
        &self.cfg
    }

    fn query_for(&self, provider_code: String) -> Vec<(&'static str, String)> {
        vec![
            ("code", provider_code),
            ("year", self.cfg.window.as_param().to_string()),
            ("type", self.cfg.metric.as_param().to_string()),
        ]
    }

    async fn fetch_raw(
        &self,
        query: &[(&'static str, String)],
    ) -> Result<RawHistoryPe, PeRatioError> {
        let url = self.cfg.base_url.as_str();
        #[cfg(feature = "tracing")]
        tracing::debug!(connector = Self::KEY.as_str(), url, params = ?query, "history pe request begin");
        #[cfg(feature = "tracing")]
        let started = std::time::Instant::now();

        let body = tokio::time::timeout(self.cfg.timeout, self.transport.get_json(url, query))
            .await
            .map_err(|_| {
                PeRatioError::transport(
                    Self::KEY.as_str(),
                    format!(
                        "deadline of {}ms exceeded: {url}",
                        self.cfg.timeout.as_millis()
                    ),
                )
            })??;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            connector = Self::KEY.as_str(),
            url,
            latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            resp = %body,
            "history pe request end"
        );

        serde_json::from_value(body).map_err(|e| {
            PeRatioError::transport(
                Self::KEY.as_str(),
                format!("decode history pe response: {e}"),
            )
        })
    }
}

/// Map a decoded response into a series, dropping records whose value does not parse.
///
/// # Errors
/// Returns `NoData` when the response holds no history group at all.
pub fn series_from_raw(
    raw: RawHistoryPe,
    security_code: &str,
) -> Result<HistoryPeSeries, PeRatioError> {
    let group = raw
        .data
        .into_iter()
        .nth(PRIMARY_GROUP)
        .ok_or_else(|| PeRatioError::no_data(format!("history pe for {security_code}")))?;

    let mut series = HistoryPeSeries::new();
    for record in &group {
        match record.to_entry() {
            Ok(entry) => series.push(entry),
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::error!(
                    connector = EmConnector::KEY.as_str(),
                    security_code,
                    error = %err,
                    "skipping history pe record"
                );
                #[cfg(not(feature = "tracing"))]
                let _ = err;
            }
        }
    }
    Ok(series)
}

#[async_trait]
impl HistoryPeProvider for EmConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "peratio_eastmoney::history_pe",
            skip(self),
            err
        )
    )]
    async fn history_pe(&self, security_code: &str) -> Result<HistoryPeSeries, PeRatioError> {
        let provider_code = code::to_provider_code(security_code)?;
        let query = self.query_for(provider_code);
        let raw = self.fetch_raw(&query).await?;
        series_from_raw(raw, security_code)
    }
}

impl PeConnector for EmConnector {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "EastMoney"
    }

    fn as_history_pe_provider(&self) -> Option<&dyn HistoryPeProvider> {
        Some(self as &dyn HistoryPeProvider)
    }
}
