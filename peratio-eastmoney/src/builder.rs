use std::sync::Arc;
use std::time::Duration;

use peratio_core::{EastMoneyConfig, HistoryWindow, PeRatioError, ValuationMetric};

use crate::EmConnector;
use crate::adapter::{EmTransport, RealAdapter};

/// Builder for [`EmConnector`].
///
/// Starts from `EastMoneyConfig::default()`: the public endpoint, a ten-year
/// window of PE ratios, and a 10 second deadline per request.
#[derive(Default)]
pub struct EmConnectorBuilder {
    cfg: EastMoneyConfig,
    http: Option<reqwest::Client>,
    transport: Option<Arc<dyn EmTransport>>,
}

impl EmConnector {
    /// Returns a builder with the default configuration.
    ///
    /// Customize with the builder methods before calling `.build()`.
    #[must_use]
    pub fn builder() -> EmConnectorBuilder {
        EmConnectorBuilder::default()
    }
}

impl EmConnectorBuilder {
    /// Replace the whole configuration (e.g. one loaded from a file).
    #[must_use]
    pub fn config(mut self, cfg: EastMoneyConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Override the endpoint, e.g. to point at a recording proxy.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.cfg.base_url = url.into();
        self
    }

    /// Set the lookback window.
    #[must_use]
    pub const fn window(mut self, window: HistoryWindow) -> Self {
        self.cfg.window = window;
        self
    }

    /// Set the valuation metric.
    #[must_use]
    pub const fn metric(mut self, metric: ValuationMetric) -> Self {
        self.cfg.metric = metric;
        self
    }

    /// Set the per-request deadline.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.cfg.timeout = timeout;
        self
    }

    /// Use this `reqwest::Client` for the production adapter.
    #[must_use]
    pub fn http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Inject a transport; takes precedence over [`Self::http_client`].
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn EmTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the configuration and build the connector.
    ///
    /// # Errors
    /// - `InvalidArg` for a zero timeout or a base URL that is not absolute http(s).
    /// - `Transport` if a default HTTP client has to be created and cannot be.
    pub fn build(self) -> Result<EmConnector, PeRatioError> {
        if self.cfg.timeout.is_zero() {
            return Err(PeRatioError::InvalidArg("timeout must be > 0".into()));
        }
        let url = reqwest::Url::parse(&self.cfg.base_url).map_err(|e| {
            PeRatioError::InvalidArg(format!("base url {:?}: {e}", self.cfg.base_url))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(PeRatioError::InvalidArg(format!(
                "base url {:?}: scheme must be http or https",
                self.cfg.base_url
            )));
        }

        let transport: Arc<dyn EmTransport> = match (self.transport, self.http) {
            (Some(t), _) => t,
            (None, Some(http)) => Arc::new(RealAdapter::new(http)),
            (None, None) => Arc::new(RealAdapter::try_new_default()?),
        };
        Ok(EmConnector::from_parts(transport, self.cfg))
    }
}
