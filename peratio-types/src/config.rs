//! Configuration types shared by connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default EastMoney F10 valuation-analysis endpoint.
pub const EASTMONEY_HISTORY_PE_URL: &str = "https://emfront.eastmoney.com/APP_HSF10/CPBD/GZFX";

/// Lookback window selector, in the provider's own encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum HistoryWindow {
    /// One year of history (`year=1`).
    OneYear,
    /// Three years of history (`year=2`).
    ThreeYears,
    /// Five years of history (`year=3`).
    FiveYears,
    /// Ten years of history (`year=4`).
    #[default]
    TenYears,
}

impl HistoryWindow {
    /// Value of the `year` query parameter.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::OneYear => "1",
            Self::ThreeYears => "2",
            Self::FiveYears => "3",
            Self::TenYears => "4",
        }
    }
}

/// Valuation metric selector, in the provider's own encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ValuationMetric {
    /// Price-to-earnings ratio (`type=1`).
    #[default]
    Pe,
    /// Price-to-book ratio (`type=2`).
    Pb,
    /// Price-to-sales ratio (`type=3`).
    Ps,
    /// Price-to-cashflow ratio (`type=4`).
    Pcf,
}

impl ValuationMetric {
    /// Value of the `type` query parameter.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::Pe => "1",
            Self::Pb => "2",
            Self::Ps => "3",
            Self::Pcf => "4",
        }
    }
}

/// Configuration for the EastMoney connector.
///
/// Defaults reproduce the fixed query used for PE history: a ten-year window of
/// PE ratios from the public endpoint, bounded by a 10 second deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EastMoneyConfig {
    /// Endpoint queried for valuation history.
    pub base_url: String,
    /// Lookback window.
    pub window: HistoryWindow,
    /// Valuation metric.
    pub metric: ValuationMetric,
    /// Deadline for one request/response round trip.
    pub timeout: Duration,
}

impl Default for EastMoneyConfig {
    fn default() -> Self {
        Self {
            base_url: EASTMONEY_HISTORY_PE_URL.to_string(),
            window: HistoryWindow::default(),
            metric: ValuationMetric::default(),
            timeout: Duration::from_secs(10),
        }
    }
}
