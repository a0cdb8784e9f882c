use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::stats;
use peratio_types::PeRatioError;

/// One point of a valuation history: the provider's date token and a finite ratio.
///
/// Deserialization goes through [`HistoryPe::try_new`], so a decoded entry is
/// always finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HistoryPeRepr")]
pub struct HistoryPe {
    date: String,
    value: f64,
}

#[derive(Deserialize)]
struct HistoryPeRepr {
    date: String,
    value: f64,
}

impl TryFrom<HistoryPeRepr> for HistoryPe {
    type Error = PeRatioError;

    fn try_from(repr: HistoryPeRepr) -> Result<Self, Self::Error> {
        Self::try_new(repr.date, repr.value)
    }
}

impl HistoryPe {
    /// Build an entry, rejecting NaN and infinite values.
    ///
    /// # Errors
    /// Returns `RecordParse` when `value` is not finite.
    pub fn try_new(date: impl Into<String>, value: f64) -> Result<Self, PeRatioError> {
        let date = date.into();
        if !value.is_finite() {
            return Err(PeRatioError::record_parse(
                date,
                value.to_string(),
                "value is not finite",
            ));
        }
        Ok(Self { date, value })
    }

    /// Opaque date token exactly as sent by the provider.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The ratio.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Best-effort calendar date for the token.
    ///
    /// Understands `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and `YYYY/MM/DD`.
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|dt| dt.date())
            })
    }
}

/// Ordered valuation history in provider order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryPeSeries(Vec<HistoryPe>);

impl HistoryPeSeries {
    /// Empty series.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append an entry at the end, keeping insertion order.
    pub fn push(&mut self, entry: HistoryPe) {
        self.0.push(entry);
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the series has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate entries in provider order.
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryPe> {
        self.0.iter()
    }

    /// Entries as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[HistoryPe] {
        &self.0
    }

    /// Copy of the values in provider order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.0.iter().map(HistoryPe::value).collect()
    }

    /// Median of the values.
    ///
    /// The series itself is never reordered, so repeated calls agree.
    ///
    /// # Errors
    /// Returns `EmptySeries` when there are no entries.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "peratio_core::series::median",
            level = "trace",
            skip(self),
            fields(len = self.len()),
            err
        )
    )]
    pub fn median(&self) -> Result<f64, PeRatioError> {
        stats::median(&self.values()).ok_or(PeRatioError::EmptySeries)
    }
}

impl From<Vec<HistoryPe>> for HistoryPeSeries {
    fn from(entries: Vec<HistoryPe>) -> Self {
        Self(entries)
    }
}

impl From<HistoryPeSeries> for Vec<HistoryPe> {
    fn from(series: HistoryPeSeries) -> Self {
        series.0
    }
}

impl FromIterator<HistoryPe> for HistoryPeSeries {
    fn from_iter<I: IntoIterator<Item = HistoryPe>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for HistoryPeSeries {
    type Item = HistoryPe;
    type IntoIter = std::vec::IntoIter<HistoryPe>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a HistoryPeSeries {
    type Item = &'a HistoryPe;
    type IntoIter = std::slice::Iter<'a, HistoryPe>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, value: f64) -> HistoryPe {
        HistoryPe::try_new(date, value).unwrap()
    }

    #[test]
    fn try_new_rejects_non_finite() {
        assert!(matches!(
            HistoryPe::try_new("2020", f64::NAN),
            Err(PeRatioError::RecordParse { .. })
        ));
        assert!(HistoryPe::try_new("2020", f64::INFINITY).is_err());
        assert!(HistoryPe::try_new("2020", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn decoding_goes_through_the_finite_check() {
        let repr = HistoryPeRepr {
            date: "2020".into(),
            value: f64::NAN,
        };
        assert!(matches!(
            HistoryPe::try_from(repr),
            Err(PeRatioError::RecordParse { .. })
        ));

        let entry: HistoryPe =
            serde_json::from_str(r#"{"date":"2020-12-31","value":48.17}"#).unwrap();
        assert_eq!(entry, HistoryPe::try_new("2020-12-31", 48.17).unwrap());
    }

    #[test]
    fn end_date_formats() {
        let d = NaiveDate::from_ymd_opt(2021, 6, 30).unwrap();
        assert_eq!(entry("2021-06-30", 1.0).end_date(), Some(d));
        assert_eq!(entry("2021-06-30 00:00:00", 1.0).end_date(), Some(d));
        assert_eq!(entry("2021/06/30", 1.0).end_date(), Some(d));
        assert_eq!(entry("2021", 1.0).end_date(), None);
    }

    #[test]
    fn median_keeps_provider_order() {
        let series: HistoryPeSeries = vec![
            entry("2020", 10.5),
            entry("2022", 12.0),
            entry("2023", 13.25),
            entry("2024", 9.0),
        ]
        .into();
        let before = series.clone();

        assert_eq!(series.median().unwrap(), 11.25);
        assert_eq!(series.median().unwrap(), 11.25);
        assert_eq!(series, before);
    }

    #[test]
    fn median_of_empty_series_is_an_error() {
        let err = HistoryPeSeries::new().median().unwrap_err();
        assert_eq!(err, PeRatioError::EmptySeries);
    }

    #[test]
    fn zero_median_is_distinct_from_empty() {
        let series: HistoryPeSeries = vec![entry("2020", 0.0)].into();
        assert_eq!(series.median(), Ok(0.0));
    }
}
