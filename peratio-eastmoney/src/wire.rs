//! Wire format of the EastMoney valuation-analysis (GZFX) endpoint.
//!
//! EastMoney encodes every number as a JSON string. A missing or `null` field
//! decodes to an empty string; any other non-string JSON type fails the whole
//! body. Numeric validation happens per record in [`parse_pe_value`].

use serde::{Deserialize, Deserializer};

use peratio_core::{HistoryPe, PeRatioError};

/// Index of the only meaningful group inside `data`.
///
/// The endpoint nests history in an outer list for historical reasons; only the
/// first group carries the requested series.
pub const PRIMARY_GROUP: usize = 0;

/// Response body of the valuation-analysis endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawHistoryPe {
    /// Valuation history, grouped. Only `data[PRIMARY_GROUP]` is consumed.
    #[serde(default, deserialize_with = "nullable_groups")]
    pub data: Vec<Vec<RawPeRecord>>,
    /// Percentile bands and ranks. Decoded to honor the wire shape, never consumed.
    #[serde(default, deserialize_with = "nullable_groups")]
    pub pe: Vec<Vec<RawPeBand>>,
}

/// One dated valuation observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawPeRecord {
    /// Provider security code.
    #[serde(rename = "SECURITYCODE", deserialize_with = "nullable_string")]
    pub security_code: String,
    /// Date type marker.
    #[serde(rename = "DATETYPE", deserialize_with = "nullable_string")]
    pub date_type: String,
    /// Row ordinal.
    #[serde(rename = "SL", deserialize_with = "nullable_string")]
    pub sl: String,
    /// Observation date token.
    #[serde(rename = "ENDATE", deserialize_with = "nullable_string")]
    pub end_date: String,
    /// Ratio, string-encoded.
    #[serde(rename = "VALUE", deserialize_with = "nullable_string")]
    pub value: String,
}

impl RawPeRecord {
    /// Convert into a validated entry.
    ///
    /// # Errors
    /// Returns `RecordParse` when `VALUE` is not a finite number.
    pub fn to_entry(&self) -> Result<HistoryPe, PeRatioError> {
        let value = parse_pe_value(&self.end_date, &self.value)?;
        HistoryPe::try_new(self.end_date.clone(), value)
    }
}

/// Percentile band summary (30/50/70th PE percentiles and ranks).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawPeBand {
    /// Provider security code.
    #[serde(rename = "SECURITYCODE", deserialize_with = "nullable_string")]
    pub security_code: String,
    /// 30th percentile.
    #[serde(rename = "PE30", deserialize_with = "nullable_string")]
    pub pe30: String,
    /// 50th percentile.
    #[serde(rename = "PE50", deserialize_with = "nullable_string")]
    pub pe50: String,
    /// 70th percentile.
    #[serde(rename = "PE70", deserialize_with = "nullable_string")]
    pub pe70: String,
    /// Total ranked instruments.
    #[serde(rename = "TOTAL", deserialize_with = "nullable_string")]
    pub total: String,
    /// Rank 1.
    #[serde(rename = "RN1", deserialize_with = "nullable_string")]
    pub rn1: String,
    /// Rank 2.
    #[serde(rename = "RN2", deserialize_with = "nullable_string")]
    pub rn2: String,
    /// Rank 3.
    #[serde(rename = "RN3", deserialize_with = "nullable_string")]
    pub rn3: String,
}

/// Parse a string-encoded ratio.
///
/// # Errors
/// Returns `RecordParse` (carrying `date` and the raw text) when `raw` is not a
/// float literal or denotes NaN/infinity.
pub fn parse_pe_value(date: &str, raw: &str) -> Result<f64, PeRatioError> {
    let value = raw
        .parse::<f64>()
        .map_err(|e| PeRatioError::record_parse(date, raw, e.to_string()))?;
    if !value.is_finite() {
        return Err(PeRatioError::record_parse(date, raw, "value is not finite"));
    }
    Ok(value)
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_groups<'de, D, T>(deserializer: D) -> Result<Vec<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<Vec<T>>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_documented_shape() {
        let body = json!({
            "data": [[
                {"SECURITYCODE": "600519", "DATETYPE": "1", "SL": "1",
                 "ENDATE": "2020-12-31", "VALUE": "48.17"}
            ]],
            "pe": [[
                {"SECURITYCODE": "600519", "PE30": "30.1", "PE50": "35.2", "PE70": "40.3",
                 "TOTAL": "2400", "RN1": "1", "RN2": "2", "RN3": "3"}
            ]]
        });
        let raw: RawHistoryPe = serde_json::from_value(body).unwrap();
        assert_eq!(raw.data.len(), 1);
        assert_eq!(raw.data[PRIMARY_GROUP][0].end_date, "2020-12-31");
        assert_eq!(raw.data[PRIMARY_GROUP][0].value, "48.17");
        assert_eq!(raw.pe[0][0].pe50, "35.2");
    }

    #[test]
    fn null_and_missing_sections_are_empty() {
        let raw: RawHistoryPe = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(raw.data.is_empty());
        assert!(raw.pe.is_empty());
    }

    #[test]
    fn null_fields_decode_as_empty() {
        let raw: RawHistoryPe = serde_json::from_value(json!({
            "data": [[{"ENDATE": "2022", "VALUE": null}]]
        }))
        .unwrap();
        let record = &raw.data[PRIMARY_GROUP][0];
        assert_eq!(record.value, "");
        assert_eq!(record.security_code, "");
    }

    #[test]
    fn non_string_fields_fail_the_body() {
        for value in [json!(12.5), json!(true), json!({"v": "1"}), json!(["1"])] {
            let res = serde_json::from_value::<RawHistoryPe>(json!({
                "data": [[{"ENDATE": "2021", "VALUE": value}]]
            }));
            assert!(res.is_err(), "VALUE {value} should not decode");
        }
    }

    #[test]
    fn parse_value_rejects_garbage_and_non_finite() {
        assert_eq!(parse_pe_value("2020", "10.5"), Ok(10.5));
        assert_eq!(parse_pe_value("2020", "-3"), Ok(-3.0));
        for bad in ["bad", "", "NaN", "inf", "-infinity", " 1.0", "1,5"] {
            let err = parse_pe_value("2020", bad).unwrap_err();
            assert!(
                matches!(&err, PeRatioError::RecordParse { raw, .. } if raw == bad),
                "expected RecordParse for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn record_to_entry_keeps_date_token() {
        let rec = RawPeRecord {
            end_date: "2023-03-31 00:00:00".into(),
            value: "13.25".into(),
            ..RawPeRecord::default()
        };
        let entry = rec.to_entry().unwrap();
        assert_eq!(entry.date(), "2023-03-31 00:00:00");
        assert_eq!(entry.value(), 13.25);
    }
}
