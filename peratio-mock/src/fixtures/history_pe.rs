use peratio_core::{HistoryPe, HistoryPeSeries};

pub fn by_code(code: &str) -> Option<HistoryPeSeries> {
    match code {
        "600519.SH" => Some(build(&[
            ("2020-12-31", 48.17),
            ("2021-12-31", 51.36),
            ("2022-12-31", 36.02),
            ("2023-12-31", 28.41),
        ])),
        "000001.SZ" => Some(build(&[
            ("2021-12-31", 9.12),
            ("2022-12-31", 5.33),
            ("2023-12-31", 4.18),
        ])),
        "300750.SZ" => Some(build(&[
            ("2022-12-31", 50.6),
            ("2023-12-31", 19.7),
            ("2024-12-31", 24.9),
        ])),
        // Provider answered but every record was malformed.
        "SKIPPED" => Some(HistoryPeSeries::new()),
        _ => None,
    }
}

fn build(rows: &[(&str, f64)]) -> HistoryPeSeries {
    rows.iter()
        .map(|(date, value)| HistoryPe::try_new(*date, *value).unwrap())
        .collect()
}
