use peratio_core::{HistoryPe, HistoryPeSeries, PeRatioError, stats};
use proptest::prelude::*;

fn arb_values(min: usize) -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-1.0e6f64..1.0e6f64, min..200)
}

fn series_of(values: &[f64]) -> HistoryPeSeries {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| HistoryPe::try_new(format!("{}", 2000 + i), *v).unwrap())
        .collect()
}

#[test]
fn documented_examples() {
    assert_eq!(series_of(&[1.0, 2.0, 3.0]).median(), Ok(2.0));
    assert_eq!(series_of(&[1.0, 2.0, 3.0, 4.0]).median(), Ok(2.5));
    assert_eq!(series_of(&[10.5, 12.0, 13.25]).median(), Ok(12.0));
}

#[test]
fn empty_series_never_yields_zero() {
    let res = HistoryPeSeries::new().median();
    assert_eq!(res, Err(PeRatioError::EmptySeries));
    assert_eq!(stats::median(&[]), None);
}

proptest! {
    #[test]
    fn matches_middle_of_sorted_copy(values in arb_values(1)) {
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let n = sorted.len();
        let expected = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        };
        prop_assert_eq!(series_of(&values).median().unwrap(), expected);
    }

    #[test]
    fn median_is_bounded_by_extremes(values in arb_values(1)) {
        let m = stats::median(&values).unwrap();
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(lo <= m && m <= hi);
    }

    #[test]
    fn repeated_median_is_stable_and_non_mutating(values in arb_values(0)) {
        let series = series_of(&values);
        let before = series.clone();
        let first = series.median();
        let second = series.median();
        prop_assert_eq!(first, second);
        prop_assert_eq!(series, before);
    }
}
