use std::time::Duration;

use peratio_core::{HistoryPe, HistoryPeSeries, PeConnector, PeRatioError, median_history_pe};
use peratio_mock::{DynamicMockConnector, MockBehavior, MockConnector};

fn series(rows: &[(&str, f64)]) -> HistoryPeSeries {
    rows.iter()
        .map(|(d, v)| HistoryPe::try_new(*d, *v).unwrap())
        .collect()
}

#[tokio::test]
async fn fixture_median() {
    let mock = MockConnector::new();
    let m = median_history_pe(&mock, "000001.SZ").await.unwrap();
    assert!((m - 5.33).abs() < 1e-12);

    let even = median_history_pe(&mock, "600519.SH").await.unwrap();
    assert!((even - (36.02 + 48.17) / 2.0).abs() < 1e-12);
}

#[tokio::test]
async fn fixture_special_codes() {
    let mock = MockConnector::new();
    let hp = mock.as_history_pe_provider().expect("history pe provider");

    assert!(hp.history_pe("FAIL").await.unwrap_err().is_transport());
    assert!(hp.history_pe("UNKNOWN").await.unwrap_err().is_no_data());
    assert!(hp.history_pe("SKIPPED").await.unwrap().is_empty());
    assert_eq!(
        median_history_pe(&mock, "SKIPPED").await,
        Err(PeRatioError::EmptySeries)
    );
}

#[tokio::test]
async fn fixture_timeout_trips_short_deadline() {
    let mock = MockConnector::new();
    let hp = mock.as_history_pe_provider().expect("history pe provider");
    let res = tokio::time::timeout(Duration::from_millis(20), hp.history_pe("TIMEOUT")).await;
    assert!(res.is_err());
}

#[tokio::test]
async fn dynamic_return_and_fail() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P0");
    let expected = series(&[("2022", 1.0), ("2023", 3.0)]);
    controller
        .set_history_pe_behavior("600519.SH", MockBehavior::Return(expected.clone()))
        .await;
    let err = PeRatioError::transport("P0", "boom");
    controller
        .set_history_pe_behavior("000001.SZ", MockBehavior::Fail(err.clone()))
        .await;

    let hp = mock.as_history_pe_provider().expect("history pe provider");
    assert_eq!(hp.history_pe("600519.SH").await.unwrap(), expected);
    assert_eq!(hp.history_pe("000001.SZ").await.unwrap_err(), err);
    assert_eq!(mock.name(), "P0");
    assert_eq!(
        controller.requests().await,
        vec!["600519.SH".to_string(), "000001.SZ".to_string()]
    );
}

#[tokio::test]
async fn dynamic_hang_and_clear() {
    let (mock, controller) = DynamicMockConnector::new_with_controller("P1");
    controller
        .set_history_pe_behavior("600519.SH", MockBehavior::Hang)
        .await;

    let hp = mock.as_history_pe_provider().expect("history pe provider");
    let res = tokio::time::timeout(Duration::from_millis(20), hp.history_pe("600519.SH")).await;
    assert!(res.is_err());

    controller.clear_all_behaviors().await;
    assert!(controller.requests().await.is_empty());
    let err = hp.history_pe("600519.SH").await.unwrap_err();
    assert!(matches!(err, PeRatioError::Unsupported { .. }));
}
