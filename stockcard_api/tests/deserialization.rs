use stockcard_api::types::ChartResponse;

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[test]
fn deserialize_chart_full() {
    let json = load_fixture("chart_msft.json");
    let resp: ChartResponse = serde_json::from_str(&json).unwrap();
    assert!(resp.chart.error.is_none());

    let result = resp.first_result().unwrap();
    let meta = result.meta.as_ref().unwrap();
    assert_eq!(meta.symbol.as_deref(), Some("MSFT"));
    assert_eq!(meta.currency.as_deref(), Some("USD"));
    assert_eq!(meta.exchange_name.as_deref(), Some("NMS"));
    assert_eq!(meta.regular_market_price, Some(442.57));
    assert_eq!(meta.chart_previous_close, Some(441.58));
    assert_eq!(meta.regular_market_time, Some(1718395201));

    let regular = meta
        .current_trading_period
        .as_ref()
        .and_then(|p| p.regular.as_ref())
        .unwrap();
    assert_eq!(regular.start, Some(1718371800));
    assert_eq!(regular.timezone.as_deref(), Some("EDT"));

    let quote = &result.indicators.as_ref().unwrap().quote[0];
    assert_eq!(quote.high.len(), 4);
    assert_eq!(quote.high[2], None);
    assert_eq!(quote.low[0], Some(436.72));
    assert_eq!(quote.volume[0], Some(812003));
}

#[test]
fn deserialize_chart_error() {
    let json = load_fixture("chart_not_found.json");
    let resp: ChartResponse = serde_json::from_str(&json).unwrap();
    assert!(resp.first_result().is_none());
    let error = resp.chart.error.unwrap();
    assert_eq!(error.code, "Not Found");
    assert!(error.description.contains("delisted"));
}

#[test]
fn deserialize_chart_minimal() {
    let json = load_fixture("chart_minimal.json");
    let resp: ChartResponse = serde_json::from_str(&json).unwrap();
    let meta = resp.first_result().unwrap().meta.as_ref().unwrap();
    assert_eq!(meta.chart_previous_close, Some(0.0));
    assert!(meta.currency.is_none());
    assert!(resp.first_result().unwrap().timestamp.is_none());
}

#[test]
fn deserialize_chart_missing_fields_is_not_a_serde_error() {
    let json = r#"{"chart": {"result": [{"meta": {}, "indicators": {"quote": []}}]}}"#;
    let resp: ChartResponse = serde_json::from_str(json).unwrap();
    let result = resp.first_result().unwrap();
    assert!(result.meta.as_ref().unwrap().regular_market_price.is_none());
    assert!(result.indicators.as_ref().unwrap().quote.is_empty());
}
