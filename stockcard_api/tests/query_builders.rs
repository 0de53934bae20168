use stockcard_api::{ChartInterval, ChartQuery, ChartRange, Query};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/v8/finance/chart/MSFT").unwrap()
}

#[test]
fn chart_query_defaults_add_nothing() {
    let url = ChartQuery::default().add_to_url(&base_url());
    assert!(url.query().is_none());
}

#[test]
fn chart_query_with_interval_and_range() {
    let url = ChartQuery::default()
        .with_interval(ChartInterval::OneDay)
        .with_range(ChartRange::OneMonth)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("interval=1d"));
    assert_eq!(query, "interval=1d&range=1mo");
}

#[test]
fn interval_parses_and_displays() {
    for s in ["1m", "5m", "15m", "1h", "1d", "1wk", "1mo", "3mo"] {
        let interval: ChartInterval = s.parse().unwrap();
        assert_eq!(interval.to_string(), s);
    }
    assert!("7m".parse::<ChartInterval>().is_err());
}

#[test]
fn range_parses_and_displays() {
    for s in ["1d", "5d", "6mo", "1y", "10y", "ytd", "max"] {
        let range: ChartRange = s.parse().unwrap();
        assert_eq!(range.to_string(), s);
    }
    assert!("forever".parse::<ChartRange>().is_err());
}
