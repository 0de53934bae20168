//! Response model for the v8 chart endpoint.
//!
//! Every field the quote mapper reads is optional here. A missing field is
//! reported by the mapper's validation step instead of failing the whole
//! deserialization.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Chart {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// Error object the endpoint returns alongside `"result": null`,
/// e.g. `{"code": "Not Found", "description": "No data found, symbol may be delisted"}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChartError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChartResult {
    pub meta: Option<ChartMeta>,
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Option<Indicators>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    pub exchange_name: Option<String>,
    pub instrument_type: Option<String>,
    /// Last traded price.
    pub regular_market_price: Option<f64>,
    /// Close of the bar preceding the chart range.
    pub chart_previous_close: Option<f64>,
    pub previous_close: Option<f64>,
    /// Time of the last market update, epoch seconds.
    pub regular_market_time: Option<i64>,
    pub current_trading_period: Option<TradingPeriods>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TradingPeriods {
    pub pre: Option<TradingPeriod>,
    pub regular: Option<TradingPeriod>,
    pub post: Option<TradingPeriod>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct TradingPeriod {
    pub timezone: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub gmtoffset: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteSeries>,
}

/// One OHLCV series. Intervals without trades are `null`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct QuoteSeries {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<i64>>,
}

impl ChartResponse {
    /// First result in the response, if any.
    pub fn first_result(&self) -> Option<&ChartResult> {
        self.chart.result.as_ref().and_then(|r| r.first())
    }
}
