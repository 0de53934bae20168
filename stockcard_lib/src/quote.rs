//! Quote mapper: turns a raw chart response into the display model.
//!
//! The chart payload is loosely typed at the boundary. Every field the card
//! needs is checked here, and a missing or unusable one fails with
//! [`StockCardError::MalformedQuoteData`] naming the field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockcard_api::types::{ChartResponse, QuoteSeries};

use crate::error::StockCardError;

/// Display model for one quote. Built fresh for every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QuoteDetails {
    pub symbol: String,
    /// Time of the last market update.
    pub trading_day: DateTime<Utc>,
    pub price: f64,
    /// Start of the current regular trading period. This is a time, not an
    /// opening price, even though the card lists it next to High and Low.
    pub open: DateTime<Utc>,
    pub high: f64,
    pub low: f64,
    /// `previous_close - price`.
    pub change: f64,
    /// `change / previous_close * 100`. Not finite when the previous close is zero.
    pub change_percent: f64,
}

/// Returns `(change, change_percent)` for a previous close and current price.
///
/// The change is measured as previous close minus current price, so a price
/// that fell yields a positive change.
pub fn price_change(previous_close: f64, price: f64) -> (f64, f64) {
    let change = previous_close - price;
    let change_percent = change / previous_close * 100.0;
    (change, change_percent)
}

/// Maps a chart response into [`QuoteDetails`].
///
/// A previous close of zero is accepted and produces a non-finite
/// `change_percent`; the card builder renders that as a placeholder.
pub fn map(raw: &ChartResponse) -> Result<QuoteDetails, StockCardError> {
    if let Some(error) = &raw.chart.error {
        return Err(StockCardError::Upstream {
            code: error.code.clone(),
            description: error.description.clone(),
        });
    }

    let result = raw.first_result().ok_or_else(|| malformed("chart.result"))?;
    let meta = result.meta.as_ref().ok_or_else(|| malformed("meta"))?;

    let symbol = meta
        .symbol
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| malformed("meta.symbol"))?
        .to_string();

    let price = finite(meta.regular_market_price, "meta.regularMarketPrice")?;
    let previous_close = finite(
        meta.chart_previous_close.or(meta.previous_close),
        "meta.chartPreviousClose",
    )?;

    let market_time = meta
        .regular_market_time
        .ok_or_else(|| malformed("meta.regularMarketTime"))?;
    let trading_day = DateTime::from_timestamp(market_time, 0)
        .ok_or_else(|| malformed("meta.regularMarketTime"))?;

    // The period start is read as milliseconds without conversion, unlike
    // regularMarketTime above.
    let period_start = meta
        .current_trading_period
        .as_ref()
        .and_then(|p| p.regular.as_ref())
        .and_then(|r| r.start)
        .ok_or_else(|| malformed("meta.currentTradingPeriod.regular.start"))?;
    let open = DateTime::from_timestamp_millis(period_start)
        .ok_or_else(|| malformed("meta.currentTradingPeriod.regular.start"))?;

    let series = result
        .indicators
        .as_ref()
        .and_then(|i| i.quote.first())
        .ok_or_else(|| malformed("indicators.quote"))?;
    let (high, low) = period_extremes(series)?;

    let (change, change_percent) = price_change(previous_close, price);

    let details = QuoteDetails {
        symbol,
        trading_day,
        price,
        open,
        high,
        low,
        change,
        change_percent,
    };
    tracing::debug!(?details, "mapped quote");
    Ok(details)
}

/// Highest high and lowest low over the non-null samples of the series.
fn period_extremes(series: &QuoteSeries) -> Result<(f64, f64), StockCardError> {
    let high = series
        .high
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .reduce(f64::max)
        .ok_or_else(|| malformed("indicators.quote[0].high"))?;
    let low = series
        .low
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .reduce(f64::min)
        .ok_or_else(|| malformed("indicators.quote[0].low"))?;
    Ok((high, low))
}

fn finite(value: Option<f64>, field: &str) -> Result<f64, StockCardError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(malformed(field)),
    }
}

fn malformed(field: &str) -> StockCardError {
    StockCardError::MalformedQuoteData(format!("missing or invalid {}", field))
}
