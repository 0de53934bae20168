mod chart;
pub use self::chart::{
    Chart, ChartError, ChartMeta, ChartResponse, ChartResult, Indicators, QuoteSeries,
    TradingPeriod, TradingPeriods,
};
