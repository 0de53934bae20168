use std::fmt;
use std::str::FromStr;

use url::Url;

use super::Query;

/// Sampling interval of the chart series (`interval=` parameter).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartInterval {
    OneMinute,
    TwoMinutes,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    SixtyMinutes,
    NinetyMinutes,
    OneHour,
    OneDay,
    FiveDays,
    OneWeek,
    OneMonth,
    ThreeMonths,
}

impl fmt::Display for ChartInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChartInterval::OneMinute => "1m",
            ChartInterval::TwoMinutes => "2m",
            ChartInterval::FiveMinutes => "5m",
            ChartInterval::FifteenMinutes => "15m",
            ChartInterval::ThirtyMinutes => "30m",
            ChartInterval::SixtyMinutes => "60m",
            ChartInterval::NinetyMinutes => "90m",
            ChartInterval::OneHour => "1h",
            ChartInterval::OneDay => "1d",
            ChartInterval::FiveDays => "5d",
            ChartInterval::OneWeek => "1wk",
            ChartInterval::OneMonth => "1mo",
            ChartInterval::ThreeMonths => "3mo",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ChartInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1m" => Ok(ChartInterval::OneMinute),
            "2m" => Ok(ChartInterval::TwoMinutes),
            "5m" => Ok(ChartInterval::FiveMinutes),
            "15m" => Ok(ChartInterval::FifteenMinutes),
            "30m" => Ok(ChartInterval::ThirtyMinutes),
            "60m" => Ok(ChartInterval::SixtyMinutes),
            "90m" => Ok(ChartInterval::NinetyMinutes),
            "1h" => Ok(ChartInterval::OneHour),
            "1d" => Ok(ChartInterval::OneDay),
            "5d" => Ok(ChartInterval::FiveDays),
            "1wk" => Ok(ChartInterval::OneWeek),
            "1mo" => Ok(ChartInterval::OneMonth),
            "3mo" => Ok(ChartInterval::ThreeMonths),
            _ => Err(format!("unknown chart interval '{}'", s)),
        }
    }
}

/// Time span covered by the chart (`range=` parameter).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartRange {
    OneDay,
    FiveDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    TenYears,
    YearToDate,
    Max,
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChartRange::OneDay => "1d",
            ChartRange::FiveDays => "5d",
            ChartRange::OneMonth => "1mo",
            ChartRange::ThreeMonths => "3mo",
            ChartRange::SixMonths => "6mo",
            ChartRange::OneYear => "1y",
            ChartRange::TwoYears => "2y",
            ChartRange::FiveYears => "5y",
            ChartRange::TenYears => "10y",
            ChartRange::YearToDate => "ytd",
            ChartRange::Max => "max",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ChartRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d" => Ok(ChartRange::OneDay),
            "5d" => Ok(ChartRange::FiveDays),
            "1mo" => Ok(ChartRange::OneMonth),
            "3mo" => Ok(ChartRange::ThreeMonths),
            "6mo" => Ok(ChartRange::SixMonths),
            "1y" => Ok(ChartRange::OneYear),
            "2y" => Ok(ChartRange::TwoYears),
            "5y" => Ok(ChartRange::FiveYears),
            "10y" => Ok(ChartRange::TenYears),
            "ytd" => Ok(ChartRange::YearToDate),
            "max" => Ok(ChartRange::Max),
            _ => Err(format!("unknown chart range '{}'", s)),
        }
    }
}

/// Query for the v8 chart endpoint. With no parameters set the endpoint
/// returns the current trading day at its default interval.
#[derive(Clone, Debug, Default)]
pub struct ChartQuery {
    pub interval: Option<ChartInterval>,
    pub range: Option<ChartRange>,
}

impl ChartQuery {
    pub fn with_interval(mut self, interval: ChartInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    pub fn with_range(mut self, range: ChartRange) -> Self {
        self.range = Some(range);
        self
    }
}

impl Query for ChartQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(interval) = self.interval {
            url.query_pairs_mut()
                .append_pair("interval", &interval.to_string());
        };
        if let Some(range) = self.range {
            url.query_pairs_mut().append_pair("range", &range.to_string());
        };
        url
    }
}
