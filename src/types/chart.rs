use serde::{Deserialize, Serialize};

use crate::types::{CrossoverKind, SignalTable};

/// Chart time range requested from the market data provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartRange {
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "5d")]
    FiveDays,
    #[serde(rename = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl ChartRange {
    /// Get the range from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1d" => Some(ChartRange::OneDay),
            "5d" => Some(ChartRange::FiveDays),
            "1mo" => Some(ChartRange::OneMonth),
            "3mo" => Some(ChartRange::ThreeMonths),
            "6mo" => Some(ChartRange::SixMonths),
            "1y" => Some(ChartRange::OneYear),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartRange::OneDay => "1d",
            ChartRange::FiveDays => "5d",
            ChartRange::OneMonth => "1mo",
            ChartRange::ThreeMonths => "3mo",
            ChartRange::SixMonths => "6mo",
            ChartRange::OneYear => "1y",
        }
    }
}

/// Sampling interval of the candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartInterval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "1d")]
    OneDay,
}

impl ChartInterval {
    /// Get the interval from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1m" => Some(ChartInterval::OneMinute),
            "5m" => Some(ChartInterval::FiveMinutes),
            "15m" => Some(ChartInterval::FifteenMinutes),
            "30m" => Some(ChartInterval::ThirtyMinutes),
            "1h" | "60m" => Some(ChartInterval::OneHour),
            "1d" => Some(ChartInterval::OneDay),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartInterval::OneMinute => "1m",
            ChartInterval::FiveMinutes => "5m",
            ChartInterval::FifteenMinutes => "15m",
            ChartInterval::ThirtyMinutes => "30m",
            ChartInterval::OneHour => "1h",
            ChartInterval::OneDay => "1d",
        }
    }
}

/// What to ask the market data provider for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRequest {
    pub symbol: String,
    pub range: ChartRange,
    pub interval: ChartInterval,
}

/// OHLC (Open, High, Low, Close) data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcPoint {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

/// A buy or sell marker drawn on top of the candles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMarker {
    pub time: i64,
    pub price: f64,
    pub kind: CrossoverKind,
}

/// Everything the page needs to redraw the chart on one refresh tick.
///
/// Write-only: non-finite means go out as `null`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayload {
    pub symbol: String,
    pub title: String,
    /// Refresh tick that produced this payload.
    pub tick: u64,
    pub range: ChartRange,
    pub interval: ChartInterval,
    pub short_window: usize,
    pub long_window: usize,
    pub candles: Vec<OhlcPoint>,
    pub signals: SignalTable,
    pub markers: Vec<SignalMarker>,
    /// Unix timestamp (milliseconds) when generated.
    pub generated_at: i64,
}
