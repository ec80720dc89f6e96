//! Yahoo Finance API client for historical candles.
//!
//! Uses the unofficial chart endpoint (no API key).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::MarketDataProvider;
use crate::error::{AppError, Result};
use crate::types::{ChartRequest, OhlcPoint};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance chart response.
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
    volume: Option<Vec<Option<u64>>>,
}

/// Normalize symbol for Yahoo Finance API.
/// Yahoo uses hyphens instead of dots for share classes (e.g., BRK-B not BRK.B)
fn normalize_yahoo_symbol(symbol: &str) -> String {
    symbol.to_uppercase().replace('.', "-")
}

/// Turn a decoded chart response into candles.
///
/// A missing or empty result set is an empty series. Points without a
/// positive close are dropped; the remaining order is left as Yahoo sent it.
fn parse_chart(response: YahooChartResponse) -> Result<Vec<OhlcPoint>> {
    if let Some(error) = response.chart.error {
        return Err(AppError::ExternalApi(format!(
            "Yahoo API error: {} - {}",
            error.code, error.description
        )));
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let timestamps = result.timestamp.unwrap_or_default();
    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Ok(Vec::new());
    };

    let opens = quote.open.unwrap_or_default();
    let highs = quote.high.unwrap_or_default();
    let lows = quote.low.unwrap_or_default();
    let closes = quote.close.unwrap_or_default();
    let volumes = quote.volume.unwrap_or_default();

    let mut points = Vec::with_capacity(timestamps.len());
    for (i, &timestamp) in timestamps.iter().enumerate() {
        let Some(time) = timestamp.checked_mul(1000) else {
            warn!("Skipping out-of-range Yahoo timestamp {}", timestamp);
            continue;
        };
        let close = match closes.get(i).copied().flatten() {
            Some(c) if c > 0.0 && c.is_finite() => c,
            _ => continue,
        };
        // Missing open/high/low collapse onto the close so the candle stays drawable.
        let open = opens.get(i).copied().flatten().unwrap_or(close);
        let high = highs.get(i).copied().flatten().unwrap_or(close);
        let low = lows.get(i).copied().flatten().unwrap_or(close);
        let volume = volumes.get(i).copied().flatten().map(|v| v as f64);

        points.push(OhlcPoint {
            time,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    Ok(points)
}

/// Yahoo Finance API client.
pub struct YahooFinanceClient {
    client: Client,
    base_url: String,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client with a request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;

        Ok(Self {
            client,
            base_url: BASE_URL.to_string(),
        })
    }

    fn chart_url(&self, request: &ChartRequest) -> String {
        format!(
            "{}/{}?range={}&interval={}&includePrePost=false",
            self.base_url,
            normalize_yahoo_symbol(&request.symbol),
            request.range.as_str(),
            request.interval.as_str()
        )
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn fetch_candles(&self, request: &ChartRequest) -> Result<Vec<OhlcPoint>> {
        let url = self.chart_url(request);
        debug!("Fetching Yahoo Finance data: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Yahoo API returned {} for {}",
                response.status(),
                request.symbol
            )));
        }

        let data: YahooChartResponse = response.json().await?;
        let points = parse_chart(data)?;
        debug!("Yahoo returned {} candles for {}", points.len(), request.symbol);

        Ok(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChartInterval, ChartRange};

    fn parse(json: &str) -> Result<Vec<OhlcPoint>> {
        let response: YahooChartResponse = serde_json::from_str(json).unwrap();
        parse_chart(response)
    }

    // =========================================================================
    // normalize_yahoo_symbol Tests
    // =========================================================================

    #[test]
    fn test_normalize_yahoo_symbol() {
        assert_eq!(normalize_yahoo_symbol("btc-usd"), "BTC-USD");
        assert_eq!(normalize_yahoo_symbol("BRK.B"), "BRK-B");
        assert_eq!(normalize_yahoo_symbol("AAPL"), "AAPL");
    }

    #[test]
    fn test_chart_url() {
        let client = YahooFinanceClient::new(Duration::from_secs(5)).unwrap();
        let url = client.chart_url(&ChartRequest {
            symbol: "btc-usd".to_string(),
            range: ChartRange::FiveDays,
            interval: ChartInterval::FiveMinutes,
        });
        assert_eq!(
            url,
            "https://query1.finance.yahoo.com/v8/finance/chart/BTC-USD?range=5d&interval=5m&includePrePost=false"
        );
    }

    // =========================================================================
    // parse_chart Tests
    // =========================================================================

    #[test]
    fn test_parse_chart() {
        let points = parse(
            r#"{"chart": {"result": [{
                "timestamp": [1700000000, 1700000300],
                "indicators": {"quote": [{
                    "open": [150.0, 151.0],
                    "high": [155.0, 156.0],
                    "low": [148.0, 149.0],
                    "close": [153.0, 154.0],
                    "volume": [500, 600]
                }]}
            }], "error": null}}"#,
        )
        .unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].time, 1_700_000_000_000);
        assert_eq!(points[0].close, 153.0);
        assert_eq!(points[1].high, 156.0);
        assert_eq!(points[1].volume, Some(600.0));
    }

    #[test]
    fn test_parse_chart_skips_missing_close() {
        let points = parse(
            r#"{"chart": {"result": [{
                "timestamp": [1, 2, 3],
                "indicators": {"quote": [{
                    "open": [1.0, null, 3.0],
                    "close": [1.5, null, 3.5]
                }]}
            }], "error": null}}"#,
        )
        .unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[1].time, 3000);
        assert_eq!(points[1].high, 3.5);
        assert!(points[1].volume.is_none());
    }

    #[test]
    fn test_parse_chart_skips_overflowing_timestamp() {
        let points = parse(
            r#"{"chart": {"result": [{
                "timestamp": [1700000000, 9223372036854775807],
                "indicators": {"quote": [{
                    "close": [10.0, 11.0]
                }]}
            }], "error": null}}"#,
        )
        .unwrap();

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].time, 1_700_000_000_000);
    }

    #[test]
    fn test_parse_chart_without_timestamps_is_empty() {
        let points = parse(
            r#"{"chart": {"result": [{
                "indicators": {"quote": [{}]}
            }], "error": null}}"#,
        )
        .unwrap();
        assert!(points.is_empty());

        let points = parse(r#"{"chart": {"result": [], "error": null}}"#).unwrap();
        assert!(points.is_empty());
    }

    #[test]
    fn test_parse_chart_api_error() {
        let err = parse(
            r#"{"chart": {"result": null, "error": {
                "code": "Not Found",
                "description": "No data found, symbol may be delisted"
            }}}"#,
        )
        .unwrap_err();

        assert!(matches!(err, AppError::ExternalApi(ref msg) if msg.contains("Not Found")));
    }
}
