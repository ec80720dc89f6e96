use std::env;

use crate::types::{ChartInterval, ChartRange, SignalParams};

/// What the chart shows when a request doesn't override it.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Symbol passed to the market data provider.
    pub symbol: String,
    /// History requested on each refresh.
    pub range: ChartRange,
    /// Candle interval.
    pub interval: ChartInterval,
    /// Page heading and chart title.
    pub title: String,
    /// Short/long windows.
    pub signals: SignalParams,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            symbol: "BTC-USD".to_string(),
            range: ChartRange::FiveDays,
            interval: ChartInterval::FiveMinutes,
            title: "Real-Time Bitcoin Price with Moving Average Crossover".to_string(),
            signals: SignalParams::default(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Seconds between page refreshes.
    pub refresh_interval_secs: u64,
    /// Timeout for market data requests (seconds).
    pub provider_timeout_secs: u64,
    /// Chart defaults.
    pub chart: ChartConfig,
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

/// Window lengths must be at least one.
fn window(key: &str, default: usize) -> usize {
    parsed(key).filter(|w: &usize| *w > 0).unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = ChartConfig::default();

        let chart = ChartConfig {
            symbol: env::var("SYMBOL").unwrap_or(defaults.symbol),
            range: env::var("CHART_RANGE")
                .ok()
                .and_then(|v| ChartRange::from_str(&v))
                .unwrap_or(defaults.range),
            interval: env::var("CHART_INTERVAL")
                .ok()
                .and_then(|v| ChartInterval::from_str(&v))
                .unwrap_or(defaults.interval),
            title: env::var("CHART_TITLE").unwrap_or(defaults.title),
            signals: SignalParams::new(
                window("SHORT_WINDOW", defaults.signals.short_window),
                window("LONG_WINDOW", defaults.signals.long_window),
            ),
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed("PORT").unwrap_or(8057),
            refresh_interval_secs: parsed("REFRESH_INTERVAL_SECS").unwrap_or(60),
            provider_timeout_secs: parsed("PROVIDER_TIMEOUT_SECS").unwrap_or(30),
            chart,
        }
    }

    /// Address to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
