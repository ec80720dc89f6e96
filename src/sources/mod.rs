//! Market data providers.

pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChartRequest, OhlcPoint};

/// Supplies candles for a symbol, range and interval.
///
/// Implementations return candles with strictly increasing timestamps, or an
/// empty vector when the provider has nothing for the request.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    async fn fetch_candles(&self, request: &ChartRequest) -> Result<Vec<OhlcPoint>>;
}
