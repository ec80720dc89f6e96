use serde::{Deserialize, Serialize};

use crate::types::OhlcPoint;

/// A single observation of the series fed to the signal engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix timestamp (milliseconds).
    pub time: i64,
    /// Close price.
    pub price: f64,
}

impl PricePoint {
    pub fn new(time: i64, price: f64) -> Self {
        Self { time, price }
    }
}

impl From<&OhlcPoint> for PricePoint {
    fn from(candle: &OhlcPoint) -> Self {
        Self {
            time: candle.time,
            price: candle.close,
        }
    }
}

/// Build a price series from candle closes, keeping candle order.
pub fn closes(candles: &[OhlcPoint]) -> Vec<PricePoint> {
    candles.iter().map(PricePoint::from).collect()
}
