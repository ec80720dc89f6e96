//! Chart refresh: fetch candles, compute signals, assemble the render payload.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ChartConfig;
use crate::error::{AppError, Result};
use crate::services::signals::{compute_signals_with, validate_params};
use crate::sources::MarketDataProvider;
use crate::types::{
    closes, ChartPayload, ChartRequest, OhlcPoint, SignalMarker, SignalParams, SignalTable,
};

/// Produces a fresh chart payload on every refresh tick.
///
/// Holds no per-tick state; the tick number arrives with each call.
pub struct RefreshService {
    provider: Arc<dyn MarketDataProvider>,
    defaults: ChartConfig,
}

impl RefreshService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, defaults: ChartConfig) -> Arc<Self> {
        Arc::new(Self { provider, defaults })
    }

    pub fn defaults(&self) -> &ChartConfig {
        &self.defaults
    }

    /// Chart request for the configured symbol.
    pub fn default_request(&self) -> ChartRequest {
        ChartRequest {
            symbol: self.defaults.symbol.clone(),
            range: self.defaults.range,
            interval: self.defaults.interval,
        }
    }

    /// Fetch candles for `request` and compute signals with `params`.
    pub async fn refresh(
        &self,
        tick: u64,
        request: &ChartRequest,
        params: &SignalParams,
    ) -> Result<ChartPayload> {
        validate_params(params)?;

        let candles = match self.provider.fetch_candles(request).await {
            Ok(candles) => candles,
            Err(e) => {
                warn!(
                    "{} fetch failed for {} (tick {}): {}",
                    self.provider.name(),
                    request.symbol,
                    tick,
                    e
                );
                return Err(e);
            }
        };

        if candles.is_empty() {
            info!("No candles for {} on tick {}", request.symbol, tick);
        } else {
            debug!(
                "Fetched {} candles for {} from {} (tick {})",
                candles.len(),
                request.symbol,
                self.provider.name(),
                tick
            );
        }

        // Parameters are already checked, so anything left is bad provider data.
        let signals = compute_signals_with(&closes(&candles), params).map_err(|e| {
            AppError::ExternalApi(format!("{} returned unusable candles: {}", self.provider.name(), e))
        })?;
        let payload = build_payload(tick, &self.defaults.title, request, params, candles, signals);

        debug!(
            "Tick {} for {}: {} markers",
            tick,
            payload.symbol,
            payload.markers.len()
        );

        Ok(payload)
    }
}

/// Assemble the payload from already-computed parts.
pub fn build_payload(
    tick: u64,
    title: &str,
    request: &ChartRequest,
    params: &SignalParams,
    candles: Vec<OhlcPoint>,
    signals: SignalTable,
) -> ChartPayload {
    let markers = signals
        .events()
        .map(|(row, kind)| SignalMarker {
            time: row.time,
            price: row.price,
            kind,
        })
        .collect();

    ChartPayload {
        symbol: request.symbol.to_uppercase(),
        title: title.to_string(),
        tick,
        range: request.range,
        interval: request.interval,
        short_window: params.short_window,
        long_window: params.long_window,
        candles,
        signals,
        markers,
        generated_at: chrono::Utc::now().timestamp_millis(),
    }
}
