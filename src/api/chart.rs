//! Chart payload endpoint polled by the page on every refresh tick.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::ApiResponse;
use crate::config::ChartConfig;
use crate::error::{AppError, Result};
use crate::types::{ChartInterval, ChartPayload, ChartRange, ChartRequest, SignalParams};
use crate::AppState;

/// Query parameters for the chart endpoint. Anything omitted uses the configured default.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartQuery {
    /// Refresh tick counter kept by the page.
    pub tick: Option<u64>,
    pub symbol: Option<String>,
    /// Range: 1d, 5d, 1mo, 3mo, 6mo, 1y
    pub range: Option<String>,
    /// Interval: 1m, 5m, 15m, 30m, 1h, 1d
    pub interval: Option<String>,
    pub short: Option<usize>,
    pub long: Option<usize>,
    pub initial_above: Option<bool>,
}

impl ChartQuery {
    /// Merge the query over `defaults`.
    pub fn resolve(&self, defaults: &ChartConfig) -> Result<(ChartRequest, SignalParams)> {
        let symbol = match self.symbol.as_deref().map(str::trim) {
            Some("") => return Err(AppError::BadRequest("symbol must not be empty".to_string())),
            Some(s) => s.to_string(),
            None => defaults.symbol.clone(),
        };

        let range = match self.range.as_deref() {
            Some(r) => ChartRange::from_str(r)
                .ok_or_else(|| AppError::BadRequest(format!("unknown range: {}", r)))?,
            None => defaults.range,
        };

        let interval = match self.interval.as_deref() {
            Some(i) => ChartInterval::from_str(i)
                .ok_or_else(|| AppError::BadRequest(format!("unknown interval: {}", i)))?,
            None => defaults.interval,
        };

        let params = SignalParams {
            short_window: self.short.unwrap_or(defaults.signals.short_window),
            long_window: self.long.unwrap_or(defaults.signals.long_window),
            initial_above: self.initial_above.unwrap_or(defaults.signals.initial_above),
        };

        Ok((
            ChartRequest {
                symbol,
                range,
                interval,
            },
            params,
        ))
    }
}

/// Create the chart router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_chart))
}

/// GET /api/chart
async fn get_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> Result<Json<ApiResponse<ChartPayload>>> {
    let (request, params) = query.resolve(state.refresh.defaults())?;
    let payload = state
        .refresh
        .refresh(query.tick.unwrap_or(0), &request, &params)
        .await?;

    Ok(Json(ApiResponse::new(payload)))
}
