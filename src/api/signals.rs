//! Signal API endpoints.

use axum::{routing::post, Json, Router};
use serde::Deserialize;
use tracing::debug;

use super::ApiResponse;
use crate::error::Result;
use crate::services::signals::compute_signals_with;
use crate::types::{PricePoint, SignalParams, SignalTable};
use crate::AppState;

/// Body for computing signals over a caller-supplied series.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalsRequest {
    pub points: Vec<PricePoint>,
    #[serde(flatten)]
    pub params: SignalParams,
}

/// Create the signals router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(post_signals))
}

/// POST /api/signals
async fn post_signals(Json(body): Json<SignalsRequest>) -> Result<Json<ApiResponse<SignalTable>>> {
    let table = compute_signals_with(&body.points, &body.params)?;
    debug!(
        "Computed {} rows ({} events) for a posted series",
        table.len(),
        table.events().count()
    );

    Ok(Json(ApiResponse::new(table)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialization() {
        let body: SignalsRequest = serde_json::from_str(
            r#"{
                "points": [{"time": 1, "price": 10.0}, {"time": 2, "price": 11.0}],
                "shortWindow": 2,
                "longWindow": 3
            }"#,
        )
        .unwrap();

        assert_eq!(body.points.len(), 2);
        assert_eq!(body.params, SignalParams::new(2, 3));
    }

    #[test]
    fn test_request_initial_above() {
        let body: SignalsRequest = serde_json::from_str(
            r#"{"points": [], "shortWindow": 1, "longWindow": 1, "initialAbove": true}"#,
        )
        .unwrap();

        assert!(body.params.initial_above);
    }
}
