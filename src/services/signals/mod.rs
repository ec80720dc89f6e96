//! Moving average crossover signal engine.
//!
//! Turns a price series into short/long rolling means and edge-triggered
//! buy/sell events. Pure and synchronous: no I/O, no state kept between calls.

pub mod crossover;
pub mod indicators;

pub use crossover::{above_state, CrossoverDetector};
pub use indicators::{rolling_mean, RollingMean};

use crate::error::SignalError;
use crate::types::{CrossoverKind, PricePoint, SignalParams, SignalRow, SignalTable};

/// Compute crossover signals with the default initial state (below).
pub fn compute_signals(
    series: &[PricePoint],
    short_window: usize,
    long_window: usize,
) -> Result<SignalTable, SignalError> {
    compute_signals_with(series, &SignalParams::new(short_window, long_window))
}

/// Compute crossover signals for `series`.
///
/// One row per input point, in input order. Windows grow from one point up
/// to their full length, so both means exist on every row. The state before
/// the first row is `params.initial_above`.
pub fn compute_signals_with(
    series: &[PricePoint],
    params: &SignalParams,
) -> Result<SignalTable, SignalError> {
    validate_params(params)?;
    validate_series(series)?;

    let mut short = RollingMean::new(params.short_window);
    let mut long = RollingMean::new(params.long_window);
    let mut detector = CrossoverDetector::new(params.initial_above);

    let rows = series
        .iter()
        .map(|point| {
            let short_ma = short.push(point.price);
            let long_ma = long.push(point.price);
            let state = above_state(short_ma, long_ma);
            let event = detector.step(state);

            SignalRow {
                time: point.time,
                price: point.price,
                short_ma,
                long_ma,
                above_state: state,
                buy_signal: event == Some(CrossoverKind::Buy),
                sell_signal: event == Some(CrossoverKind::Sell),
            }
        })
        .collect();

    Ok(SignalTable::new(rows))
}

/// Reject non-positive window lengths.
pub fn validate_params(params: &SignalParams) -> Result<(), SignalError> {
    if params.short_window == 0 {
        return Err(SignalError::window("short_window"));
    }
    if params.long_window == 0 {
        return Err(SignalError::window("long_window"));
    }
    Ok(())
}

/// Check that timestamps are strictly increasing.
pub fn validate_series(series: &[PricePoint]) -> Result<(), SignalError> {
    for (index, pair) in series.windows(2).enumerate() {
        if pair[1].time <= pair[0].time {
            return Err(SignalError::MalformedSeries {
                index: index + 1,
                previous: pair[0].time,
                current: pair[1].time,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::new(i as i64, p))
            .collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // =========================================================================
    // compute_signals Tests
    // =========================================================================

    #[test]
    fn test_step_up_scenario() {
        let table =
            compute_signals(&series(&[10.0, 10.0, 10.0, 20.0, 20.0, 20.0]), 2, 3).unwrap();

        let short: Vec<f64> = table.iter().map(|r| r.short_ma).collect();
        let long: Vec<f64> = table.iter().map(|r| r.long_ma).collect();
        for (got, want) in short.iter().zip([10.0, 10.0, 10.0, 15.0, 20.0, 20.0]) {
            assert!(approx(*got, want));
        }
        for (got, want) in long.iter().zip([10.0, 10.0, 10.0, 40.0 / 3.0, 50.0 / 3.0, 20.0]) {
            assert!(approx(*got, want));
        }

        let above: Vec<Option<bool>> = table.iter().map(|r| r.above_state).collect();
        assert_eq!(
            above,
            [false, false, false, true, true, false].map(Some).to_vec()
        );

        let buys: Vec<bool> = table.iter().map(|r| r.buy_signal).collect();
        let sells: Vec<bool> = table.iter().map(|r| r.sell_signal).collect();
        assert_eq!(buys, vec![false, false, false, true, false, false]);
        assert_eq!(sells, vec![false, false, false, false, false, true]);
    }

    #[test]
    fn test_empty_series() {
        let table = compute_signals(&[], 10, 20).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_rows_keep_input_timestamps() {
        let points = vec![
            PricePoint::new(1_700_000_000_000, 1.0),
            PricePoint::new(1_700_000_300_000, 2.0),
            PricePoint::new(1_700_000_600_000, 3.0),
        ];
        let table = compute_signals(&points, 1, 2).unwrap();
        let times: Vec<i64> = table.iter().map(|r| r.time).collect();
        assert_eq!(times, vec![1_700_000_000_000, 1_700_000_300_000, 1_700_000_600_000]);
        assert_eq!(table.rows()[2].price, 3.0);
    }

    #[test]
    fn test_first_row_is_quiet_by_default() {
        // Both windows hold a single price on row 0, so the means are equal.
        let table = compute_signals(&series(&[5.0, 9.0]), 1, 2).unwrap();
        assert_eq!(table.rows()[0].above_state, Some(false));
        assert!(!table.rows()[0].buy_signal);
        assert!(!table.rows()[0].sell_signal);
        assert!(table.rows()[1].buy_signal);
    }

    #[test]
    fn test_equal_windows_never_cross() {
        let table = compute_signals(&series(&[1.0, 3.0, 2.0, 8.0]), 3, 3).unwrap();
        assert!(table.iter().all(|r| r.above_state == Some(false)));
        assert_eq!(table.events().count(), 0);
    }

    #[test]
    fn test_initial_above_suppresses_first_buy() {
        let prices = series(&[10.0, 12.0, 14.0, 9.0]);
        let table =
            compute_signals_with(&prices, &SignalParams::new(1, 3).with_initial_above(true))
                .unwrap();
        assert_eq!(table.rows()[0].above_state, Some(false));
        assert!(table.rows()[0].sell_signal);
        assert!(table.rows()[1].buy_signal);
        assert!(table.rows()[3].sell_signal);
    }

    #[test]
    fn test_nan_row_emits_nothing() {
        let prices = series(&[10.0, 10.0, f64::NAN, 10.0, 10.0, 10.0]);
        let table = compute_signals(&prices, 1, 2).unwrap();
        assert_eq!(table.len(), 6);
        assert_eq!(table.rows()[2].above_state, None);
        assert_eq!(table.rows()[3].above_state, None);
        assert_eq!(table.rows()[4].above_state, Some(false));
        assert!(table.rows()[4].long_ma.is_finite());
        assert_eq!(table.events().count(), 0);
    }

    // =========================================================================
    // Validation Tests
    // =========================================================================

    #[test]
    fn test_zero_window_rejected() {
        let prices = series(&[1.0, 2.0]);
        assert!(matches!(
            compute_signals(&prices, 0, 10),
            Err(SignalError::InvalidParameter { ref name, .. }) if name == "short_window"
        ));
        assert!(matches!(
            compute_signals(&prices, 5, 0),
            Err(SignalError::InvalidParameter { ref name, .. }) if name == "long_window"
        ));
        // Parameters are checked even without data.
        assert!(compute_signals(&[], 0, 0).is_err());
    }

    #[test]
    fn test_duplicate_timestamp_rejected() {
        let points = vec![
            PricePoint::new(1, 1.0),
            PricePoint::new(2, 1.0),
            PricePoint::new(2, 1.0),
        ];
        assert_eq!(
            compute_signals(&points, 1, 2),
            Err(SignalError::MalformedSeries {
                index: 2,
                previous: 2,
                current: 2
            })
        );
    }

    #[test]
    fn test_decreasing_timestamp_rejected() {
        let points = vec![PricePoint::new(5, 1.0), PricePoint::new(4, 1.0)];
        assert!(matches!(
            validate_series(&points),
            Err(SignalError::MalformedSeries { index: 1, .. })
        ));
        assert!(validate_series(&[]).is_ok());
        assert!(validate_series(&points[..1]).is_ok());
    }
}
