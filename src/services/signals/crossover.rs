//! Crossover state and edge detection.

use std::cmp::Ordering;

use crate::types::CrossoverKind;

/// Whether the short average sits strictly above the long one.
///
/// Returns `None` when the two values can't be ordered (either is NaN).
pub fn above_state(short_ma: f64, long_ma: f64) -> Option<bool> {
    short_ma
        .partial_cmp(&long_ma)
        .map(|ord| ord == Ordering::Greater)
}

/// Edge-triggered crossover detector.
///
/// Emits an event only when the above/below state flips. Rows without a
/// comparable state emit nothing and leave the last known state in place.
#[derive(Debug, Clone, Copy)]
pub struct CrossoverDetector {
    previous: bool,
}

impl CrossoverDetector {
    /// `initial_above` is the state assumed before the first row.
    pub fn new(initial_above: bool) -> Self {
        Self {
            previous: initial_above,
        }
    }

    /// Last known state.
    pub fn state(&self) -> bool {
        self.previous
    }

    pub fn step(&mut self, state: Option<bool>) -> Option<CrossoverKind> {
        let current = state?;
        let event = match (self.previous, current) {
            (false, true) => Some(CrossoverKind::Buy),
            (true, false) => Some(CrossoverKind::Sell),
            _ => None,
        };
        self.previous = current;
        event
    }
}

impl Default for CrossoverDetector {
    fn default() -> Self {
        Self::new(false)
    }
}
