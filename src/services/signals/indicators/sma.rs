//! Simple Moving Average (SMA) indicator.

use std::collections::VecDeque;

/// Streaming SMA over the last `window` prices.
///
/// The window grows until it holds `window` values and then slides, so a
/// mean is available from the very first price. The running sum is Kahan
/// compensated; non-finite prices are counted instead of summed so they stop
/// affecting the mean once evicted.
#[derive(Debug, Clone)]
pub struct RollingMean {
    window: usize,
    values: VecDeque<f64>,
    sum: f64,
    compensation: f64,
    non_finite: usize,
}

impl RollingMean {
    /// Create a rolling mean. `window` must be at least 1.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            values: VecDeque::with_capacity(window),
            sum: 0.0,
            compensation: 0.0,
            non_finite: 0,
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of prices currently inside the window.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Admit a price and return the mean of the window ending at it.
    pub fn push(&mut self, price: f64) -> f64 {
        self.values.push_back(price);
        self.admit(price);

        while self.values.len() > self.window {
            if let Some(evicted) = self.values.pop_front() {
                self.evict(evicted);
            }
        }

        self.mean()
    }

    /// Mean of the current window (NaN when empty).
    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return f64::NAN;
        }
        let n = self.values.len() as f64;
        if self.non_finite > 0 {
            // Let IEEE rules decide between NaN and +/-inf.
            return self.values.iter().sum::<f64>() / n;
        }
        self.sum / n
    }

    fn admit(&mut self, price: f64) {
        if price.is_finite() {
            self.add(price);
        } else {
            self.non_finite += 1;
        }
    }

    fn evict(&mut self, price: f64) {
        if price.is_finite() {
            self.add(-price);
        } else {
            self.non_finite -= 1;
        }
    }

    fn add(&mut self, x: f64) {
        let y = x - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }
}

/// Rolling mean for every position of `values`, using a growing-then-fixed window.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let mut sma = RollingMean::new(window);
    values.iter().map(|&v| sma.push(v)).collect()
}
