use serde::{Deserialize, Serialize};

/// Direction of a crossover event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverKind {
    /// Short average crossed above the long average.
    Buy,
    /// Short average crossed back below (or onto) the long average.
    Sell,
}

impl CrossoverKind {
    /// Get display label for this event.
    pub fn label(&self) -> &'static str {
        match self {
            CrossoverKind::Buy => "Buy Signal",
            CrossoverKind::Sell => "Sell Signal",
        }
    }
}

/// Window lengths and edge-detection policy for one computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalParams {
    pub short_window: usize,
    pub long_window: usize,
    /// State assumed before the first row. `false` lets row 0 emit a buy
    /// when the short average already sits above the long one.
    #[serde(default)]
    pub initial_above: bool,
}

impl SignalParams {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        Self {
            short_window,
            long_window,
            initial_above: false,
        }
    }

    pub fn with_initial_above(mut self, initial_above: bool) -> Self {
        self.initial_above = initial_above;
        self
    }
}

impl Default for SignalParams {
    fn default() -> Self {
        Self::new(10, 20)
    }
}

/// Derived signal state at one timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalRow {
    /// Unix timestamp (milliseconds), same as the input point.
    pub time: i64,
    /// Input close price.
    pub price: f64,
    /// Trailing mean over the short window.
    pub short_ma: f64,
    /// Trailing mean over the long window.
    pub long_ma: f64,
    /// `short_ma > long_ma`, or `None` when the means can't be ordered.
    pub above_state: Option<bool>,
    pub buy_signal: bool,
    pub sell_signal: bool,
}

impl SignalRow {
    /// The crossover event on this row, if any.
    pub fn event(&self) -> Option<CrossoverKind> {
        if self.buy_signal {
            Some(CrossoverKind::Buy)
        } else if self.sell_signal {
            Some(CrossoverKind::Sell)
        } else {
            None
        }
    }
}

/// Signal rows in input order, one per price point.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SignalTable {
    rows: Vec<SignalRow>,
}

impl SignalTable {
    pub fn new(rows: Vec<SignalRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[SignalRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SignalRow> {
        self.rows.iter()
    }

    /// Rows carrying a buy signal.
    pub fn buys(&self) -> impl Iterator<Item = &SignalRow> {
        self.rows.iter().filter(|r| r.buy_signal)
    }

    /// Rows carrying a sell signal.
    pub fn sells(&self) -> impl Iterator<Item = &SignalRow> {
        self.rows.iter().filter(|r| r.sell_signal)
    }

    /// Every crossover event with the row it fired on.
    pub fn events(&self) -> impl Iterator<Item = (&SignalRow, CrossoverKind)> {
        self.rows.iter().filter_map(|r| r.event().map(|k| (r, k)))
    }
}

impl<'a> IntoIterator for &'a SignalTable {
    type Item = &'a SignalRow;
    type IntoIter = std::slice::Iter<'a, SignalRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
