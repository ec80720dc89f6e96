pub mod refresh;
pub mod signals;

pub use refresh::RefreshService;
pub use signals::{compute_signals, compute_signals_with};
