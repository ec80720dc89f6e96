//! Technical indicator implementations.

pub mod sma;

pub use sma::{rolling_mean, RollingMean};
