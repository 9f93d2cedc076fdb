//! Demand volatility estimators used for the safety-stock buffer.

use stockpilot_core::ForecastPoint;

/// Share of lead-time demand used as its volatility by default.
pub const VOLATILITY_FRACTION: f64 = 0.2;

/// Estimates demand volatility over the lead-time window.
///
/// `lead_time_demand` is the real-valued (untruncated) sum of the window.
/// Implementations must return a finite, non-negative value; the engine
/// rejects anything else.
pub trait VolatilityEstimator: Send + Sync {
    fn estimate(&self, window: &[ForecastPoint], lead_time_demand: f64) -> f64;
}

/// Volatility as a fixed fraction of lead-time demand.
///
/// This is an approximation, not a standard deviation of forecast residuals:
/// it scales the buffer with expected demand and ignores how noisy the
/// underlying history actually was.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedFractionVolatility {
    fraction: f64,
}

impl FixedFractionVolatility {
    pub fn new(fraction: f64) -> Self {
        Self { fraction }
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }
}

impl Default for FixedFractionVolatility {
    fn default() -> Self {
        Self::new(VOLATILITY_FRACTION)
    }
}

impl VolatilityEstimator for FixedFractionVolatility {
    fn estimate(&self, _window: &[ForecastPoint], lead_time_demand: f64) -> f64 {
        lead_time_demand * self.fraction
    }
}
