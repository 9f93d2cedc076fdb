use serde::{Deserialize, Serialize};

use stockpilot_core::ForecastSeries;

use crate::error::DecisionError;
use crate::params::DecisionParameters;
use crate::volatility::{FixedFractionVolatility, VolatilityEstimator};

/// Recommended stocking action.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockAction {
    #[serde(rename = "ORDER NOW")]
    OrderNow,
    #[serde(rename = "HEALTHY")]
    Healthy,
}

impl StockAction {
    /// Stock at or below the reorder point triggers an order.
    pub fn for_stock(current_stock: u64, reorder_point: u64) -> Self {
        if current_stock <= reorder_point {
            StockAction::OrderNow
        } else {
            StockAction::Healthy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockAction::OrderNow => "ORDER NOW",
            StockAction::Healthy => "HEALTHY",
        }
    }
}

impl core::fmt::Display for StockAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one stocking decision. Derived per call, never persisted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionResult {
    pub lead_time_demand: u64,
    pub safety_stock: u64,
    pub reorder_point: u64,
    pub action: StockAction,
}

/// Decide with the default 20%-of-demand volatility estimate.
pub fn decide(
    series: &ForecastSeries,
    params: &DecisionParameters,
) -> Result<DecisionResult, DecisionError> {
    DecisionEngine::new().decide(series, params)
}

/// Reorder-point decision engine.
///
/// Model:
/// - Sum the first `lead_time_days` forecast points (lead-time demand).
/// - Estimate volatility over that window (default: 20% of the sum).
/// - Safety stock = z * volatility * sqrt(lead_time_days).
/// - Reorder point = lead-time demand + safety stock.
///
/// Fractional units are truncated toward zero, never rounded. The reorder
/// point is the sum of the already-truncated parts, so it always equals
/// `lead_time_demand + safety_stock` exactly.
///
/// Stateless; one engine can serve any number of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct DecisionEngine<V = FixedFractionVolatility> {
    volatility: V,
}

impl DecisionEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: VolatilityEstimator> DecisionEngine<V> {
    pub fn with_volatility(volatility: V) -> Self {
        Self { volatility }
    }

    pub fn volatility(&self) -> &V {
        &self.volatility
    }

    pub fn decide(
        &self,
        series: &ForecastSeries,
        params: &DecisionParameters,
    ) -> Result<DecisionResult, DecisionError> {
        params.validate()?;

        let lead = params.lead_time_len();
        let window = series
            .window(lead)
            .ok_or(DecisionError::InsufficientForecastHorizon {
                required: lead,
                available: series.len(),
            })?;

        let demand: f64 = window.iter().map(|p| p.predicted_demand()).sum();
        let lead_time_demand = truncate_units(demand)?;

        let volatility = self.volatility.estimate(window, demand);
        if !(volatility.is_finite() && volatility >= 0.0) {
            return Err(DecisionError::invalid(
                "daily_volatility",
                format!("estimator returned {volatility}; expected a finite value >= 0"),
            ));
        }

        let buffer = params.service_level_z * volatility * (lead as f64).sqrt();

        let safety_stock = truncate_units(buffer)?;
        let reorder_point = lead_time_demand
            .checked_add(safety_stock)
            .ok_or_else(|| out_of_range(lead_time_demand as f64 + safety_stock as f64))?;

        // validate() guarantees current_stock >= 0.
        let action = StockAction::for_stock(params.current_stock as u64, reorder_point);

        Ok(DecisionResult {
            lead_time_demand,
            safety_stock,
            reorder_point,
            action,
        })
    }
}

/// Drop the fractional part (toward zero), refusing values `u64` cannot hold.
fn truncate_units(value: f64) -> Result<u64, DecisionError> {
    if !value.is_finite() || value >= u64::MAX as f64 {
        return Err(out_of_range(value));
    }
    Ok(value.trunc() as u64)
}

fn out_of_range(value: f64) -> DecisionError {
    DecisionError::invalid(
        "forecast_series",
        format!("forecast demand {value} is too large to express in whole units"),
    )
}
