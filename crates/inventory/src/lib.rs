//! Inventory decision engine.
//!
//! Turns a per-day demand forecast into lead-time demand, safety stock, a
//! reorder point, and an order/hold recommendation. Implemented purely as
//! deterministic logic (no IO, no HTTP, no storage).

pub mod decision;
pub mod error;
pub mod params;
pub mod volatility;

pub use decision::{DecisionEngine, DecisionResult, StockAction, decide};
pub use error::DecisionError;
pub use params::{
    DEFAULT_LEAD_TIME_DAYS, DEFAULT_SERVICE_LEVEL_Z, DecisionParameters, MAX_LEAD_TIME_DAYS,
};
pub use volatility::{FixedFractionVolatility, VOLATILITY_FRACTION, VolatilityEstimator};
