//! `stockpilot-forecast`
//!
//! **Responsibility:** forecast-producer boundary.
//!
//! This crate is intentionally **not** part of the decision engine:
//! - It must not depend on `stockpilot-inventory`.
//! - It only hands out `ForecastSeries` values; what callers do with them is
//!   their business.
//! - Its built-in model is deterministic so the whole pipeline is testable.

pub mod artifact;
pub mod error;
pub mod history;
pub mod model;
pub mod producer;

pub use error::ForecastError;
pub use history::{HistorySelection, SalesObservation, load_history_file, read_history};
pub use model::{DEFAULT_SMOOTHING_ALPHA, DemandModel, DemandModelTrainer};
pub use producer::{ForecastProducer, UnavailableProducer};
