//! `stockpilot-core` — shared value objects.
//!
//! This crate contains **pure** primitives (no IO, no HTTP, no storage) that
//! both the forecast producers and the decision engine speak.

pub mod error;
pub mod forecast;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use forecast::{ForecastPoint, ForecastSeries};
pub use id::ModelId;
pub use value_object::ValueObject;
