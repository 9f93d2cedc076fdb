//! HTTP API application wiring (Axum router + shared state).
//!
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: query DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use stockpilot_core::ForecastSeries;
use stockpilot_forecast::{ForecastError, ForecastProducer};

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;

/// State shared by every request.
///
/// The forecast producer is loaded once at startup and injected here; request
/// handlers ask it for a fresh series each time and never cache the result.
#[derive(Clone)]
pub struct AppState {
    forecaster: Arc<dyn ForecastProducer>,
    forecast_horizon_days: usize,
}

impl AppState {
    pub fn new(forecaster: Arc<dyn ForecastProducer>, forecast_horizon_days: usize) -> Self {
        Self {
            forecaster,
            forecast_horizon_days,
        }
    }

    pub fn forecast_horizon_days(&self) -> usize {
        self.forecast_horizon_days
    }

    /// A fresh forecast covering the configured horizon.
    pub fn forecast(&self) -> Result<ForecastSeries, ForecastError> {
        self.forecaster.forecast(self.forecast_horizon_days)
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(Arc::new(state)))
        .layer(
            ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::trace_requests)),
        )
}
