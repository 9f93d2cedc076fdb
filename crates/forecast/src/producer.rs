use stockpilot_core::ForecastSeries;

use crate::error::ForecastError;

/// Something that can predict daily demand for the days after its cutoff.
///
/// Implementations return exactly `periods` points, ascending by date,
/// starting the day after the last observation they were fitted on.
/// They must not mutate shared state; one instance is shared across requests.
pub trait ForecastProducer: Send + Sync + 'static {
    fn forecast(&self, periods: usize) -> Result<ForecastSeries, ForecastError>;
}

/// Stand-in producer used when no model could be loaded.
///
/// Every request fails with `ForecastError::Unavailable`, so the serving
/// boundary can keep answering (with an upstream error) instead of exiting.
#[derive(Debug, Clone)]
pub struct UnavailableProducer {
    reason: String,
}

impl UnavailableProducer {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ForecastProducer for UnavailableProducer {
    fn forecast(&self, _periods: usize) -> Result<ForecastSeries, ForecastError> {
        Err(ForecastError::Unavailable(self.reason.clone()))
    }
}
