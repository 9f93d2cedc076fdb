use serde::{Deserialize, Serialize};

use crate::error::DecisionError;

/// z-score for a ~95% service level under a normal-demand approximation.
pub const DEFAULT_SERVICE_LEVEL_Z: f64 = 1.65;

/// Lead time assumed when a caller does not supply one.
pub const DEFAULT_LEAD_TIME_DAYS: i64 = 5;

/// Longest lead time accepted; anything above is treated as misconfiguration.
pub const MAX_LEAD_TIME_DAYS: i64 = 90;

/// Inputs to a single stocking decision.
///
/// Fields are raw caller values; `validate` runs before every decision so a
/// bad value is reported by name instead of being clamped.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionParameters {
    pub current_stock: i64,
    pub lead_time_days: i64,
    pub service_level_z: f64,
}

impl DecisionParameters {
    pub fn new(current_stock: i64, lead_time_days: i64) -> Self {
        Self {
            current_stock,
            lead_time_days,
            service_level_z: DEFAULT_SERVICE_LEVEL_Z,
        }
    }

    pub fn with_service_level_z(mut self, service_level_z: f64) -> Self {
        self.service_level_z = service_level_z;
        self
    }

    pub fn validate(&self) -> Result<(), DecisionError> {
        if self.current_stock < 0 {
            return Err(DecisionError::invalid(
                "current_stock",
                format!("must be >= 0 (got {})", self.current_stock),
            ));
        }

        if self.lead_time_days <= 0 {
            return Err(DecisionError::invalid(
                "lead_time_days",
                format!("must be a positive number of days (got {})", self.lead_time_days),
            ));
        }

        if self.lead_time_days > MAX_LEAD_TIME_DAYS {
            return Err(DecisionError::invalid(
                "lead_time_days",
                format!(
                    "must be at most {MAX_LEAD_TIME_DAYS} days (got {})",
                    self.lead_time_days
                ),
            ));
        }

        if !(self.service_level_z.is_finite() && self.service_level_z > 0.0) {
            return Err(DecisionError::invalid(
                "service_level_z",
                format!("must be a finite positive number (got {})", self.service_level_z),
            ));
        }

        Ok(())
    }

    /// Lead time as a window length. Only meaningful after `validate`.
    pub(crate) fn lead_time_len(&self) -> usize {
        self.lead_time_days as usize
    }
}

impl Default for DecisionParameters {
    fn default() -> Self {
        Self::new(0, DEFAULT_LEAD_TIME_DAYS)
    }
}
