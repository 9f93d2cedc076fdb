use serde::Deserialize;

use stockpilot_core::ForecastSeries;
use stockpilot_inventory::{
    DEFAULT_LEAD_TIME_DAYS, DEFAULT_SERVICE_LEVEL_Z, DecisionParameters, DecisionResult,
};

// -------------------------
// Request DTOs
// -------------------------

/// Query string of `GET /predict`.
#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    pub current_stock: i64,
    #[serde(default = "default_lead_time", alias = "lead_time_days")]
    pub lead_time: i64,
    #[serde(default = "default_service_level_z")]
    pub service_level_z: f64,
}

fn default_lead_time() -> i64 {
    DEFAULT_LEAD_TIME_DAYS
}

fn default_service_level_z() -> f64 {
    DEFAULT_SERVICE_LEVEL_Z
}

impl PredictQuery {
    pub fn to_params(&self) -> DecisionParameters {
        DecisionParameters::new(self.current_stock, self.lead_time)
            .with_service_level_z(self.service_level_z)
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn prediction_to_json(
    result: &DecisionResult,
    current_stock: i64,
    series: &ForecastSeries,
) -> serde_json::Value {
    serde_json::json!({
        "status": result.action.as_str(),
        "metrics": {
            "forecast_lead_time": result.lead_time_demand,
            "safety_stock": result.safety_stock,
            "reorder_point": result.reorder_point,
            "current_stock": current_stock,
        },
        "plot_data": plot_data_to_json(series),
    })
}

/// Full forecast passed through untouched, shaped for charting.
pub fn plot_data_to_json(series: &ForecastSeries) -> Vec<serde_json::Value> {
    series
        .points()
        .iter()
        .map(|p| {
            serde_json::json!({
                "ds": p.date().to_string(),
                "yhat": p.predicted_demand(),
            })
        })
        .collect()
}
