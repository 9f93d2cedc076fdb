use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, warn};

use stockpilot_inventory::decide;

use crate::app::{AppState, dto, errors};

/// `GET /predict`: forecast, decide, and return the decision with the chart data.
pub async fn predict(
    Extension(state): Extension<Arc<AppState>>,
    query: Result<Query<dto::PredictQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };

    let params = query.to_params();

    // Reject bad parameters before paying for a forecast.
    if let Err(e) = params.validate() {
        return errors::decision_error_to_response(e);
    }

    let series = match state.forecast() {
        Ok(s) => s,
        Err(e) => {
            warn!(error = %e, horizon = state.forecast_horizon_days(), "forecast producer failed");
            return errors::forecast_error_to_response(e);
        }
    };

    let result = match decide(&series, &params) {
        Ok(r) => r,
        Err(e) => return errors::decision_error_to_response(e),
    };

    info!(
        current_stock = params.current_stock,
        lead_time_days = params.lead_time_days,
        reorder_point = result.reorder_point,
        action = %result.action,
        "stock decision"
    );

    (
        StatusCode::OK,
        Json(dto::prediction_to_json(&result, params.current_stock, &series)),
    )
        .into_response()
}
