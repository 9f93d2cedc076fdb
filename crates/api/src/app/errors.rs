use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockpilot_forecast::ForecastError;
use stockpilot_inventory::DecisionError;

/// Engine failures are caller mistakes: always a 4xx.
pub fn decision_error_to_response(err: DecisionError) -> axum::response::Response {
    match err {
        DecisionError::InsufficientForecastHorizon { .. } => json_error(
            StatusCode::BAD_REQUEST,
            "insufficient_forecast_horizon",
            err.to_string(),
        ),
        DecisionError::InvalidParameter { .. } => {
            json_error(StatusCode::BAD_REQUEST, "invalid_parameter", err.to_string())
        }
    }
}

/// Producer failures are an upstream dependency problem, never the caller's.
pub fn forecast_error_to_response(err: ForecastError) -> axum::response::Response {
    json_error(StatusCode::BAD_GATEWAY, "forecast_unavailable", err.to_string())
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "invalid_query", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
