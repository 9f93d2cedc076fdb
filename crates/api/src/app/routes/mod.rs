use axum::{Router, routing::get};

pub mod predict;
pub mod system;

/// Router for the decision endpoints.
pub fn router() -> Router {
    Router::new().route("/predict", get(predict::predict))
}
