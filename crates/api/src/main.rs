use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use stockpilot_api::app::{AppState, build_app};
use stockpilot_api::config::ServiceConfig;
use stockpilot_forecast::{DemandModel, ForecastProducer, UnavailableProducer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockpilot_observability::init();

    let config = ServiceConfig::from_env().context("invalid service configuration")?;

    // Loaded once; every request shares this instance.
    let forecaster: Arc<dyn ForecastProducer> = match DemandModel::load(&config.model_path) {
        Ok(model) => Arc::new(model),
        Err(e) => {
            warn!(
                error = %e,
                "forecast model not loaded; /predict will answer 502 until one is trained"
            );
            Arc::new(UnavailableProducer::new(e.to_string()))
        }
    };

    let app = build_app(AppState::new(forecaster, config.forecast_horizon_days));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
