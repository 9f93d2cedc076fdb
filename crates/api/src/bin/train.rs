//! Fit a demand model from sales history and write the artifact the server loads.

use anyhow::Context;
use tracing::info;

use stockpilot_api::config::TrainConfig;
use stockpilot_forecast::{DemandModelTrainer, load_history_file};

fn main() -> anyhow::Result<()> {
    stockpilot_observability::init();

    let config = TrainConfig::from_env().context("invalid training configuration")?;

    let history = load_history_file(&config.history_csv, &config.selection, config.max_rows)
        .context("failed to load sales history")?;

    let model = DemandModelTrainer::new()
        .with_alpha(config.smoothing_alpha)
        .fit(&history)
        .with_context(|| {
            format!(
                "failed to fit a model for store {} / family {:?}",
                config.selection.store_nbr, config.selection.family
            )
        })?;

    model
        .save(&config.model_path)
        .context("failed to write model artifact")?;

    info!(
        model_id = %model.model_id(),
        path = %config.model_path.display(),
        "training complete"
    );
    Ok(())
}
