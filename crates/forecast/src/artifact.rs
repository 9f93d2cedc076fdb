//! JSON persistence for fitted models.
//!
//! Training writes the artifact once; the server loads it once at startup
//! and shares it read-only.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::ForecastError;
use crate::model::DemandModel;

impl DemandModel {
    pub fn save(&self, path: &Path) -> Result<(), ForecastError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| ForecastError::Artifact(format!("{}: {e}", parent.display())))?;
        }

        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| ForecastError::Artifact(format!("serialize: {e}")))?;
        fs::write(path, json)
            .map_err(|e| ForecastError::Artifact(format!("{}: {e}", path.display())))?;

        info!(model_id = %self.model_id, path = %path.display(), "model artifact saved");
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, ForecastError> {
        let bytes = fs::read(path)
            .map_err(|e| ForecastError::Artifact(format!("{}: {e}", path.display())))?;
        let model: DemandModel = serde_json::from_slice(&bytes)
            .map_err(|e| ForecastError::Artifact(format!("{}: {e}", path.display())))?;
        model.check()?;

        info!(
            model_id = %model.model_id,
            cutoff = %model.cutoff,
            path = %path.display(),
            "model artifact loaded"
        );
        Ok(model)
    }

    /// Reject artifacts that would produce nonsense forecasts.
    fn check(&self) -> Result<(), ForecastError> {
        if !(self.alpha.is_finite() && self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ForecastError::Artifact(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if !(self.level.is_finite() && self.level >= 0.0) {
            return Err(ForecastError::Artifact(format!(
                "level must be finite and >= 0, got {}",
                self.level
            )));
        }
        if let Some(f) = self
            .weekday_factors
            .iter()
            .find(|f| !(f.is_finite() && **f >= 0.0))
        {
            return Err(ForecastError::Artifact(format!(
                "weekday factors must be finite and >= 0, got {f}"
            )));
        }
        Ok(())
    }
}
