use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use stockpilot_core::{ForecastPoint, ForecastSeries, ModelId};

use crate::error::ForecastError;
use crate::history::SalesObservation;
use crate::producer::ForecastProducer;

/// Smoothing constant used when the trainer is not told otherwise.
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.3;

/// Fitted daily demand model.
///
/// Model:
/// - Per-weekday multiplicative factors (weekday mean / overall mean).
/// - Simple exponential smoothing of the deseasonalized history gives a level.
/// - Day `cutoff + k` is predicted as `level * factor[weekday]`.
///
/// Immutable once fitted; share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandModel {
    pub(crate) model_id: ModelId,
    pub(crate) trained_at: DateTime<Utc>,
    pub(crate) cutoff: NaiveDate,
    pub(crate) alpha: f64,
    pub(crate) level: f64,
    /// Indexed by days from Monday (0 = Monday).
    pub(crate) weekday_factors: [f64; 7],
    pub(crate) observations: usize,
}

impl DemandModel {
    pub fn model_id(&self) -> ModelId {
        self.model_id
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    /// Last date of the history the model was fitted on.
    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn weekday_factors(&self) -> &[f64; 7] {
        &self.weekday_factors
    }

    /// Number of distinct days the model was fitted on.
    pub fn observations(&self) -> usize {
        self.observations
    }

    fn predict(&self, date: NaiveDate) -> f64 {
        let factor = self.weekday_factors[date.weekday().num_days_from_monday() as usize];
        (self.level * factor).max(0.0)
    }
}

impl ForecastProducer for DemandModel {
    fn forecast(&self, periods: usize) -> Result<ForecastSeries, ForecastError> {
        if periods == 0 {
            return Err(ForecastError::InvalidInput(
                "periods must be >= 1".to_string(),
            ));
        }

        let mut points = Vec::with_capacity(periods);
        for k in 1..=periods as u64 {
            let date = self.cutoff.checked_add_days(Days::new(k)).ok_or_else(|| {
                ForecastError::InferenceFailed(format!(
                    "forecast date {k} day(s) after {} is out of range",
                    self.cutoff
                ))
            })?;
            let point = ForecastPoint::new(date, self.predict(date))
                .map_err(|e| ForecastError::InferenceFailed(e.to_string()))?;
            points.push(point);
        }

        ForecastSeries::new(points).map_err(|e| ForecastError::InferenceFailed(e.to_string()))
    }
}

/// Fits a `DemandModel` from daily sales history.
#[derive(Debug, Clone)]
pub struct DemandModelTrainer {
    /// Smoothing constant in (0, 1); higher reacts faster to recent days.
    alpha: f64,
}

impl DemandModelTrainer {
    pub fn new() -> Self {
        Self {
            alpha: DEFAULT_SMOOTHING_ALPHA,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn fit(&self, history: &[SalesObservation]) -> Result<DemandModel, ForecastError> {
        if !(self.alpha.is_finite() && self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ForecastError::InvalidInput(format!(
                "smoothing alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }

        // Same-day rows (e.g. several source lines) are summed.
        let mut daily: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for obs in history {
            if !(obs.sales.is_finite() && obs.sales >= 0.0) {
                return Err(ForecastError::InvalidInput(format!(
                    "sales on {} must be a finite non-negative number, got {}",
                    obs.date, obs.sales
                )));
            }
            *daily.entry(obs.date).or_insert(0.0) += obs.sales;
        }

        let Some((&cutoff, _)) = daily.last_key_value() else {
            return Err(ForecastError::InsufficientHistory(
                "history is empty".to_string(),
            ));
        };

        let weekday_factors = weekday_factors(&daily);

        let mut level: Option<f64> = None;
        for (date, sales) in &daily {
            let factor = weekday_factors[date.weekday().num_days_from_monday() as usize];
            // A zero factor means this weekday never sells; it says nothing about level.
            if factor <= f64::EPSILON {
                continue;
            }
            let x = sales / factor;
            level = Some(match level {
                None => x,
                Some(s) => self.alpha * x + (1.0 - self.alpha) * s,
            });
        }
        let level = level.unwrap_or(0.0);

        let model = DemandModel {
            model_id: ModelId::new(),
            trained_at: Utc::now(),
            cutoff,
            alpha: self.alpha,
            level,
            weekday_factors,
            observations: daily.len(),
        };

        info!(
            model_id = %model.model_id,
            observations = model.observations,
            cutoff = %model.cutoff,
            level = model.level,
            "demand model fitted"
        );

        Ok(model)
    }
}

impl Default for DemandModelTrainer {
    fn default() -> Self {
        Self::new()
    }
}

fn weekday_factors(daily: &BTreeMap<NaiveDate, f64>) -> [f64; 7] {
    let overall = mean(daily.values().copied());

    let mut buckets: [Vec<f64>; 7] = Default::default();
    for (date, sales) in daily {
        buckets[date.weekday().num_days_from_monday() as usize].push(*sales);
    }

    let mut factors = [1.0; 7];
    if overall <= f64::EPSILON {
        return factors;
    }
    for (factor, bucket) in factors.iter_mut().zip(buckets.iter()) {
        if !bucket.is_empty() {
            *factor = mean(bucket.iter().copied()) / overall;
        }
    }
    factors
}

fn mean(xs: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = xs.fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
    if n == 0 {
        return 0.0;
    }
    sum / (n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-01 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn history(days: u64, sales: impl Fn(NaiveDate) -> f64) -> Vec<SalesObservation> {
        (0..days)
            .map(|i| {
                let date = monday() + Days::new(i);
                SalesObservation {
                    date,
                    sales: sales(date),
                }
            })
            .collect()
    }

    #[test]
    fn flat_history_forecasts_flat_demand() {
        let model = DemandModelTrainer::new()
            .fit(&history(28, |_| 10.0))
            .unwrap();
        let series = model.forecast(10).unwrap();

        assert_eq!(series.len(), 10);
        for p in series.points() {
            assert!((p.predicted_demand() - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn forecast_starts_the_day_after_cutoff() {
        let model = DemandModelTrainer::new()
            .fit(&history(14, |_| 3.0))
            .unwrap();
        assert_eq!(model.cutoff(), monday() + Days::new(13));

        let series = model.forecast(30).unwrap();
        assert_eq!(series.first_date(), Some(monday() + Days::new(14)));
        for pair in series.points().windows(2) {
            assert_eq!(pair[1].date(), pair[0].date() + Days::new(1));
        }
    }

    #[test]
    fn weekly_pattern_is_carried_into_the_forecast() {
        let weekend_heavy = |d: NaiveDate| if d.weekday().number_from_monday() >= 6 { 20.0 } else { 10.0 };
        let model = DemandModelTrainer::new()
            .fit(&history(28, weekend_heavy))
            .unwrap();

        let series = model.forecast(7).unwrap();
        for p in series.points() {
            let expected = weekend_heavy(p.date());
            assert!(
                (p.predicted_demand() - expected).abs() < 1e-9,
                "{}: got {}, expected {expected}",
                p.date(),
                p.predicted_demand()
            );
        }
    }

    #[test]
    fn closed_weekday_forecasts_zero() {
        let closed_sundays = |d: NaiveDate| if d.weekday().number_from_monday() == 7 { 0.0 } else { 12.0 };
        let model = DemandModelTrainer::new()
            .fit(&history(21, closed_sundays))
            .unwrap();

        let series = model.forecast(7).unwrap();
        for p in series.points() {
            assert!((p.predicted_demand() - closed_sundays(p.date())).abs() < 1e-9);
        }
    }

    #[test]
    fn same_day_rows_are_summed() {
        let mut h = history(7, |_| 4.0);
        h.extend(history(7, |_| 6.0));
        let model = DemandModelTrainer::new().fit(&h).unwrap();

        assert_eq!(model.observations(), 7);
        assert!((model.level() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn all_zero_history_forecasts_zero() {
        let model = DemandModelTrainer::new().fit(&history(10, |_| 0.0)).unwrap();
        let series = model.forecast(5).unwrap();
        assert!(series.points().iter().all(|p| p.predicted_demand() == 0.0));
    }

    #[test]
    fn empty_history_cannot_be_fitted() {
        let err = DemandModelTrainer::new().fit(&[]).unwrap_err();
        assert!(matches!(err, ForecastError::InsufficientHistory(_)));
    }

    #[test]
    fn negative_sales_are_rejected() {
        let err = DemandModelTrainer::new()
            .fit(&history(3, |_| -1.0))
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidInput(_)));
    }

    #[test]
    fn alpha_outside_unit_interval_is_rejected() {
        for alpha in [0.0, 1.0, -0.2, f64::NAN] {
            let err = DemandModelTrainer::new()
                .with_alpha(alpha)
                .fit(&history(3, |_| 1.0))
                .unwrap_err();
            assert!(matches!(err, ForecastError::InvalidInput(_)));
        }
    }

    #[test]
    fn zero_periods_is_invalid() {
        let model = DemandModelTrainer::new().fit(&history(3, |_| 1.0)).unwrap();
        assert!(matches!(
            model.forecast(0).unwrap_err(),
            ForecastError::InvalidInput(_)
        ));
    }

    #[test]
    fn recent_days_weigh_more_than_old_ones() {
        let step_up = |d: NaiveDate| if d < monday() + Days::new(21) { 10.0 } else { 30.0 };
        let model = DemandModelTrainer::new()
            .with_alpha(0.5)
            .fit(&history(28, step_up))
            .unwrap();
        assert!(model.level() > 20.0);
    }
}
