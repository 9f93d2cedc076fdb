//! Forecast value objects: one predicted day, and an ordered run of days.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// One day's predicted unit demand.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawForecastPoint")]
pub struct ForecastPoint {
    date: NaiveDate,
    predicted_demand: f64,
}

impl ForecastPoint {
    /// Build a point, rejecting negative or non-finite demand.
    pub fn new(date: NaiveDate, predicted_demand: f64) -> DomainResult<Self> {
        if !predicted_demand.is_finite() {
            return Err(DomainError::validation(format!(
                "predicted_demand for {date} must be finite"
            )));
        }
        if predicted_demand < 0.0 {
            return Err(DomainError::validation(format!(
                "predicted_demand for {date} cannot be negative (got {predicted_demand})"
            )));
        }
        Ok(Self {
            date,
            predicted_demand,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn predicted_demand(&self) -> f64 {
        self.predicted_demand
    }
}

impl ValueObject for ForecastPoint {}

/// Ordered sequence of forecast points, earliest first.
///
/// Dates are strictly ascending; this is checked once at construction so
/// consumers can take a prefix as "the next N days" without re-validating.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawForecastSeries")]
pub struct ForecastSeries {
    points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(points: Vec<ForecastPoint>) -> DomainResult<Self> {
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(DomainError::invariant(format!(
                    "forecast dates must be strictly ascending ({} followed by {})",
                    pair[0].date, pair[1].date
                )));
            }
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// The nearest-future `days` points, or `None` if the series is shorter.
    pub fn window(&self, days: usize) -> Option<&[ForecastPoint]> {
        self.points.get(..days)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn into_points(self) -> Vec<ForecastPoint> {
        self.points
    }
}

impl ValueObject for ForecastSeries {}

#[derive(Deserialize)]
struct RawForecastPoint {
    date: NaiveDate,
    predicted_demand: f64,
}

impl TryFrom<RawForecastPoint> for ForecastPoint {
    type Error = DomainError;

    fn try_from(raw: RawForecastPoint) -> DomainResult<Self> {
        ForecastPoint::new(raw.date, raw.predicted_demand)
    }
}

#[derive(Deserialize)]
struct RawForecastSeries {
    points: Vec<ForecastPoint>,
}

impl TryFrom<RawForecastSeries> for ForecastSeries {
    type Error = DomainError;

    fn try_from(raw: RawForecastSeries) -> DomainResult<Self> {
        ForecastSeries::new(raw.points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn point_rejects_negative_demand() {
        let err = ForecastPoint::new(day(1), -0.5).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn point_rejects_nan_and_infinity() {
        assert!(ForecastPoint::new(day(1), f64::NAN).is_err());
        assert!(ForecastPoint::new(day(1), f64::INFINITY).is_err());
    }

    #[test]
    fn zero_demand_is_a_valid_point() {
        let p = ForecastPoint::new(day(1), 0.0).unwrap();
        assert_eq!(p.predicted_demand(), 0.0);
    }

    #[test]
    fn series_rejects_descending_dates() {
        let points = vec![
            ForecastPoint::new(day(2), 1.0).unwrap(),
            ForecastPoint::new(day(1), 1.0).unwrap(),
        ];
        let err = ForecastSeries::new(points).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn series_rejects_duplicate_dates() {
        let points = vec![
            ForecastPoint::new(day(1), 1.0).unwrap(),
            ForecastPoint::new(day(1), 2.0).unwrap(),
        ];
        assert!(ForecastSeries::new(points).is_err());
    }

    #[test]
    fn window_takes_the_earliest_points() {
        let points = (1..=4)
            .map(|d| ForecastPoint::new(day(d), d as f64).unwrap())
            .collect();
        let series = ForecastSeries::new(points).unwrap();

        let w = series.window(2).unwrap();
        assert_eq!(w.len(), 2);
        assert_eq!(w[0].date(), day(1));
        assert_eq!(w[1].date(), day(2));
        assert!(series.window(5).is_none());
    }

    #[test]
    fn deserialize_applies_the_same_checks() {
        let ok = r#"{"points":[{"date":"2024-03-01","predicted_demand":2.5}]}"#;
        let series: ForecastSeries = serde_json::from_str(ok).unwrap();
        assert_eq!(series.len(), 1);

        let unordered = r#"{"points":[
            {"date":"2024-03-02","predicted_demand":1.0},
            {"date":"2024-03-01","predicted_demand":1.0}
        ]}"#;
        assert!(serde_json::from_str::<ForecastSeries>(unordered).is_err());

        let negative = r#"{"points":[{"date":"2024-03-01","predicted_demand":-1.0}]}"#;
        assert!(serde_json::from_str::<ForecastSeries>(negative).is_err());
    }
}
