//! Environment-driven configuration for the server and training binaries.
//!
//! Values are read once at startup. `from_lookup` takes any key → value
//! function so tests never have to touch the process environment.

use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use stockpilot_forecast::{DEFAULT_SMOOTHING_ALPHA, HistorySelection};

pub const BIND_ADDR: &str = "STOCKPILOT_BIND_ADDR";
pub const MODEL_PATH: &str = "STOCKPILOT_MODEL_PATH";
pub const FORECAST_HORIZON_DAYS: &str = "STOCKPILOT_FORECAST_HORIZON_DAYS";
pub const HISTORY_CSV: &str = "STOCKPILOT_HISTORY_CSV";
pub const STORE_NBR: &str = "STOCKPILOT_STORE_NBR";
pub const FAMILY: &str = "STOCKPILOT_FAMILY";
pub const MAX_ROWS: &str = "STOCKPILOT_MAX_ROWS";
pub const SMOOTHING_ALPHA: &str = "STOCKPILOT_SMOOTHING_ALPHA";

const DEFAULT_BIND_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8000);
const DEFAULT_MODEL_PATH: &str = "models/forecast_model.json";
const DEFAULT_FORECAST_HORIZON_DAYS: usize = 30;
const DEFAULT_HISTORY_CSV: &str = "data/train.csv";
const DEFAULT_MAX_ROWS: usize = 50_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Settings for the HTTP server.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub model_path: PathBuf,
    /// Days requested from the forecast producer per request.
    pub forecast_horizon_days: usize,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = parse_or(&lookup, BIND_ADDR, || DEFAULT_BIND_ADDR)?;
        let model_path = lookup(MODEL_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));
        let forecast_horizon_days =
            parse_or(&lookup, FORECAST_HORIZON_DAYS, || DEFAULT_FORECAST_HORIZON_DAYS)?;

        if forecast_horizon_days == 0 {
            return Err(ConfigError::Invalid {
                key: FORECAST_HORIZON_DAYS,
                reason: "must be at least 1 day".to_string(),
            });
        }

        Ok(Self {
            bind_addr,
            model_path,
            forecast_horizon_days,
        })
    }
}

/// Settings for the `stockpilot-train` binary.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub history_csv: PathBuf,
    pub selection: HistorySelection,
    /// `None` reads the whole file.
    pub max_rows: Option<usize>,
    pub smoothing_alpha: f64,
    pub model_path: PathBuf,
}

impl TrainConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = HistorySelection::default();

        let history_csv = lookup(HISTORY_CSV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_CSV));
        let store_nbr = parse_or(&lookup, STORE_NBR, || defaults.store_nbr)?;
        let family = lookup(FAMILY).unwrap_or(defaults.family);
        // 0 means "no limit".
        let max_rows = parse_or(&lookup, MAX_ROWS, || DEFAULT_MAX_ROWS)?;
        let smoothing_alpha = parse_or(&lookup, SMOOTHING_ALPHA, || DEFAULT_SMOOTHING_ALPHA)?;
        let model_path = lookup(MODEL_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

        Ok(Self {
            history_csv,
            selection: HistorySelection::new(store_nbr, family),
            max_rows: (max_rows > 0).then_some(max_rows),
            smoothing_alpha,
            model_path,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: impl FnOnce() -> T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => Ok(default()),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("{raw:?}: {e}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn service_defaults() {
        let cfg = ServiceConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.model_path, PathBuf::from("models/forecast_model.json"));
        assert_eq!(cfg.forecast_horizon_days, 30);
    }

    #[test]
    fn service_overrides() {
        let cfg = ServiceConfig::from_lookup(env(&[
            (BIND_ADDR, "127.0.0.1:9100"),
            (MODEL_PATH, "/srv/model.json"),
            (FORECAST_HORIZON_DAYS, " 60 "),
        ]))
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 9100);
        assert_eq!(cfg.model_path, PathBuf::from("/srv/model.json"));
        assert_eq!(cfg.forecast_horizon_days, 60);
    }

    #[test]
    fn bad_values_name_the_variable() {
        let err = ServiceConfig::from_lookup(env(&[(FORECAST_HORIZON_DAYS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: FORECAST_HORIZON_DAYS, .. }));

        let err = ServiceConfig::from_lookup(env(&[(FORECAST_HORIZON_DAYS, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: FORECAST_HORIZON_DAYS, .. }));

        let err = ServiceConfig::from_lookup(env(&[(BIND_ADDR, "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: BIND_ADDR, .. }));
    }

    #[test]
    fn train_defaults_follow_the_reference_dataset() {
        let cfg = TrainConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(cfg.history_csv, PathBuf::from("data/train.csv"));
        assert_eq!(cfg.selection, HistorySelection::new(1, "GROCERY I"));
        assert_eq!(cfg.max_rows, Some(50_000));
        assert_eq!(cfg.smoothing_alpha, DEFAULT_SMOOTHING_ALPHA);
    }

    #[test]
    fn zero_max_rows_reads_everything() {
        let cfg = TrainConfig::from_lookup(env(&[(MAX_ROWS, "0"), (FAMILY, "BEVERAGES")])).unwrap();
        assert_eq!(cfg.max_rows, None);
        assert_eq!(cfg.selection.family, "BEVERAGES");
    }
}
