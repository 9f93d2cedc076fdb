//! Daily sales history used to fit forecast models.
//!
//! Expects a CSV with a header row containing at least
//! `date,store_nbr,family,sales`; any other columns are ignored.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ForecastError;

/// One day's observed sales for the selected item.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesObservation {
    pub date: NaiveDate,
    pub sales: f64,
}

/// Which store/product-family rows to keep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySelection {
    pub store_nbr: u32,
    pub family: String,
}

impl HistorySelection {
    pub fn new(store_nbr: u32, family: impl Into<String>) -> Self {
        Self {
            store_nbr,
            family: family.into(),
        }
    }

    fn matches(&self, record: &SalesRecord) -> bool {
        record.store_nbr == self.store_nbr && record.family == self.family
    }
}

impl Default for HistorySelection {
    fn default() -> Self {
        Self::new(1, "GROCERY I")
    }
}

#[derive(Debug, Deserialize)]
struct SalesRecord {
    date: NaiveDate,
    store_nbr: u32,
    family: String,
    sales: f64,
}

/// Read matching observations from CSV.
///
/// Only the first `max_rows` data rows are considered (before filtering),
/// which keeps training on very large exports bounded.
pub fn read_history<R: Read>(
    reader: R,
    selection: &HistorySelection,
    max_rows: Option<usize>,
) -> Result<Vec<SalesObservation>, ForecastError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for (row, result) in rdr.deserialize::<SalesRecord>().enumerate() {
        if max_rows.is_some_and(|max| row >= max) {
            break;
        }
        let record =
            result.map_err(|e| ForecastError::History(format!("data row {}: {e}", row + 1)))?;
        if selection.matches(&record) {
            out.push(SalesObservation {
                date: record.date,
                sales: record.sales,
            });
        }
    }

    Ok(out)
}

pub fn load_history_file(
    path: &Path,
    selection: &HistorySelection,
    max_rows: Option<usize>,
) -> Result<Vec<SalesObservation>, ForecastError> {
    let file = File::open(path)
        .map_err(|e| ForecastError::History(format!("{}: {e}", path.display())))?;
    let observations = read_history(BufReader::new(file), selection, max_rows)?;

    info!(
        path = %path.display(),
        store_nbr = selection.store_nbr,
        family = %selection.family,
        observations = observations.len(),
        "sales history loaded"
    );

    Ok(observations)
}
