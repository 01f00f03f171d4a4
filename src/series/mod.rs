// src/series/mod.rs

pub mod date_parser;
pub mod types;

use chrono::NaiveDate;
use std::collections::{btree_map, BTreeMap};
use thiserror::Error;
use tracing::{debug, error};

pub use date_parser::parse_date;
use types::Document;

#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("entry {index}: invalid date {raw:?}, expected YYYY/MM/DD")]
    InvalidDate { index: usize, raw: String },

    #[error("entry {index}: value {raw:?} is not an integer")]
    InvalidValue { index: usize, raw: String },
}

/// Date → value, one value per date, iterated in ascending date order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Series {
    points: BTreeMap<NaiveDate, i64>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, date: &NaiveDate) -> Option<i64> {
        self.points.get(date).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, i64)> + '_ {
        self.points.iter().map(|(d, v)| (*d, *v))
    }

    /// First and last date, if any.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = *self.points.keys().next()?;
        let last = *self.points.keys().next_back()?;
        Some((first, last))
    }

    /// Smallest and largest value, if any.
    pub fn value_span(&self) -> Option<(i64, i64)> {
        let min = self.points.values().min()?;
        let max = self.points.values().max()?;
        Some((*min, *max))
    }
}

impl FromIterator<(NaiveDate, i64)> for Series {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, i64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Series {
    type Item = (NaiveDate, i64);
    type IntoIter = btree_map::IntoIter<NaiveDate, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

/// Decode `{"Dependence": [{"Date": "YYYY/MM/DD", "Value": "<int>"}, ...]}`.
/// A repeated date keeps the last value seen.
pub fn parse_series(bytes: &[u8]) -> Result<Series, SeriesError> {
    let doc: Document = serde_json::from_slice(bytes)?;

    let mut points = BTreeMap::new();
    for (index, entry) in doc.dependence.into_iter().enumerate() {
        let date = parse_date(&entry.date).ok_or_else(|| SeriesError::InvalidDate {
            index,
            raw: entry.date.clone(),
        })?;
        let value = entry.value.as_int().ok_or_else(|| SeriesError::InvalidValue {
            index,
            raw: entry.value.raw(),
        })?;
        if let Some(prev) = points.insert(date, value) {
            debug!(%date, prev, value, "duplicate date, keeping later value");
        }
    }

    Ok(Series { points })
}

/// Like [`parse_series`], but a failure yields an empty series alongside the
/// error so the caller can report it and carry on.
pub fn parse_series_or_empty(bytes: &[u8]) -> (Series, Option<SeriesError>) {
    match parse_series(bytes) {
        Ok(series) => (series, None),
        Err(e) => {
            error!("parse failed: {}", e);
            (Series::new(), Some(e))
        }
    }
}
