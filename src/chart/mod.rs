// src/chart/mod.rs

pub mod render;

use crate::config::ChartConfig;
use crate::series::{
    date_parser::{date_to_millis, millis_to_date},
    Series,
};
use std::fmt::Write;

const DAY_MILLIS: i64 = 86_400_000;
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything a renderer needs to draw one line chart. X is millis since the
/// epoch (UTC midnight of each date), Y the series value.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub date_format: String,
    pub x_ticks: usize,
    pub y_ticks: usize,
    pub size: (u32, u32),
    pub points: Vec<(i64, i64)>,
    pub x_range: (i64, i64),
    pub y_range: (i64, i64),
}

impl LineChart {
    /// `None` for an empty series: there is nothing to draw.
    pub fn build(series: &Series, cfg: &ChartConfig) -> Option<Self> {
        let (first, last) = series.date_span()?;
        let (min, max) = series.value_span()?;

        let points: Vec<(i64, i64)> = series
            .iter()
            .map(|(date, value)| (date_to_millis(date), value))
            .collect();

        let (x_lo, x_hi) = (date_to_millis(first), date_to_millis(last));
        let x_range = if x_lo == x_hi {
            (x_lo - DAY_MILLIS, x_hi + DAY_MILLIS)
        } else {
            (x_lo, x_hi)
        };

        Some(Self {
            title: cfg.title.clone(),
            x_title: cfg.x_title.clone(),
            y_title: cfg.y_title.clone(),
            date_format: cfg.date_format.clone(),
            x_ticks: cfg.x_ticks.max(2),
            y_ticks: cfg.y_ticks.max(2),
            size: (cfg.width, cfg.height),
            points,
            x_range,
            y_range: padded_range(min, max),
        })
    }

    /// Date label for an x coordinate. A format string chrono rejects falls
    /// back to ISO dates.
    pub fn x_label(&self, x: i64) -> String {
        let Some(date) = millis_to_date(x) else {
            return String::new();
        };
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            out.clear();
            let _ = write!(out, "{}", date.format(FALLBACK_DATE_FORMAT));
        }
        out
    }
}

/// Y range with 10% headroom on both sides, at least 1.
fn padded_range(min: i64, max: i64) -> (i64, i64) {
    let padding = ((max.saturating_sub(min)) as f64 * 0.1).max(1.0) as i64;
    (min.saturating_sub(padding), max.saturating_add(padding))
}
