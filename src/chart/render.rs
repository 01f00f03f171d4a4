use super::LineChart;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("cannot create output directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("drawing failed: {0}")]
    Backend(String),
}

fn backend<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Backend(e.to_string())
}

/// Displays a chart. Each call replaces whatever was shown before.
pub trait ChartRenderer {
    fn render(&mut self, chart: &LineChart) -> Result<(), ChartError>;
}

/// Draws into an image file with plotters: PNG for a `.png` path, SVG otherwise.
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    output: PathBuf,
}

impl PlottersRenderer {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    fn is_png(&self) -> bool {
        self.output
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"))
    }
}

impl ChartRenderer for PlottersRenderer {
    fn render(&mut self, chart: &LineChart) -> Result<(), ChartError> {
        if let Some(parent) = self.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ChartError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        if self.is_png() {
            let root = BitMapBackend::new(&self.output, chart.size).into_drawing_area();
            draw(&root, chart)?;
        } else {
            let root = SVGBackend::new(&self.output, chart.size).into_drawing_area();
            draw(&root, chart)?;
        }

        info!(path = %self.output.display(), points = chart.points.len(), "chart written");
        Ok(())
    }
}

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &LineChart,
) -> Result<(), ChartError> {
    root.fill(&WHITE).map_err(backend)?;

    let mut cc = ChartBuilder::on(root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(
            chart.x_range.0..chart.x_range.1,
            chart.y_range.0..chart.y_range.1,
        )
        .map_err(backend)?;

    cc.configure_mesh()
        .x_desc(chart.x_title.as_str())
        .y_desc(chart.y_title.as_str())
        .x_labels(chart.x_ticks)
        .y_labels(chart.y_ticks)
        .x_label_formatter(&|x| chart.x_label(*x))
        .y_label_formatter(&|y| y.to_string())
        .draw()
        .map_err(backend)?;

    // no legend: a single unnamed series
    cc.draw_series(LineSeries::new(
        chart.points.iter().copied(),
        BLUE.stroke_width(2),
    ))
    .map_err(backend)?;

    root.present().map_err(backend)?;
    Ok(())
}
