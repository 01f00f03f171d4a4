// src/app.rs

use crate::chart::{
    render::{ChartError, ChartRenderer},
    LineChart,
};
use crate::config::ChartConfig;
use crate::load::{self, picker::FilePicker, LoadError};
use crate::series::{parse_series, Series, SeriesError};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Parse(#[from] SeriesError),

    #[error(transparent)]
    Render(#[from] ChartError),
}

/// Result of a load that got through parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loaded {
    /// A chart of this many points replaced the previous one.
    Shown { points: usize },
    /// The file held no entries; the previous chart stays up.
    Empty,
}

/// The application state: the path text, the series on display and where
/// charts go. A failed load leaves all of it untouched.
pub struct App<R: ChartRenderer> {
    path: String,
    shown: Option<Series>,
    cfg: ChartConfig,
    renderer: R,
}

impl<R: ChartRenderer> App<R> {
    pub fn new(cfg: ChartConfig, renderer: R) -> Self {
        Self {
            path: String::new(),
            shown: None,
            cfg,
            renderer,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, text: impl Into<String>) {
        self.path = text.into();
    }

    /// "Open" only makes sense with something in the path field.
    pub fn open_enabled(&self) -> bool {
        !self.path.is_empty()
    }

    pub fn series(&self) -> Option<&Series> {
        self.shown.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Load the file named in the path field and display it.
    pub fn open(&mut self) -> Result<Loaded, AppError> {
        let path = self.path.clone();
        self.load(&path).inspect_err(|e| error!("open failed: {}", e))
    }

    /// Ask `picker` for a file; if it checks out, put it in the path field,
    /// then load and display it. A cancelled pick is an empty path.
    pub fn choose<P: FilePicker>(&mut self, picker: &P) -> Result<Loaded, AppError> {
        let picked = picker
            .pick()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        let result = load::check_path(&picked)
            .map_err(AppError::from)
            .and_then(|_| {
                self.set_path(picked.as_str());
                self.load(&picked)
            });
        result.inspect_err(|e| error!("choose failed: {}", e))
    }

    fn load(&mut self, path: &str) -> Result<Loaded, AppError> {
        let bytes = load::read_file(path)?;
        let series = parse_series(&bytes)?;

        let Some(chart) = LineChart::build(&series, &self.cfg) else {
            warn!(path, "no points to chart");
            return Ok(Loaded::Empty);
        };
        self.renderer.render(&chart)?;

        let points = series.len();
        info!(path, points, "series loaded");
        self.shown = Some(series);
        Ok(Loaded::Shown { points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::picker::GlobPicker;
    use anyhow::Result;
    use chrono::NaiveDate;
    use std::{fs, path::Path};
    use tempfile::tempdir;
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    fn init_test_logging() {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .finish();
        let _ = tracing::subscriber::set_global_default(subscriber);
    }

    #[derive(Default)]
    struct Recorder {
        charts: Vec<LineChart>,
        fail: bool,
    }

    impl ChartRenderer for Recorder {
        fn render(&mut self, chart: &LineChart) -> Result<(), ChartError> {
            if self.fail {
                return Err(ChartError::Backend("no display".into()));
            }
            self.charts.push(chart.clone());
            Ok(())
        }
    }

    fn app() -> App<Recorder> {
        App::new(ChartConfig::default(), Recorder::default())
    }

    fn write(dir: &Path, name: &str, body: &str) -> Result<String> {
        let path = dir.join(name);
        fs::write(&path, body)?;
        Ok(path.to_string_lossy().into_owned())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn open_enabled_follows_path_text() {
        let mut app = app();
        assert!(!app.open_enabled());
        app.set_path("data.json");
        assert!(app.open_enabled());
        app.set_path("");
        assert!(!app.open_enabled());
    }

    #[test]
    fn empty_path_fails_without_series() {
        init_test_logging();
        let mut app = app();
        let err = app.open().unwrap_err();
        assert!(matches!(err, AppError::Load(LoadError::EmptyPath)));
        assert!(app.series().is_none());
        assert!(app.renderer().charts.is_empty());
    }

    #[test]
    fn missing_file_is_not_found() -> Result<()> {
        let dir = tempdir()?;
        let mut app = app();
        app.set_path(dir.path().join("gone.json").to_string_lossy());
        assert!(matches!(app.open(), Err(AppError::Load(LoadError::NotFound(_)))));
        Ok(())
    }

    #[test]
    fn second_load_replaces_first() -> Result<()> {
        init_test_logging();
        let dir = tempdir()?;
        let first = write(
            dir.path(),
            "first.json",
            r#"{"Dependence":[{"Date":"2020/01/15","Value":"42"},{"Date":"2020/01/16","Value":"43"}]}"#,
        )?;
        let second = write(
            dir.path(),
            "second.json",
            r#"{"Dependence":[{"Date":"2021/06/01","Value":"-5"}]}"#,
        )?;

        let mut app = app();
        app.set_path(first);
        assert_eq!(app.open()?, Loaded::Shown { points: 2 });
        app.set_path(second);
        assert_eq!(app.open()?, Loaded::Shown { points: 1 });

        let shown = app.series().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown.get(&date(2021, 6, 1)), Some(-5));
        assert_eq!(shown.get(&date(2020, 1, 15)), None);
        assert_eq!(app.renderer().charts.len(), 2);
        assert_eq!(app.renderer().charts[1].points.len(), 1);
        Ok(())
    }

    #[test]
    fn failed_load_keeps_previous_display() -> Result<()> {
        let dir = tempdir()?;
        let good = write(
            dir.path(),
            "good.json",
            r#"{"Dependence":[{"Date":"2020/01/15","Value":"42"}]}"#,
        )?;
        let broken = write(dir.path(), "broken.json", "{not json")?;
        let empty = write(dir.path(), "empty.json", r#"{"Dependence":[]}"#)?;

        let mut app = app();
        app.set_path(good);
        app.open()?;

        app.set_path(broken);
        assert!(matches!(app.open(), Err(AppError::Parse(SeriesError::Json(_)))));
        app.set_path(empty);
        assert_eq!(app.open()?, Loaded::Empty);

        assert_eq!(app.series().unwrap().get(&date(2020, 1, 15)), Some(42));
        assert_eq!(app.renderer().charts.len(), 1);
        Ok(())
    }

    #[test]
    fn render_failure_abandons_load() -> Result<()> {
        let dir = tempdir()?;
        let good = write(
            dir.path(),
            "good.json",
            r#"{"Dependence":[{"Date":"2020/01/15","Value":"42"}]}"#,
        )?;
        let mut app = App::new(
            ChartConfig::default(),
            Recorder {
                fail: true,
                ..Recorder::default()
            },
        );
        app.set_path(good);
        assert!(matches!(app.open(), Err(AppError::Render(_))));
        assert!(app.series().is_none());
        Ok(())
    }

    #[test]
    fn choose_sets_path_and_loads() -> Result<()> {
        let dir = tempdir()?;
        let picked = write(
            dir.path(),
            "a.json",
            r#"{"Dependence":[{"Date":"2020/03/03","Value":"3"}]}"#,
        )?;
        write(dir.path(), "ignored.txt", "x")?;

        let mut app = app();
        let picker = GlobPicker::new(dir.path()).with_selection(Some(1));
        assert_eq!(app.choose(&picker)?, Loaded::Shown { points: 1 });
        assert_eq!(app.path(), picked);
        assert_eq!(app.series().unwrap().get(&date(2020, 3, 3)), Some(3));
        Ok(())
    }

    #[test]
    fn cancelled_choose_is_empty_path() -> Result<()> {
        let dir = tempdir()?;
        let mut app = app();
        app.set_path("keep.json");
        let picker = GlobPicker::new(dir.path());
        assert!(matches!(
            app.choose(&picker),
            Err(AppError::Load(LoadError::EmptyPath))
        ));
        assert_eq!(app.path(), "keep.json");
        Ok(())
    }
}
