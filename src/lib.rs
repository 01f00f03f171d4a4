pub mod app;
pub mod chart;
pub mod config;
pub mod load;
pub mod series;

pub use app::{App, AppError};
pub use chart::{render::ChartRenderer, LineChart};
pub use config::ChartConfig;
pub use load::{picker::FilePicker, LoadError};
pub use series::{Series, SeriesError};
