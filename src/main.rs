use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use datechart::{
    app::{App, Loaded},
    chart::render::PlottersRenderer,
    config::ChartConfig,
    load::picker::GlobPicker,
    Series,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Chart date/value pairs from a JSON file
#[derive(Parser, Debug)]
#[command(name = "datechart", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the file at PATH and draw its chart
    Open {
        path: String,

        #[command(flatten)]
        out: OutputArgs,
    },
    /// List the *.json files in a directory, or load one with --pick
    Choose {
        /// Directory to look in
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// 1-based number of the file to load
        #[arg(long)]
        pick: Option<usize>,

        #[command(flatten)]
        out: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Chart image to write (.svg or .png); overrides the config file
    #[arg(long)]
    out: Option<PathBuf>,

    /// YAML file with chart settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also print the loaded series
    #[arg(long)]
    print: bool,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Open { path, out } => {
            let mut app = build_app(&out)?;
            app.set_path(path);
            let loaded = app.open().context("open failed")?;
            finish(&app, loaded, out.print);
        }
        Command::Choose { dir, pick, out } => {
            let picker = GlobPicker::new(&dir).with_selection(pick);
            if pick.is_none() {
                let candidates = picker
                    .candidates()
                    .with_context(|| format!("listing {}", dir.display()))?;
                if candidates.is_empty() {
                    info!("no *.json files in {}", dir.display());
                }
                for (i, path) in candidates.iter().enumerate() {
                    println!("{:>3}  {}", i + 1, path.display());
                }
                return Ok(());
            }
            let mut app = build_app(&out)?;
            let loaded = app.choose(&picker).context("choose failed")?;
            finish(&app, loaded, out.print);
        }
    }

    Ok(())
}

fn build_app(out: &OutputArgs) -> Result<App<PlottersRenderer>> {
    let mut cfg = ChartConfig::load(out.config.as_deref()).context("loading chart config")?;
    if let Some(path) = &out.out {
        cfg.output = path.clone();
    }
    let renderer = PlottersRenderer::new(cfg.output.clone());
    Ok(App::new(cfg, renderer))
}

fn finish(app: &App<PlottersRenderer>, loaded: Loaded, print: bool) {
    match loaded {
        Loaded::Shown { points } => {
            info!(
                "{} points from {} → {}",
                points,
                app.path(),
                app.renderer().output().display()
            );
        }
        Loaded::Empty => info!("{} has no entries; nothing drawn", app.path()),
    }
    if print {
        if let Some(series) = app.series() {
            print_series(series);
        }
    }
}

fn print_series(series: &Series) {
    for (date, value) in series.iter() {
        println!("{}\t{}", date.format("%Y-%m-%d"), value);
    }
}
