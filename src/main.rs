// src/main.rs

use clap::{Parser, ValueHint};
use log::{info, warn};
use std::error::Error;
use std::path::PathBuf;

use spatial_tracking_render::config::{ConfigOverrides, FileConfig, PlotStyle, RenderConfig};
use spatial_tracking_render::crate_version;
use spatial_tracking_render::data_analysis::metric_summary::summarize_metric;
use spatial_tracking_render::data_input::sample_reader::read_samples;
use spatial_tracking_render::plot_functions::plot_metric_hexbin::plot_metric_hexbin;
use spatial_tracking_render::plot_functions::plot_metric_scatter::plot_metric_scatter;

#[derive(Parser)]
#[command(
    version = crate_version(),
    about = "Renders a hexbin map of the metric in a spatial-tracking sample file"
)]
struct Cli {
    /// Sample file, one `(x, y, z)[, (px, py, pz)], metric[, confidence]` per line
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// TOML file providing any of: input_path, output_path, gridsize, style, title
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Output PNG path [default: <input stem>_<style>.png]
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Hexagons across the X axis, at most 10000 [default: 50]
    #[arg(long)]
    gridsize: Option<usize>,

    /// Plot style [default: hexbin]
    #[arg(long, value_enum)]
    style: Option<PlotStyle>,

    /// Chart title
    #[arg(long)]
    title: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input_path: self.input.clone(),
            output_path: self.output.clone(),
            gridsize: self.gridsize,
            style: self.style,
            title: self.title.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let file_config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let config = RenderConfig::resolve(file_config, cli.overrides())?;
    let root_name = config.root_name();

    // --- Data Reading ---
    // Any unreadable or malformed line aborts here, before a plot is written.
    let columns = read_samples(&config.input_path)?;

    // --- Summary ---
    let summary = summarize_metric(&columns.metric);
    info!("Metric: {summary}");

    // --- Plotting ---
    let output_file = config.output_path.to_string_lossy().into_owned();
    info!("--- Generating {:?} plot ---", config.style);
    let plot_drawn = match config.style {
        PlotStyle::Hexbin => plot_metric_hexbin(
            &columns,
            &root_name,
            &output_file,
            config.gridsize,
            config.title.as_deref(),
        )?,
        PlotStyle::Scatter => {
            plot_metric_scatter(&columns, &root_name, &output_file, config.title.as_deref())?
        }
    };
    if !plot_drawn {
        warn!(
            "No finite samples in '{}' to plot",
            config.input_path.display()
        );
    }

    Ok(())
}

// src/main.rs
