// src/plot_functions/plot_metric_scatter.rs

use log::warn;
use std::error::Error;

use crate::data_input::sample::SampleColumns;
use crate::plot_framework::{calculate_range, draw_scatter_plot, ColorScale, ScatterPlotConfig};

pub const SCATTER_PLOT_TYPE_NAME: &str = "Metric Scatter";

/// Builds a scatter config from every sample with a finite position and metric.
pub fn build_scatter_config(columns: &SampleColumns, title: &str) -> Option<ScatterPlotConfig> {
    let points: Vec<(f64, f64, f64)> = columns
        .x
        .iter()
        .zip(&columns.y)
        .zip(&columns.metric)
        .map(|((&x, &y), &metric)| (x, y, metric))
        .filter(|(x, y, metric)| x.is_finite() && y.is_finite() && metric.is_finite())
        .collect();

    if points.is_empty() {
        return None;
    }

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    let mut metric_min = f64::INFINITY;
    let mut metric_max = f64::NEG_INFINITY;
    for &(x, y, metric) in &points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
        metric_min = metric_min.min(metric);
        metric_max = metric_max.max(metric);
    }

    let (x_start, x_end) = calculate_range(x_min, x_max);
    let (y_start, y_end) = calculate_range(y_min, y_max);

    Some(ScatterPlotConfig {
        title: title.to_string(),
        x_range: x_start..x_end,
        y_range: y_start..y_end,
        x_label: "X".to_string(),
        y_label: "Y".to_string(),
        points,
        color_scale: ColorScale::new(metric_min, metric_max, "Metric"),
    })
}

/// Generates one dot per sample, colored by its metric.
/// Returns whether any sample was plotted.
pub fn plot_metric_scatter(
    columns: &SampleColumns,
    root_name: &str,
    output_file: &str,
    title: Option<&str>,
) -> Result<bool, Box<dyn Error>> {
    let plot_config = build_scatter_config(columns, title.unwrap_or("Metric per sample"));

    let plotted = plot_config.as_ref().map_or(0, |config| config.points.len());
    if plotted < columns.len() {
        warn!(
            "  {} of {} samples left out of the scatter plot (non-finite position or metric)",
            columns.len() - plotted,
            columns.len()
        );
    }

    draw_scatter_plot(
        output_file,
        root_name,
        SCATTER_PLOT_TYPE_NAME,
        plot_config.as_ref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_input::sample::Sample;

    #[test]
    fn test_scatter_config_skips_non_finite() {
        let columns: SampleColumns = vec![
            Sample::new([0.0, 0.0, 0.0], 1.0),
            Sample::new([1.0, 2.0, 0.0], f64::NAN),
            Sample::new([2.0, 4.0, 0.0], 3.0),
        ]
        .into_iter()
        .collect();

        let config = build_scatter_config(&columns, "Title").unwrap();
        assert_eq!(config.points, vec![(0.0, 0.0, 1.0), (2.0, 4.0, 3.0)]);
        assert_eq!(config.color_scale.min, 1.0);
        assert_eq!(config.color_scale.max, 3.0);
        assert!(config.x_range.start < 0.0 && config.x_range.end > 2.0);
        assert!(config.y_range.start < 0.0 && config.y_range.end > 4.0);
    }

    #[test]
    fn test_scatter_config_none_without_points() {
        assert!(build_scatter_config(&SampleColumns::default(), "Title").is_none());
    }
}

// src/plot_functions/plot_metric_scatter.rs
