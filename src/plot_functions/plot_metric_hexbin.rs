// src/plot_functions/plot_metric_hexbin.rs

use log::{info, warn};
use std::error::Error;

use crate::data_analysis::hexbin::{hexbin_mean, HexbinGrid};
use crate::data_input::sample::SampleColumns;
use crate::plot_framework::{draw_hexbin_plot, ColorScale, HexagonCell, HexbinPlotConfig};

pub const HEXBIN_PLOT_TYPE_NAME: &str = "Metric Hexbin";

/// Turns a populated grid into a plot config. `None` when no hexagon holds data.
pub fn build_hexbin_config(grid: &HexbinGrid, title: &str) -> Option<HexbinPlotConfig> {
    let (min_mean, max_mean) = grid.mean_range()?;
    let ((x_min, x_max), (y_min, y_max)) = grid.plot_extent();

    let hexagons = grid
        .bins
        .iter()
        .map(|bin| HexagonCell {
            vertices: grid.hexagon_vertices(bin.center),
            value: bin.mean,
        })
        .collect();

    Some(HexbinPlotConfig {
        title: title.to_string(),
        x_range: x_min..x_max,
        y_range: y_min..y_max,
        x_label: "X".to_string(),
        y_label: "Y".to_string(),
        hexagons,
        color_scale: ColorScale::new(min_mean, max_mean, "Mean metric"),
    })
}

/// Generates the hexbin map of the mean metric over the X/Y plane.
/// Returns whether any hexagon was plotted.
pub fn plot_metric_hexbin(
    columns: &SampleColumns,
    root_name: &str,
    output_file: &str,
    gridsize: usize,
    title: Option<&str>,
) -> Result<bool, Box<dyn Error>> {
    let grid = hexbin_mean(&columns.x, &columns.y, &columns.metric, gridsize)?;

    info!(
        "Hexbin: {} x {} lattice, {} populated hexagons",
        grid.nx,
        grid.ny,
        grid.bins.len()
    );
    if grid.skipped > 0 {
        warn!(
            "  {} of {} samples left out of the hexbin (non-finite position or metric)",
            grid.skipped,
            columns.len()
        );
    }

    let default_title = format!("Mean metric per hexagon (gridsize {gridsize})");
    let plot_config = build_hexbin_config(&grid, title.unwrap_or(&default_title));

    draw_hexbin_plot(
        output_file,
        root_name,
        HEXBIN_PLOT_TYPE_NAME,
        plot_config.as_ref(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_covers_every_hexagon() {
        let x = [-1.0, 1.0, 0.0, 0.5];
        let y = [-1.0, 1.0, 0.0, -0.5];
        let metric = [1.0, 2.0, 3.0, 4.0];
        let grid = hexbin_mean(&x, &y, &metric, 10).unwrap();

        let config = build_hexbin_config(&grid, "Title").unwrap();
        assert_eq!(config.hexagons.len(), grid.bins.len());
        assert_eq!(config.color_scale.min, 1.0);
        assert_eq!(config.color_scale.max, 4.0);

        for cell in &config.hexagons {
            for &(vx, vy) in &cell.vertices {
                assert!(config.x_range.start <= vx + 1e-12 && vx <= config.x_range.end + 1e-12);
                assert!(config.y_range.start <= vy + 1e-12 && vy <= config.y_range.end + 1e-12);
            }
        }
    }

    #[test]
    fn test_empty_grid_has_no_config() {
        let grid = hexbin_mean(&[], &[], &[], 10).unwrap();
        assert!(build_hexbin_config(&grid, "Title").is_none());
    }
}

// src/plot_functions/plot_metric_hexbin.rs
