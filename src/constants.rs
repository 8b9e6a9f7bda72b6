// src/constants.rs

use plotters::style::colors::full_palette::GREY;
use plotters::style::RGBColor;

// Plot dimensions.
pub const PLOT_WIDTH: u32 = 1920;
pub const PLOT_HEIGHT: u32 = 1080;

// Space reserved on the right of the figure for the colorbar.
pub const COLORBAR_AREA_WIDTH: u32 = 180;
pub const COLORBAR_LABEL_AREA_SIZE: i32 = 90;
pub const COLORBAR_STEPS: usize = 256;
pub const COLORBAR_LABEL_COUNT: usize = 10;

// Hexagons across the X axis when nothing else is configured.
pub const DEFAULT_GRIDSIZE: usize = 50;
// Upper bound on hexagons across X; far past this a hexagon is narrower than a pixel.
pub const MAX_GRIDSIZE: usize = 10_000;

// Scatter dot radius in pixels.
pub const SCATTER_POINT_RADIUS: i32 = 1;

// Font sizes.
pub const FONT_SIZE_MAIN_TITLE: i32 = 24;
pub const FONT_SIZE_CHART_TITLE: i32 = 20;
pub const FONT_SIZE_AXIS_LABEL: i32 = 15;
pub const FONT_SIZE_MESSAGE: i32 = 22;

// --- Plot Color Assignments ---
pub const COLOR_EMPTY_BIN: &RGBColor = &GREY;
pub const COLOR_COLORBAR_OUTLINE: RGBColor = RGBColor(40, 40, 40);

pub const LINE_WIDTH_OUTLINE: u32 = 1;

// src/constants.rs
