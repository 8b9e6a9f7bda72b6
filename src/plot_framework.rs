// src/plot_framework.rs

use log::info;
use plotters::backend::BitMapBackend;
use plotters::chart::{ChartBuilder, ChartContext, LabelAreaPosition};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Circle, Polygon, Rectangle, Text};
use plotters::style::colors::{BLACK, RED, WHITE};
use plotters::style::{Color, IntoFont, RGBColor};

use std::error::Error;
use std::ops::Range;

use crate::constants::{
    COLORBAR_AREA_WIDTH, COLORBAR_LABEL_AREA_SIZE, COLORBAR_LABEL_COUNT, COLORBAR_STEPS,
    COLOR_COLORBAR_OUTLINE, COLOR_EMPTY_BIN, FONT_SIZE_MESSAGE, LINE_WIDTH_OUTLINE, PLOT_HEIGHT,
    PLOT_WIDTH, SCATTER_POINT_RADIUS,
};
use crate::font_config::{
    FONT_TUPLE_AXIS_LABEL, FONT_TUPLE_CHART_TITLE, FONT_TUPLE_MAIN_TITLE, FONT_TUPLE_MESSAGE,
};

/// Calculate plot range with padding.
/// Adds 15% padding, or a fixed padding for very small ranges.
pub fn calculate_range(min_val: f64, max_val: f64) -> (f64, f64) {
    let (min, max) = if min_val <= max_val {
        (min_val, max_val)
    } else {
        (max_val, min_val)
    };
    let range = (max - min).abs();
    let padding = if range < 1e-6 { 0.5 } else { range * 0.15 };
    (min - padding, max + padding)
}

/// Tick label text for axis and colorbar values.
///
/// Tracking errors are often tiny squared distances, so small magnitudes
/// switch to exponent notation instead of collapsing to "0.00".
pub fn format_axis_value(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 {
        "0".to_string()
    } else if magnitude >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if magnitude >= 1000.0 {
        format!("{:.1}k", value / 1000.0)
    } else if magnitude >= 10.0 {
        format!("{value:.0}")
    } else if magnitude >= 0.01 {
        format!("{value:.2}")
    } else {
        format!("{value:.1e}")
    }
}

/// Draw a "Data Unavailable" message on a plot area.
pub fn draw_unavailable_message(
    area: &DrawingArea<BitMapBackend, Shift>,
    plot_type: &str,
    reason: &str,
) -> Result<(), Box<dyn Error>> {
    // Constants for text rendering
    const CHAR_WIDTH_RATIO: f32 = 0.6; // Approximate character width relative to font size
    const LINE_HEIGHT_SPACING: i32 = 4; // Additional spacing between lines

    let (x_range, y_range) = area.get_pixel_range();
    let (width, height) = (
        (x_range.end - x_range.start) as u32,
        (y_range.end - y_range.start) as u32,
    );
    let message = format!("{plot_type} Data Unavailable:\n{reason}");

    let estimated_char_width = (FONT_SIZE_MESSAGE as f32 * CHAR_WIDTH_RATIO) as i32;
    let estimated_line_height = FONT_SIZE_MESSAGE + LINE_HEIGHT_SPACING;

    let lines: Vec<&str> = message.split('\n').collect();
    let max_line_length = lines.iter().map(|line| line.len()).max().unwrap_or(0);
    let estimated_text_width = max_line_length.saturating_mul(estimated_char_width as usize) as i32;
    let estimated_text_height = lines.len().saturating_mul(estimated_line_height as usize) as i32;

    let center_x = width as i32 / 2 - estimated_text_width / 2;
    let center_y = height as i32 / 2 - estimated_text_height / 2;

    let text_style = FONT_TUPLE_MESSAGE.into_font().color(&RED);
    area.draw(&Text::new(message, (center_x, center_y), text_style))?;
    Ok(())
}

fn map_value_to_color(value: f64, min_value: f64, max_value: f64) -> RGBColor {
    if !value.is_finite() || !min_value.is_finite() || !max_value.is_finite() {
        return *COLOR_EMPTY_BIN;
    }

    // Ensure span is non-zero to avoid division by zero
    let span = (max_value - min_value).abs().max(1e-300);
    let t = ((value.clamp(min_value, max_value) - min_value) / span).clamp(0.0, 1.0);

    let color = colorous::VIRIDIS.eval_continuous(t);
    RGBColor(color.r, color.g, color.b)
}

/// Maps metric values onto the viridis colormap.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
    pub label: String,
}

impl ColorScale {
    pub fn new(min: f64, max: f64, label: impl Into<String>) -> Self {
        Self {
            min,
            max,
            label: label.into(),
        }
    }

    /// Value range covered by the colorbar. Never empty: a single value is
    /// padded so it sits in the middle of the scale.
    pub fn display_range(&self) -> Range<f64> {
        if self.max > self.min {
            self.min..self.max
        } else {
            let (low, high) = calculate_range(self.min, self.max);
            low..high
        }
    }

    pub fn color_for(&self, value: f64) -> RGBColor {
        let range = self.display_range();
        map_value_to_color(value, range.start, range.end)
    }
}

/// One filled hexagon in data coordinates.
#[derive(Clone, Debug)]
pub struct HexagonCell {
    pub vertices: Vec<(f64, f64)>,
    pub value: f64,
}

#[derive(Clone, Debug)]
pub struct HexbinPlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub x_label: String,
    pub y_label: String,
    pub hexagons: Vec<HexagonCell>,
    pub color_scale: ColorScale,
}

#[derive(Clone, Debug)]
pub struct ScatterPlotConfig {
    pub title: String,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub x_label: String,
    pub y_label: String,
    /// (x, y, value) per sample.
    pub points: Vec<(f64, f64, f64)>,
    pub color_scale: ColorScale,
}

fn has_valid_ranges(x_range: &Range<f64>, y_range: &Range<f64>) -> bool {
    x_range.start.is_finite()
        && x_range.end.is_finite()
        && y_range.start.is_finite()
        && y_range.end.is_finite()
        && x_range.end > x_range.start
        && y_range.end > y_range.start
}

/// Axes and legend shared by the hexbin and scatter charts.
struct ChartAxes<'c> {
    title: &'c str,
    x_range: &'c Range<f64>,
    y_range: &'c Range<f64>,
    x_label: &'c str,
    y_label: &'c str,
    color_scale: &'c ColorScale,
    /// Number of hexagons or points the series will draw.
    element_count: usize,
}

type MetricChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Builds the chart and mesh, then hands the chart to `draw_series`.
fn draw_metric_chart<'b, S>(
    area: &DrawingArea<BitMapBackend<'b>, Shift>,
    axes: &ChartAxes<'_>,
    draw_series: S,
) -> Result<(), Box<dyn Error>>
where
    S: FnOnce(&mut MetricChart<'_, 'b>) -> Result<(), Box<dyn Error>>,
{
    let mut chart = ChartBuilder::on(area)
        .caption(axes.title, FONT_TUPLE_CHART_TITLE)
        .margin(5)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(axes.x_range.clone(), axes.y_range.clone())?;

    chart
        .configure_mesh()
        .x_desc(axes.x_label)
        .y_desc(axes.y_label)
        .x_labels(10)
        .y_labels(10)
        .x_label_formatter(&|x| format_axis_value(*x))
        .y_label_formatter(&|y| format_axis_value(*y))
        .light_line_style(WHITE.mix(0.7))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    draw_series(&mut chart)
}

/// Vertical color scale legend with tick labels on its right.
fn draw_colorbar(
    area: &DrawingArea<BitMapBackend, Shift>,
    color_scale: &ColorScale,
) -> Result<(), Box<dyn Error>> {
    let value_range = color_scale.display_range();

    let mut chart = ChartBuilder::on(area)
        .caption(&color_scale.label, FONT_TUPLE_AXIS_LABEL)
        .margin_top(10)
        .margin_bottom(55) // lines up with the X label area of the main chart
        .margin_left(10)
        .set_label_area_size(LabelAreaPosition::Right, COLORBAR_LABEL_AREA_SIZE)
        .build_cartesian_2d(0.0..1.0, value_range.clone())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(COLORBAR_LABEL_COUNT)
        .y_label_formatter(&|v| format_axis_value(*v))
        .label_style(FONT_TUPLE_AXIS_LABEL)
        .draw()?;

    let step = (value_range.end - value_range.start) / COLORBAR_STEPS as f64;
    chart.draw_series((0..COLORBAR_STEPS).map(|i| {
        let low = value_range.start + step * i as f64;
        let high = low + step;
        Rectangle::new(
            [(0.0, low), (1.0, high)],
            color_scale.color_for((low + high) * 0.5).filled(),
        )
    }))?;

    chart.draw_series(std::iter::once(Rectangle::new(
        [(0.0, value_range.start), (1.0, value_range.end)],
        COLOR_COLORBAR_OUTLINE.stroke_width(LINE_WIDTH_OUTLINE),
    )))?;
    Ok(())
}

/// Fills the canvas, writes the figure title and returns the chart and
/// colorbar areas.
fn prepare_figure<'a>(
    root_area: &DrawingArea<BitMapBackend<'a>, Shift>,
    root_name: &str,
) -> Result<
    (
        DrawingArea<BitMapBackend<'a>, Shift>,
        DrawingArea<BitMapBackend<'a>, Shift>,
    ),
    Box<dyn Error>,
> {
    root_area.fill(&WHITE)?;
    root_area.draw(&Text::new(
        root_name,
        (10, 10),
        FONT_TUPLE_MAIN_TITLE.into_font().color(&BLACK),
    ))?;
    let margined_root_area = root_area.margin(50, 5, 5, 5);
    let (width, _) = margined_root_area.dim_in_pixel();
    let split_at = width.saturating_sub(COLORBAR_AREA_WIDTH) as i32;
    Ok(margined_root_area.split_horizontally(split_at))
}

/// Renders one figure: chart on the left, colorbar on the right.
/// With no usable data the chart area carries a placeholder message instead.
/// Returns whether the chart was drawn.
fn draw_metric_figure<'b, S>(
    output_filename: &'b str,
    root_name: &str,
    plot_type_name: &str,
    axes: Option<ChartAxes<'_>>,
    draw_series: S,
) -> Result<bool, Box<dyn Error>>
where
    S: FnOnce(&mut MetricChart<'_, 'b>) -> Result<(), Box<dyn Error>>,
{
    let root_area =
        BitMapBackend::new(output_filename, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    let (chart_area, colorbar_area) = prepare_figure(&root_area, root_name)?;
    let mut plot_drawn = false;

    if let Some(axes) = axes {
        let has_data = axes.element_count > 0;
        let valid_ranges = has_valid_ranges(axes.x_range, axes.y_range);

        if has_data && valid_ranges {
            draw_metric_chart(&chart_area, &axes, draw_series)?;
            draw_colorbar(&colorbar_area, axes.color_scale)?;
            plot_drawn = true;
        } else {
            let reason = if !has_data {
                "No data points"
            } else {
                "Invalid ranges"
            };
            draw_unavailable_message(&chart_area, plot_type_name, reason)?;
        }
    } else {
        draw_unavailable_message(&chart_area, plot_type_name, "Data Not Available")?;
    }

    root_area.present()?;
    if plot_drawn {
        info!("  {plot_type_name} plot saved as '{output_filename}'.");
    } else {
        info!("  '{output_filename}' holds only a placeholder message: nothing to plot.");
    }
    Ok(plot_drawn)
}

/// Renders the hexbin figure. Returns whether the chart was drawn.
pub fn draw_hexbin_plot(
    output_filename: &str,
    root_name: &str,
    plot_type_name: &str,
    plot_config: Option<&HexbinPlotConfig>,
) -> Result<bool, Box<dyn Error>> {
    let axes = plot_config.map(|config| ChartAxes {
        title: &config.title,
        x_range: &config.x_range,
        y_range: &config.y_range,
        x_label: &config.x_label,
        y_label: &config.y_label,
        color_scale: &config.color_scale,
        element_count: config.hexagons.len(),
    });

    draw_metric_figure(output_filename, root_name, plot_type_name, axes, |chart| {
        if let Some(config) = plot_config {
            chart.draw_series(config.hexagons.iter().map(|cell| {
                Polygon::new(
                    cell.vertices.clone(),
                    config.color_scale.color_for(cell.value).filled(),
                )
            }))?;
        }
        Ok(())
    })
}

/// Renders the scatter figure with the same layout as the hexbin figure.
pub fn draw_scatter_plot(
    output_filename: &str,
    root_name: &str,
    plot_type_name: &str,
    plot_config: Option<&ScatterPlotConfig>,
) -> Result<bool, Box<dyn Error>> {
    let axes = plot_config.map(|config| ChartAxes {
        title: &config.title,
        x_range: &config.x_range,
        y_range: &config.y_range,
        x_label: &config.x_label,
        y_label: &config.y_label,
        color_scale: &config.color_scale,
        element_count: config.points.len(),
    });

    draw_metric_figure(output_filename, root_name, plot_type_name, axes, |chart| {
        if let Some(config) = plot_config {
            chart.draw_series(config.points.iter().map(|&(x, y, value)| {
                Circle::new(
                    (x, y),
                    SCATTER_POINT_RADIUS,
                    config.color_scale.color_for(value).filled(),
                )
            }))?;
        }
        Ok(())
    })
}


// src/plot_framework.rs
