//! Chart rendering.
//!
//! [`ChartRenderer`] turns a [`GroupedBarChart`] into a PNG. Drawing goes
//! into an in-memory RGB buffer through plotters' bitmap backend, the
//! buffer is encoded with `image`, and only then is the file written, so a
//! failed render never leaves a partial image behind.
//!
//! Text is drawn with an embedded DejaVu Sans face registered under the
//! `sans-serif` family, so output does not depend on installed fonts.

mod viewer;

pub use viewer::{open_in_viewer, viewer_command};

use crate::chart::GroupedBarChart;
use crate::config::ChartConfig;
use crate::table::BenchmarkTable;
use crate::telemetry;
use crate::{Error, Result};

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle, FontTransform};
use std::fs;
use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

static FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

const FONT: &str = "sans-serif";
const TITLE_SIZE: u32 = 22;
const AXIS_DESC_SIZE: u32 = 16;
const TICK_LABEL_SIZE: u32 = 13;
const LEGEND_SIZE: u32 = 14;

/// Matplotlib's default grid gray.
const GRID_COLOR: RGBColor = RGBColor(0xB0, 0xB0, 0xB0);
const GRID_OPACITY: f64 = 0.7;

/// Dash and gap length of gridlines, as fractions of the x span.
const GRID_DASH: f64 = 1.0 / 160.0;
const GRID_GAP: f64 = 1.0 / 240.0;

/// Renders grouped bar charts to PNG images.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    style: ChartConfig,
}

impl ChartRenderer {
    /// Create a renderer with the given chart style.
    pub fn new(style: ChartConfig) -> Self {
        Self { style }
    }

    /// Chart style in use.
    pub fn style(&self) -> &ChartConfig {
        &self.style
    }

    /// Render a table and write the image to `output_path`.
    ///
    /// The layout is computed and drawn in memory first; the file is only
    /// touched once the PNG is complete. An invalid style fails with
    /// [`Error::Config`] before any of that.
    pub fn render(&self, table: &BenchmarkTable, output_path: impl AsRef<Path>) -> Result<()> {
        let output_path = output_path.as_ref();
        self.style.validate()?;

        let span = telemetry::span("layout");
        let chart = GroupedBarChart::from_table(table, &self.style)?;
        span.end();

        let mut span = telemetry::span("draw");
        span.set_attribute("bars", chart.bar_count().to_string());
        let png = self.render_png(&chart)?;
        span.end();

        fs::write(output_path, &png)?;
        tracing::info!(
            path = %output_path.display(),
            categories = chart.categories.len(),
            bytes = png.len(),
            "Saved grouped bar chart"
        );
        Ok(())
    }

    /// Draw a chart and encode it as PNG.
    pub fn render_png(&self, chart: &GroupedBarChart) -> Result<Vec<u8>> {
        let rgb = self.render_rgb(chart)?;
        encode_png(&rgb, self.style.width, self.style.height)
    }

    /// Draw a chart into a raw RGB buffer of `width * height * 3` bytes.
    pub fn render_rgb(&self, chart: &GroupedBarChart) -> Result<Vec<u8>> {
        self.style.validate()?;
        register_fonts()?;

        let (width, height) = (self.style.width, self.style.height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            draw(&root, chart)?;
            root.present().map_err(render_err)?;
        }
        Ok(buffer)
    }
}

/// Load a table from `input` and render it to `output`.
///
/// Load failures surface as [`Error::DataLoad`] before anything is drawn
/// or written.
pub fn render_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    style: &ChartConfig,
) -> Result<()> {
    let span = telemetry::span("load");
    let table = BenchmarkTable::load(input)?;
    span.end();

    ChartRenderer::new(style.clone()).render(&table, output)
}

/// Register the embedded face once per process.
fn register_fonts() -> Result<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED.get_or_init(|| register_font(FONT, FontStyle::Normal, FONT_DATA).is_ok());
    if ok {
        Ok(())
    } else {
        Err(Error::render("embedded font could not be parsed"))
    }
}

/// Linear `f64` axis whose key points are fixed up front: category
/// positions on x, round ticks on y.
#[derive(Clone)]
struct FixedTicks {
    inner: RangedCoordf64,
    ticks: Vec<f64>,
}

impl FixedTicks {
    fn new(range: (f64, f64), ticks: Vec<f64>) -> Self {
        Self {
            inner: (range.0..range.1).into(),
            ticks,
        }
    }
}

impl Ranged for FixedTicks {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.inner.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> Range<f64> {
        self.inner.range()
    }
}

/// Draw the chart and return the data-to-pixel mapping of its plot area.
fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &GroupedBarChart,
) -> Result<Cartesian2d<FixedTicks, FixedTicks>> {
    root.fill(&WHITE).map_err(render_err)?;

    let x_keys: Vec<f64> = chart
        .categories
        .iter()
        .map(|c| c.position as f64)
        .collect();

    let mut ctx = ChartBuilder::on(root)
        .caption(chart.title.as_str(), (FONT, TITLE_SIZE))
        .margin(15)
        .x_label_area_size(x_label_area_size(chart, root.dim_in_pixel().1))
        .y_label_area_size(70)
        .build_cartesian_2d(
            FixedTicks::new(chart.x_range, x_keys),
            FixedTicks::new(chart.y_range, chart.y_ticks.clone()),
        )
        .map_err(render_err)?;

    let x_formatter = |x: &f64| chart.label_at(*x).unwrap_or_default().to_string();
    let y_formatter = |y: &f64| format_tick(*y);

    let mut mesh = ctx.configure_mesh();
    mesh.disable_mesh()
        .x_desc(chart.x_label.as_str())
        .y_desc(chart.y_label.as_str())
        .axis_desc_style((FONT, AXIS_DESC_SIZE))
        .label_style((FONT, TICK_LABEL_SIZE))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter);
    if chart.rotate_labels {
        mesh.x_label_style(
            (FONT, TICK_LABEL_SIZE)
                .into_font()
                .transform(FontTransform::Rotate90),
        );
    }
    mesh.draw().map_err(render_err)?;

    // Gridlines go first so bars cover them.
    let grid_style = GRID_COLOR.mix(GRID_OPACITY).stroke_width(1);
    let span = chart.x_range.1 - chart.x_range.0;
    let dashes = dash_segments(chart.x_range.0, chart.x_range.1, span * GRID_DASH, span * GRID_GAP);
    for &y in &chart.y_ticks {
        ctx.draw_series(
            dashes
                .iter()
                .map(|&(x0, x1)| PathElement::new(vec![(x0, y), (x1, y)], grid_style)),
        )
        .map_err(render_err)?;
    }

    for series in &chart.series {
        let color = series.series.color();
        ctx.draw_series(series.bars.iter().map(|bar| {
            Rectangle::new([(bar.left, 0.0), (bar.right, bar.height)], color.filled())
        }))
        .map_err(render_err)?
        .label(series.series.name())
        .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 14, y + 5)], color.filled()));
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .label_font((FONT, LEGEND_SIZE))
        .draw()
        .map_err(render_err)?;

    Ok(ctx.as_coord_spec().clone())
}

/// Pixels reserved under the plot for category labels and the axis
/// description. Rotated labels need room for their full length.
fn x_label_area_size(chart: &GroupedBarChart, image_height: u32) -> u32 {
    if !chart.rotate_labels {
        return 50;
    }
    let longest = chart
        .categories
        .iter()
        .map(|c| c.label.chars().count())
        .max()
        .unwrap_or(0) as u32;
    (40 + longest * (TICK_LABEL_SIZE / 2 + 1)).min(image_height / 2)
}

/// Split `[from, to]` into dash segments.
fn dash_segments(from: f64, to: f64, dash: f64, gap: f64) -> Vec<(f64, f64)> {
    let mut segments = Vec::new();
    if !(dash > 0.0 && gap >= 0.0) {
        return segments;
    }
    let mut x = from;
    while x < to {
        segments.push((x, (x + dash).min(to)));
        x += dash + gap;
    }
    segments
}

/// Tick label text: integral values without decimals, others trimmed.
/// Magnitudes of a million and up switch to scientific notation.
fn format_tick(value: f64) -> String {
    if value.abs() >= 1e6 {
        format!("{:e}", value)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.4}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

fn encode_png(rgb: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(rgb, width, height, ColorType::Rgb8)
        .map_err(|e| Error::render(format!("PNG encoding failed: {}", e)))?;
    Ok(png)
}

fn render_err<E: std::error::Error + Send + Sync>(err: DrawingAreaErrorKind<E>) -> Error {
    Error::render(err.to_string())
}
