//! Bar chart rendering
//!
//! Bars are laid out left to right inside the plot area, each one's height
//! proportional to `value / max(values)`. Labels are kept alongside the
//! values but are not drawn.

use std::path::Path;

use crate::canvas::Canvas;
use crate::error::{ChartError, ChartResult};
use crate::options::ChartOptions;
use crate::png::PngEncoder;

/// Width-to-slot ratio: each bar takes `1 / 1.4` of its share of the plot
const BAR_SLOT_RATIO: f64 = 1.4;

/// One bar's pixel extent: columns `[x0, x1)`, rising `height` rows
/// above the horizontal axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarRect {
    pub x0: u32,
    pub x1: u32,
    pub height: u32,
}

/// Computed geometry of a chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarLayout {
    pub plot_width: u32,
    pub plot_height: u32,
    /// Row of the horizontal axis
    pub axis_y: u32,
    /// Column of the vertical axis
    pub axis_x: u32,
    pub bar_width: u32,
    pub gap: u32,
    pub bars: Vec<BarRect>,
}

/// A bar chart: values, their labels and an optional title
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    values: Vec<f64>,
    labels: Vec<String>,
    title: Option<String>,
}

impl BarChart {
    /// Create a chart from values and one label per value
    pub fn new<L: Into<String>>(values: Vec<f64>, labels: Vec<L>) -> ChartResult<Self> {
        if values.len() != labels.len() {
            return Err(ChartError::LabelMismatch {
                values: values.len(),
                labels: labels.len(),
            });
        }

        Ok(Self {
            values,
            labels: labels.into_iter().map(Into::into).collect(),
            title: None,
        })
    }

    /// Set the title written into the image metadata
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Values with negative, NaN and infinite entries treated as zero
    fn clamped(&self) -> impl Iterator<Item = f64> + '_ {
        self.values
            .iter()
            .map(|&v| if v.is_finite() && v > 0.0 { v } else { 0.0 })
    }

    /// Compute the chart geometry for the given options
    pub fn layout(&self, options: &ChartOptions) -> ChartResult<BarLayout> {
        let (plot_width, plot_height) = options
            .plot_width()
            .zip(options.plot_height())
            .ok_or_else(|| {
                ChartError::InvalidDimensions(format!(
                    "{}x{} canvas leaves no room inside its margins",
                    options.width, options.height
                ))
            })?;

        let left = options.margins.left;
        let axis_y = options.margins.top + plot_height;
        let right_edge = left + plot_width;

        let n = self.values.len();
        let bar_width = if n == 0 {
            options.min_bar_width
        } else {
            let share = (f64::from(plot_width) / (n as f64 * BAR_SLOT_RATIO)).floor() as u32;
            share.max(options.min_bar_width)
        };
        let gap = bar_width / 2;

        let max = self.clamped().fold(0.0_f64, f64::max);
        let available = f64::from(plot_height.saturating_sub(options.headroom));

        let mut bars = Vec::with_capacity(n);
        let mut x = left.saturating_add(gap);
        for v in self.clamped() {
            let height = if max == 0.0 {
                0
            } else {
                (v / max * available).floor() as u32
            };
            bars.push(BarRect {
                x0: x.min(right_edge),
                x1: x.saturating_add(bar_width).min(right_edge),
                height,
            });
            x = x.saturating_add(bar_width + gap);
        }

        if n > 0 && max == 0.0 {
            log::warn!("bar chart has no positive values; drawing empty bars");
        }
        log::debug!(
            "bar layout: {} bars, width {}, gap {}, plot {}x{}",
            n,
            bar_width,
            gap,
            plot_width,
            plot_height
        );

        Ok(BarLayout {
            plot_width,
            plot_height,
            axis_y,
            axis_x: left,
            bar_width,
            gap,
            bars,
        })
    }

    /// Draw the chart onto a fresh canvas
    pub fn render(&self, options: &ChartOptions) -> ChartResult<Canvas> {
        let layout = self.layout(options)?;
        let mut canvas = Canvas::new(options.width, options.height, options.background)?;

        canvas.hline(
            layout.axis_x,
            layout.axis_x + layout.plot_width,
            layout.axis_y,
            options.axis_color,
        );
        canvas.vline(
            layout.axis_x,
            options.margins.top,
            layout.axis_y,
            options.axis_color,
        );

        for bar in &layout.bars {
            canvas.fill_rect(
                bar.x0,
                layout.axis_y - bar.height,
                bar.x1,
                layout.axis_y,
                options.bar_color,
            );
        }

        Ok(canvas)
    }

    /// Render and encode the chart as PNG bytes
    pub fn to_png(&self, options: &ChartOptions) -> ChartResult<Vec<u8>> {
        let canvas = self.render(options)?;
        PngEncoder::with_level(options.compression_level).encode(&canvas, self.title())
    }

    /// Render, encode and write the chart to `path`
    pub fn save<P: AsRef<Path>>(&self, path: P, options: &ChartOptions) -> ChartResult<()> {
        let path = path.as_ref();
        let bytes = self.to_png(options)?;
        std::fs::write(path, &bytes)?;
        log::debug!("wrote {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}
