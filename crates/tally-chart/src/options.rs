//! Chart rendering options

use crate::canvas::Rgb;

/// Space reserved around the plot area, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Margins {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(120, 40, 60, 120)
    }
}

/// Options for rendering a bar chart
#[derive(Debug, Clone)]
pub struct ChartOptions {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Margins around the plot area
    pub margins: Margins,
    /// Bars are never narrower than this
    pub min_bar_width: u32,
    /// Pixels kept free above the tallest bar
    pub headroom: u32,
    pub background: Rgb,
    pub axis_color: Rgb,
    pub bar_color: Rgb,
    /// zlib level for the image data (0-9)
    pub compression_level: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 700,
            margins: Margins::default(),
            min_bar_width: 10,
            headroom: 10,
            background: Rgb::WHITE,
            axis_color: Rgb::new(40, 40, 40),
            bar_color: Rgb::new(66, 135, 245),
            compression_level: 9,
        }
    }
}

impl ChartOptions {
    /// Set the canvas size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the margins
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Width of the plot area, if the margins leave any
    pub fn plot_width(&self) -> Option<u32> {
        self.width
            .checked_sub(self.margins.left)?
            .checked_sub(self.margins.right)
            .filter(|&w| w > 0)
    }

    /// Height of the plot area, if the margins leave any
    pub fn plot_height(&self) -> Option<u32> {
        self.height
            .checked_sub(self.margins.top)?
            .checked_sub(self.margins.bottom)
            .filter(|&h| h > 0)
    }
}
