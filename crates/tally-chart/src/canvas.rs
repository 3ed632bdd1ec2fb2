//! Pixel buffer

use crate::error::{ChartError, ChartResult};

/// Largest width or height a PNG header can carry
const MAX_DIMENSION: u32 = i32::MAX as u32;

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels in R, G, B order
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// A fixed-size grid of RGB pixels, row-major, origin at the top-left.
///
/// Drawing calls clip to the canvas; coordinates outside it are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Canvas {
    /// Create a canvas filled with `background`
    pub fn new(width: u32, height: u32, background: Rgb) -> ChartResult<Self> {
        if width == 0 || height == 0 {
            return Err(ChartError::InvalidDimensions(format!(
                "canvas must be at least 1x1, got {}x{}",
                width, height
            )));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ChartError::InvalidDimensions(format!(
                "canvas {}x{} exceeds the PNG limit",
                width, height
            )));
        }

        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| {
                ChartError::InvalidDimensions(format!("canvas {}x{} is too large", width, height))
            })?;

        Ok(Self {
            width,
            height,
            pixels: vec![background; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Color at (x, y), or `None` outside the canvas
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set one pixel
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fill the half-open rectangle `[x0, x1) x [y0, y1)`
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 {
            return;
        }

        for y in y0..y1 {
            let start = y as usize * self.width as usize;
            self.pixels[start + x0 as usize..start + x1 as usize].fill(color);
        }
    }

    /// Draw a horizontal line from `x0` to `x1` inclusive
    pub fn hline(&mut self, x0: u32, x1: u32, y: u32, color: Rgb) {
        self.fill_rect(x0, y, x1.saturating_add(1), y.saturating_add(1), color);
    }

    /// Draw a vertical line from `y0` to `y1` inclusive
    pub fn vline(&mut self, x: u32, y0: u32, y1: u32, color: Rgb) {
        self.fill_rect(x, y0, x.saturating_add(1), y1.saturating_add(1), color);
    }

    /// Number of pixels in column `x` with the given color
    pub fn column_count(&self, x: u32, color: Rgb) -> usize {
        (0..self.height)
            .filter(|&y| self.get(x, y) == Some(color))
            .count()
    }

    /// Row-major pixels
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Raw PNG image data before compression: each scanline is a
    /// filter-type byte of 0 followed by `width * 3` channel bytes.
    pub fn scanlines(&self) -> Vec<u8> {
        let stride = self.width as usize * 3 + 1;
        let mut raw = Vec::with_capacity(stride * self.height as usize);

        for row in self.pixels.chunks_exact(self.width as usize) {
            raw.push(0);
            for px in row {
                raw.extend_from_slice(&px.to_array());
            }
        }

        raw
    }
}
