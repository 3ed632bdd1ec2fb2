//! # tally-chart
//!
//! Bar charts rendered into an RGB pixel buffer and encoded as PNG.
//!
//! ```
//! use tally_chart::{BarChart, ChartOptions, PNG_SIGNATURE};
//!
//! let chart = BarChart::new(vec![10.0, 20.0, 5.0], vec!["a", "b", "c"])
//!     .unwrap()
//!     .with_title("Example");
//! let png = chart.to_png(&ChartOptions::default()).unwrap();
//! assert_eq!(&png[..8], &PNG_SIGNATURE);
//! ```

mod bar;
mod canvas;
mod error;
mod options;
mod png;

pub use bar::{BarChart, BarLayout, BarRect};
pub use canvas::{Canvas, Rgb};
pub use error::{ChartError, ChartResult};
pub use options::{ChartOptions, Margins};
pub use png::{
    text_payload, Checksum, Chunk, Compressor, Crc32, PngEncoder, ZlibCompressor, PNG_SIGNATURE,
    TITLE_KEYWORD,
};
