//! PNG encoder
//!
//! Writes 8-bit truecolor, non-interlaced images: the signature, `IHDR`,
//! an optional `tEXt` title, a single `IDAT` and `IEND`. Compression and
//! the chunk checksum are pluggable through [`Compressor`] and
//! [`Checksum`]; the defaults are zlib (flate2) and CRC-32 (crc32fast).

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::canvas::Canvas;
use crate::error::{ChartError, ChartResult};

/// Fixed 8-byte PNG signature
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Keyword of the title text chunk
pub const TITLE_KEYWORD: &str = "Title";

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_TRUECOLOR: u8 = 2;
const COMPRESSION_DEFLATE: u8 = 0;
const FILTER_ADAPTIVE: u8 = 0;
const INTERLACE_NONE: u8 = 0;

/// Compresses the filtered scanlines into a zlib stream
pub trait Compressor {
    fn compress(&self, data: &[u8]) -> std::io::Result<Vec<u8>>;
}

/// Computes a chunk checksum over the type tag followed by the payload
pub trait Checksum {
    fn checksum(&self, tag: &[u8; 4], payload: &[u8]) -> u32;
}

/// zlib compression via flate2
#[derive(Debug, Clone, Copy)]
pub struct ZlibCompressor {
    level: u32,
}

impl ZlibCompressor {
    /// Create a compressor with a level from 0 (store) to 9 (best)
    pub fn new(level: u32) -> Self {
        Self {
            level: level.min(9),
        }
    }
}

impl Default for ZlibCompressor {
    fn default() -> Self {
        Self::new(9)
    }
}

impl Compressor for ZlibCompressor {
    fn compress(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(
            Vec::with_capacity(data.len() / 4),
            Compression::new(self.level),
        );
        encoder.write_all(data)?;
        encoder.finish()
    }
}

/// Standard CRC-32 (ISO-HDLC) via crc32fast
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc32;

impl Checksum for Crc32 {
    fn checksum(&self, tag: &[u8; 4], payload: &[u8]) -> u32 {
        let mut hasher = crc32fast::Hasher::new();
        hasher.update(tag);
        hasher.update(payload);
        hasher.finalize()
    }
}

/// A PNG chunk: type tag, payload and checksum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    tag: [u8; 4],
    payload: Vec<u8>,
    crc: u32,
}

impl Chunk {
    /// Build a chunk, computing its checksum
    pub fn new<K: Checksum>(tag: [u8; 4], payload: Vec<u8>, checksum: &K) -> Self {
        let crc = checksum.checksum(&tag, &payload);
        Self { tag, payload, crc }
    }

    pub fn tag(&self) -> &[u8; 4] {
        &self.tag
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn crc(&self) -> u32 {
        self.crc
    }

    /// Append the chunk as length, tag, payload, checksum (all big-endian)
    pub fn write_to(&self, out: &mut Vec<u8>) -> ChartResult<()> {
        let len = u32::try_from(self.payload.len())
            .ok()
            .filter(|&len| len <= i32::MAX as u32)
            .ok_or(ChartError::ChunkTooLarge(self.payload.len()))?;

        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(&self.crc.to_be_bytes());
        Ok(())
    }
}

/// `IHDR` payload for an 8-bit truecolor image
fn header_payload(width: u32, height: u32) -> Vec<u8> {
    let mut payload = Vec::with_capacity(13);
    payload.extend_from_slice(&width.to_be_bytes());
    payload.extend_from_slice(&height.to_be_bytes());
    payload.extend_from_slice(&[
        BIT_DEPTH,
        COLOR_TYPE_TRUECOLOR,
        COMPRESSION_DEFLATE,
        FILTER_ADAPTIVE,
        INTERLACE_NONE,
    ]);
    payload
}

/// `tEXt` payload: Latin-1 keyword, NUL, Latin-1 text.
///
/// Characters outside Latin-1 and NUL characters are dropped.
pub fn text_payload(keyword: &str, text: &str) -> Vec<u8> {
    let latin1 = |s: &str| -> Vec<u8> {
        s.chars()
            .filter_map(|c| u8::try_from(u32::from(c)).ok())
            .filter(|&b| b != 0)
            .collect()
    };

    let mut payload = latin1(keyword);
    payload.push(0);
    payload.extend(latin1(text));
    payload
}

/// PNG encoder, generic over its compression and checksum strategies
#[derive(Debug, Clone, Default)]
pub struct PngEncoder<C = ZlibCompressor, K = Crc32> {
    compressor: C,
    checksum: K,
}

impl PngEncoder {
    /// Encoder with zlib level 9 and CRC-32
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoder with zlib at the given level and CRC-32
    pub fn with_level(level: u32) -> Self {
        Self::with_strategies(ZlibCompressor::new(level), Crc32)
    }
}

impl<C: Compressor, K: Checksum> PngEncoder<C, K> {
    /// Encoder with custom strategies
    pub fn with_strategies(compressor: C, checksum: K) -> Self {
        Self {
            compressor,
            checksum,
        }
    }

    /// The chunks of the image, in file order
    pub fn chunks(&self, canvas: &Canvas, title: Option<&str>) -> ChartResult<Vec<Chunk>> {
        let mut chunks = Vec::with_capacity(4);

        chunks.push(Chunk::new(
            *b"IHDR",
            header_payload(canvas.width(), canvas.height()),
            &self.checksum,
        ));

        if let Some(title) = title {
            chunks.push(Chunk::new(
                *b"tEXt",
                text_payload(TITLE_KEYWORD, title),
                &self.checksum,
            ));
        }

        let data = self
            .compressor
            .compress(&canvas.scanlines())
            .map_err(ChartError::Compression)?;
        chunks.push(Chunk::new(*b"IDAT", data, &self.checksum));

        chunks.push(Chunk::new(*b"IEND", Vec::new(), &self.checksum));

        Ok(chunks)
    }

    /// Encode the canvas to PNG bytes
    pub fn encode(&self, canvas: &Canvas, title: Option<&str>) -> ChartResult<Vec<u8>> {
        let chunks = self.chunks(canvas, title)?;

        let size = PNG_SIGNATURE.len() + chunks.iter().map(|c| c.payload.len() + 12).sum::<usize>();
        let mut out = Vec::with_capacity(size);
        out.extend_from_slice(&PNG_SIGNATURE);
        for chunk in &chunks {
            chunk.write_to(&mut out)?;
        }

        log::debug!(
            "encoded {}x{} PNG ({} bytes)",
            canvas.width(),
            canvas.height(),
            out.len()
        );
        Ok(out)
    }
}
