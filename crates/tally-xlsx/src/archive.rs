//! Minimal ZIP container reader
//!
//! Reads the central directory of an in-memory archive and extracts single
//! entries by name. Only what XLSX packages use is supported: stored and
//! deflated entries, no ZIP64, no encryption, no multi-disk archives.

use std::io::Read;

use flate2::read::DeflateDecoder;

use crate::error::{XlsxError, XlsxResult};

/// ZIP local file header signature
const LOCAL_FILE_HEADER_SIGNATURE: u32 = 0x04034b50;

/// ZIP central directory signature
const CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x02014b50;

/// ZIP end of central directory signature
const END_OF_CENTRAL_DIRECTORY_SIGNATURE: u32 = 0x06054b50;

/// Fixed size of the end of central directory record
const EOCD_LEN: usize = 22;

/// Largest archive comment plus the EOCD record
const EOCD_SEARCH_LEN: usize = 65_557;

const LOCAL_HEADER_LEN: usize = 30;
const CENTRAL_HEADER_LEN: usize = 46;

/// How an entry's bytes are stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Method 0, bytes stored as-is
    Stored,
    /// Method 8, raw DEFLATE stream
    Deflated,
}

impl CompressionMethod {
    fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(CompressionMethod::Stored),
            8 => Some(CompressionMethod::Deflated),
            _ => None,
        }
    }
}

/// Entry in the ZIP central directory
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Entry name (path inside the archive)
    pub name: String,
    /// Compression method
    pub method: CompressionMethod,
    /// Declared CRC-32 of the uncompressed bytes
    pub crc32: u32,
    /// Size of the stored bytes
    pub compressed_size: u64,
    /// Declared size after decompression
    pub uncompressed_size: u64,
    offset: u64,
}

/// An archive parsed from a byte slice
///
/// The archive borrows the bytes; extraction decompresses on demand.
#[derive(Debug)]
pub struct Archive<'a> {
    data: &'a [u8],
    entries: Vec<ArchiveEntry>,
}

impl<'a> Archive<'a> {
    /// Parse the central directory of an archive
    pub fn new(data: &'a [u8]) -> XlsxResult<Self> {
        let entries = read_central_directory(data)?;
        log::debug!("archive has {} entries", entries.len());
        Ok(Self { data, entries })
    }

    /// All entries, in central directory order
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Names of all entries
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Check whether an entry exists
    pub fn contains(&self, name: &str) -> bool {
        self.find_entry(name).is_some()
    }

    /// Find an entry by name
    pub fn find_entry(&self, name: &str) -> Option<&ArchiveEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Read an entry's decompressed bytes by name
    pub fn read(&self, name: &str) -> XlsxResult<Vec<u8>> {
        let entry = self
            .find_entry(name)
            .ok_or_else(|| XlsxError::MissingEntry(name.to_string()))?;
        self.read_entry(entry)
    }

    /// Read an entry's decompressed bytes
    ///
    /// The result must match both the declared uncompressed size and the
    /// declared CRC-32.
    pub fn read_entry(&self, entry: &ArchiveEntry) -> XlsxResult<Vec<u8>> {
        let header = usize::try_from(entry.offset)
            .map_err(|_| XlsxError::corrupt(format!("offset of '{}' too large", entry.name)))?;

        let signature = read_u32(self.data, header)?;
        if signature != LOCAL_FILE_HEADER_SIGNATURE {
            return Err(XlsxError::corrupt(format!(
                "invalid local file header signature for '{}': 0x{:08x}",
                entry.name, signature
            )));
        }

        let name_len = read_u16(self.data, header + 26)? as usize;
        let extra_len = read_u16(self.data, header + 28)? as usize;
        let start = header + LOCAL_HEADER_LEN + name_len + extra_len;
        let len = usize::try_from(entry.compressed_size)
            .map_err(|_| XlsxError::corrupt(format!("'{}' too large", entry.name)))?;

        let stored = start
            .checked_add(len)
            .and_then(|end| self.data.get(start..end))
            .ok_or_else(|| {
                XlsxError::corrupt(format!("data of '{}' runs past end of archive", entry.name))
            })?;

        let data = match entry.method {
            CompressionMethod::Stored => stored.to_vec(),
            CompressionMethod::Deflated => {
                inflate(stored, entry.uncompressed_size).map_err(|e| {
                    XlsxError::corrupt(format!("failed to inflate '{}': {}", entry.name, e))
                })?
            }
        };

        if data.len() as u64 != entry.uncompressed_size {
            return Err(XlsxError::corrupt(format!(
                "'{}' decompressed to {} bytes, expected {}",
                entry.name,
                data.len(),
                entry.uncompressed_size
            )));
        }

        let crc = crc32fast::hash(&data);
        if crc != entry.crc32 {
            return Err(XlsxError::corrupt(format!(
                "CRC mismatch for '{}': 0x{:08x} != 0x{:08x}",
                entry.name, crc, entry.crc32
            )));
        }

        log::debug!(
            "extracted '{}' ({} -> {} bytes)",
            entry.name,
            entry.compressed_size,
            data.len()
        );
        Ok(data)
    }
}

/// Find the end of central directory record by scanning from the end
/// Inflate a raw deflate stream, stopping one byte past `declared` so a
/// lying size header cannot force an unbounded allocation.
fn inflate(stored: &[u8], declared: u64) -> std::io::Result<Vec<u8>> {
    let capacity = usize::try_from(declared)
        .unwrap_or(0)
        .min(stored.len().saturating_mul(16));
    let mut out = Vec::with_capacity(capacity);
    DeflateDecoder::new(stored)
        .take(declared.saturating_add(1))
        .read_to_end(&mut out)?;
    Ok(out)
}

fn find_eocd(data: &[u8]) -> XlsxResult<usize> {
    if data.len() < EOCD_LEN {
        return Err(XlsxError::corrupt("too short to be a ZIP archive"));
    }

    let last = data.len() - EOCD_LEN;
    let first = data.len().saturating_sub(EOCD_SEARCH_LEN);

    (first..=last)
        .rev()
        .find(|&i| data[i..].starts_with(&END_OF_CENTRAL_DIRECTORY_SIGNATURE.to_le_bytes()))
        .ok_or_else(|| XlsxError::corrupt("end of central directory not found"))
}

fn read_central_directory(data: &[u8]) -> XlsxResult<Vec<ArchiveEntry>> {
    let eocd = find_eocd(data)?;

    let disk = read_u16(data, eocd + 4)?;
    let cd_disk = read_u16(data, eocd + 6)?;
    if disk != 0 || cd_disk != 0 {
        return Err(XlsxError::corrupt("multi-disk archives are not supported"));
    }

    let total_entries = read_u16(data, eocd + 10)?;
    let cd_offset = read_u32(data, eocd + 16)?;
    if total_entries == u16::MAX || cd_offset == u32::MAX {
        return Err(XlsxError::corrupt("ZIP64 archives are not supported"));
    }

    let mut pos = cd_offset as usize;
    let mut entries = Vec::with_capacity(total_entries as usize);

    for _ in 0..total_entries {
        let signature = read_u32(data, pos)?;
        if signature != CENTRAL_DIRECTORY_SIGNATURE {
            return Err(XlsxError::corrupt(format!(
                "invalid central directory signature at {}: 0x{:08x}",
                pos, signature
            )));
        }

        let flags = read_u16(data, pos + 8)?;
        let method_code = read_u16(data, pos + 10)?;
        let crc32 = read_u32(data, pos + 16)?;
        let compressed_size = read_u32(data, pos + 20)?;
        let uncompressed_size = read_u32(data, pos + 24)?;
        let name_len = read_u16(data, pos + 28)? as usize;
        let extra_len = read_u16(data, pos + 30)? as usize;
        let comment_len = read_u16(data, pos + 32)? as usize;
        let offset = read_u32(data, pos + 42)?;

        let name_start = pos + CENTRAL_HEADER_LEN;
        let name_bytes = data
            .get(name_start..name_start + name_len)
            .ok_or_else(|| XlsxError::corrupt("entry name runs past end of archive"))?;
        let name = String::from_utf8_lossy(name_bytes).into_owned();

        if flags & 0x0001 != 0 {
            return Err(XlsxError::corrupt(format!("'{}' is encrypted", name)));
        }
        if compressed_size == u32::MAX || uncompressed_size == u32::MAX || offset == u32::MAX {
            return Err(XlsxError::corrupt(format!(
                "'{}' uses ZIP64 sizes, which are not supported",
                name
            )));
        }
        let method = CompressionMethod::from_code(method_code).ok_or_else(|| {
            XlsxError::corrupt(format!(
                "unsupported compression method {} for '{}'",
                method_code, name
            ))
        })?;

        entries.push(ArchiveEntry {
            name,
            method,
            crc32,
            compressed_size: u64::from(compressed_size),
            uncompressed_size: u64::from(uncompressed_size),
            offset: u64::from(offset),
        });

        pos = name_start + name_len + extra_len + comment_len;
    }

    Ok(entries)
}

fn read_u16(data: &[u8], pos: usize) -> XlsxResult<u16> {
    data.get(pos..pos + 2)
        .and_then(|b| b.try_into().ok())
        .map(u16::from_le_bytes)
        .ok_or_else(|| XlsxError::corrupt(format!("unexpected end of archive at {}", pos)))
}

fn read_u32(data: &[u8], pos: usize) -> XlsxResult<u32> {
    data.get(pos..pos + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| XlsxError::corrupt(format!("unexpected end of archive at {}", pos)))
}
