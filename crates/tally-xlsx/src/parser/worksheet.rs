//! Worksheet cell-grid parser (`xl/worksheets/sheetN.xml`)

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use tally_core::{CellReference, ColumnToken, RowRecord};

use super::{decode_excel_escapes, Depth};
use crate::error::{XlsxError, XlsxResult};

/// How a cell's raw text is turned into its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    /// `t="s"`: raw text is an index into the shared-string table
    Shared,
    /// `t="inlineStr"`: text lives in nested `<is><t>` runs
    Inline,
    /// Numbers, booleans, formula strings: raw text verbatim
    Literal,
}

/// A `<c>` element being read
#[derive(Debug)]
struct PendingCell {
    column: ColumnToken,
    kind: CellKind,
    raw: String,
    inline: String,
}

impl PendingCell {
    fn from_start(e: &BytesStart<'_>) -> XlsxResult<Self> {
        let mut reference = None;
        let mut kind = CellKind::Literal;

        for attr in e.attributes() {
            let attr = attr?;
            match attr.key.local_name().as_ref() {
                b"r" => reference = Some(attr.unescape_value()?.into_owned()),
                b"t" => {
                    kind = match attr.unescape_value()?.as_ref() {
                        "s" => CellKind::Shared,
                        "inlineStr" => CellKind::Inline,
                        _ => CellKind::Literal,
                    }
                }
                _ => {}
            }
        }

        let reference = reference
            .ok_or_else(|| XlsxError::malformed("worksheet: cell without an r attribute"))?;
        let reference = CellReference::parse(&reference)
            .map_err(|e| XlsxError::malformed(format!("worksheet: {}", e)))?;

        Ok(Self {
            column: reference.column,
            kind,
            raw: String::new(),
            inline: String::new(),
        })
    }

    fn resolve(self, shared_strings: &[String]) -> XlsxResult<(ColumnToken, String)> {
        let value = match self.kind {
            CellKind::Shared if !self.raw.is_empty() && self.raw.bytes().all(|b| b.is_ascii_digit()) => {
                self.raw
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| shared_strings.get(idx))
                    .cloned()
                    .ok_or_else(|| XlsxError::InvalidSharedStringIndex {
                        index: self.raw.clone(),
                        len: shared_strings.len(),
                    })?
            }
            CellKind::Inline => decode_excel_escapes(&self.inline),
            CellKind::Shared | CellKind::Literal => self.raw,
        };
        Ok((self.column, value))
    }
}

/// Parse a worksheet part into one [`RowRecord`] per `<row>` element, in
/// document order.
///
/// Shared-string cells are resolved against `shared_strings`; an index
/// outside the table is an error. Self-closing rows produce empty records so
/// that row positions stay aligned with the sheet.
pub fn parse_worksheet(xml: &[u8], shared_strings: &[String]) -> XlsxResult<Vec<RowRecord>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut depth = Depth::default();

    let mut rows = Vec::new();
    let mut seen_sheet_data = false;
    let mut in_sheet_data = false;
    let mut current_row: Option<RowRecord> = None;
    let mut current_cell: Option<PendingCell> = None;
    let mut in_value = false;
    let mut in_inline_str = false;
    let mut in_inline_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth.open();
                match e.local_name().as_ref() {
                    b"sheetData" => {
                        seen_sheet_data = true;
                        in_sheet_data = true;
                    }
                    b"row" if in_sheet_data => current_row = Some(RowRecord::new()),
                    b"c" if in_sheet_data => {
                        if current_row.is_none() {
                            return Err(XlsxError::malformed("worksheet: cell outside of a row"));
                        }
                        current_cell = Some(PendingCell::from_start(&e)?);
                    }
                    b"v" if current_cell.is_some() => in_value = true,
                    b"is" if current_cell.is_some() => in_inline_str = true,
                    b"t" if in_inline_str => in_inline_text = true,
                    _ => {}
                }
            }
            Event::End(e) => {
                depth.close(e.local_name().as_ref())?;
                match e.local_name().as_ref() {
                    b"sheetData" => in_sheet_data = false,
                    b"row" => {
                        if let Some(row) = current_row.take() {
                            rows.push(row);
                        }
                    }
                    b"c" => {
                        if let (Some(cell), Some(row)) = (current_cell.take(), current_row.as_mut())
                        {
                            let (column, value) = cell.resolve(shared_strings)?;
                            row.insert(column, value);
                        }
                    }
                    b"v" => in_value = false,
                    b"is" => in_inline_str = false,
                    b"t" => in_inline_text = false,
                    _ => {}
                }
            }
            Event::Empty(e) => match e.local_name().as_ref() {
                b"sheetData" => seen_sheet_data = true,
                b"row" if in_sheet_data => rows.push(RowRecord::new()),
                b"c" if in_sheet_data => {
                    let row = current_row
                        .as_mut()
                        .ok_or_else(|| XlsxError::malformed("worksheet: cell outside of a row"))?;
                    let (column, value) = PendingCell::from_start(&e)?.resolve(shared_strings)?;
                    row.insert(column, value);
                }
                _ => {}
            },
            Event::Text(e) if in_value || in_inline_text => {
                let text = e.unescape()?;
                if let Some(cell) = current_cell.as_mut() {
                    if in_value {
                        cell.raw.push_str(&text);
                    } else {
                        cell.inline.push_str(&text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    depth.finish("worksheet")?;
    if !seen_sheet_data {
        return Err(XlsxError::malformed("worksheet: missing <sheetData> element"));
    }

    log::debug!("parsed {} worksheet rows", rows.len());
    Ok(rows)
}
