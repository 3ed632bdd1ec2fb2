//! XML part parsers
//!
//! Only the subset of SpreadsheetML that flat survey exports use is
//! understood: the shared-string table and the cell grid of a worksheet.
//! Element names are matched by local name, unknown elements and attributes
//! are skipped. Structural problems abort the whole part.

mod shared_strings;
mod worksheet;

pub use shared_strings::parse_shared_strings;
pub use worksheet::parse_worksheet;

use crate::error::{XlsxError, XlsxResult};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel writes characters that XML cannot carry (CR, control characters,
/// a literal `_x` prefix) as `_x` followed by four hex digits and `_`.
/// Anything that does not form a complete sequence is kept as-is.
pub(crate) fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];

        let decoded = candidate
            .get(2..6)
            .filter(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit()))
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);

        match decoded {
            Some(c) => {
                result.push(c);
                rest = &candidate[7..];
            }
            None => {
                result.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    result.push_str(rest);

    result
}

/// Nesting tracker shared by both parsers.
///
/// quick-xml reports mismatched end tags itself; this catches documents that
/// stop before every element is closed.
#[derive(Debug, Default)]
struct Depth(usize);

impl Depth {
    fn open(&mut self) {
        self.0 += 1;
    }

    fn close(&mut self, name: &[u8]) -> XlsxResult<()> {
        self.0 = self.0.checked_sub(1).ok_or_else(|| {
            XlsxError::malformed(format!(
                "unexpected closing tag </{}>",
                String::from_utf8_lossy(name)
            ))
        })?;
        Ok(())
    }

    fn finish(&self, part: &str) -> XlsxResult<()> {
        if self.0 != 0 {
            return Err(XlsxError::malformed(format!(
                "{}: document ends with {} unclosed element(s)",
                part, self.0
            )));
        }
        Ok(())
    }
}
