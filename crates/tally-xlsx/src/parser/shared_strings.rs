//! Shared-string table parser (`xl/sharedStrings.xml`)

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use super::{decode_excel_escapes, Depth};
use crate::error::{XlsxError, XlsxResult};

/// Parse a shared-string part into its ordered string table.
///
/// Each `<si>` yields one string: the concatenation of every `<t>` run nested
/// inside it, including rich-text and phonetic runs.
pub fn parse_shared_strings(xml: &[u8]) -> XlsxResult<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut depth = Depth::default();

    let mut strings = Vec::new();
    let mut current = String::new();
    let mut seen_root = false;
    let mut in_si = false;
    let mut in_t = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                depth.open();
                match e.local_name().as_ref() {
                    b"sst" => seen_root = true,
                    b"si" if seen_root => {
                        in_si = true;
                        current.clear();
                    }
                    b"t" if in_si => in_t = true,
                    _ => {}
                }
            }
            Event::End(e) => {
                depth.close(e.local_name().as_ref())?;
                match e.local_name().as_ref() {
                    b"si" if in_si => {
                        strings.push(decode_excel_escapes(&current));
                        in_si = false;
                    }
                    b"t" => in_t = false,
                    _ => {}
                }
            }
            Event::Empty(e) => match e.local_name().as_ref() {
                b"sst" => seen_root = true,
                b"si" if seen_root => strings.push(String::new()),
                _ => {}
            },
            Event::Text(e) if in_t => current.push_str(&e.unescape()?),
            Event::CData(e) if in_t => {
                let text = std::str::from_utf8(&e)
                    .map_err(|err| XlsxError::malformed(format!("CDATA is not UTF-8: {}", err)))?;
                current.push_str(text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    depth.finish("shared strings")?;
    if !seen_root {
        return Err(XlsxError::malformed("shared strings: missing <sst> element"));
    }

    log::debug!("parsed {} shared strings", strings.len());
    Ok(strings)
}
