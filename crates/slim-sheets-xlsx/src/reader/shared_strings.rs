//! Shared string table lookups

use std::borrow::Cow;
use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::XlsxResult;

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel writes control characters this way, e.g. `_x000d_` for CR and
/// `_x005f_` for a literal underscore. Anything that is not a complete
/// escape is left untouched.
pub(crate) fn decode_excel_escapes(s: &str) -> Cow<'_, str> {
    if !s.contains("_x") {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(pos) = rest.find("_x") {
        result.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        match decode_escape(candidate) {
            Some(ch) => {
                result.push(ch);
                rest = &candidate[7..];
            }
            None => {
                result.push('_');
                rest = &candidate[1..];
            }
        }
    }

    result.push_str(rest);
    Cow::Owned(result)
}

fn decode_escape(s: &str) -> Option<char> {
    let bytes = s.as_bytes();
    if bytes.len() < 7 || bytes[6] != b'_' {
        return None;
    }
    let hex = s.get(2..6)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}

/// Stream the shared string table up to entry `index` and return its text
///
/// Rich text runs are concatenated; phonetic hints (`<rPh>`) are skipped.
/// Returns `Ok(None)` when the table has fewer entries.
pub(crate) fn lookup_shared_string<B: BufRead>(
    xml_reader: &mut Reader<B>,
    index: usize,
) -> XlsxResult<Option<String>> {
    xml_reader.trim_text(false);

    let mut buf = Vec::new();
    let mut seen = 0usize;
    let mut in_target = false;
    let mut in_t = false;
    let mut in_phonetic = false;
    let mut current = String::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => {
                    in_target = seen == index;
                    seen += 1;
                }
                b"t" if in_target => in_t = true,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => {
                if seen == index {
                    return Ok(Some(String::new()));
                }
                seen += 1;
            }
            Event::Text(e) if in_t && !in_phonetic => {
                current.push_str(&e.unescape()?);
            }
            Event::CData(e) if in_t && !in_phonetic => {
                current.push_str(&String::from_utf8_lossy(&e));
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"si" if in_target => {
                    return Ok(Some(decode_excel_escapes(&current).into_owned()));
                }
                b"t" => in_t = false,
                b"rPh" => in_phonetic = false,
                _ => {}
            },
            Event::Eof => return Ok(None),
            _ => {}
        }
        buf.clear();
    }
}
