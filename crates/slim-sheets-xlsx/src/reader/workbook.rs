//! Declared sheets from `xl/workbook.xml`

use std::io::{BufRead, BufReader, Read, Seek};

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use zip::ZipArchive;

use crate::error::{XlsxError, XlsxResult};
use crate::package::{self, DEFAULT_SHARED_STRINGS_PART};

const SHARED_STRINGS_REL: &str = "/sharedStrings";

/// A sheet declared in the workbook, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetEntry {
    /// Sheet name as shown on the tab
    pub name: String,
    /// Relationship id linking the sheet to its part
    pub relationship_id: String,
    /// Archive path of the sheet part, if the relationship resolves
    pub part: Option<String>,
}

/// Everything a lookup needs to know about the package layout
#[derive(Debug, Clone)]
pub(crate) struct WorkbookLayout {
    pub sheets: Vec<SheetEntry>,
    pub shared_strings: Option<String>,
}

/// Read the declared sheets and the shared string part location
pub(crate) fn read_layout<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    workbook_part: &str,
) -> XlsxResult<WorkbookLayout> {
    let declared = {
        let file = archive
            .by_name(workbook_part)
            .map_err(|_| XlsxError::Corrupt(format!("missing workbook part {}", workbook_part)))?;
        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        parse_declared_sheets(&mut xml_reader)?
    };

    let rels = package::read_relationships(archive, workbook_part)?;

    let sheets = declared
        .into_iter()
        .map(|(name, relationship_id)| {
            let part = rels
                .iter()
                .find(|rel| rel.id == relationship_id)
                .map(|rel| rel.target.clone());
            SheetEntry {
                name,
                relationship_id,
                part,
            }
        })
        .collect();

    let shared_strings = rels
        .iter()
        .find(|rel| rel.is_type(SHARED_STRINGS_REL))
        .map(|rel| rel.target.clone())
        .or_else(|| {
            package::has_part(archive, DEFAULT_SHARED_STRINGS_PART)
                .then(|| DEFAULT_SHARED_STRINGS_PART.to_string())
        });

    Ok(WorkbookLayout {
        sheets,
        shared_strings,
    })
}

/// Parse `<sheet name=".." r:id=".."/>` entries in document order
pub(crate) fn parse_declared_sheets<B: BufRead>(
    xml_reader: &mut Reader<B>,
) -> XlsxResult<Vec<(String, String)>> {
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"sheet" => {
                let mut name = None;
                let mut r_id = None;

                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"name" {
                        name = attr.unescape_value().ok().map(|s| s.to_string());
                    } else if attr.key.prefix().is_some()
                        && attr.key.local_name().as_ref() == b"id"
                    {
                        r_id = attr.unescape_value().ok().map(|s| s.to_string());
                    }
                }

                if let (Some(name), Some(r_id)) = (name, r_id) {
                    sheets.push((name, r_id));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}
