//! OPC package plumbing: part lookup and relationship resolution

use std::io::{BufRead, BufReader, Read, Seek};

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use zip::ZipArchive;

use crate::error::XlsxResult;

pub(crate) const CONTENT_TYPES: &str = "[Content_Types].xml";
pub(crate) const DEFAULT_WORKBOOK_PART: &str = "xl/workbook.xml";
pub(crate) const DEFAULT_SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// A resolved entry from a `.rels` part
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Relationship {
    pub id: String,
    pub rel_type: String,
    /// Archive path of the target part, without a leading slash
    pub target: String,
}

impl Relationship {
    pub fn is_type(&self, suffix: &str) -> bool {
        self.rel_type.ends_with(suffix)
    }
}

/// Check whether the archive contains a part
pub(crate) fn has_part<R: Read + Seek>(archive: &ZipArchive<R>, name: &str) -> bool {
    archive.file_names().any(|n| n == name)
}

/// Path of the relationships part that belongs to `part`
///
/// `xl/workbook.xml` maps to `xl/_rels/workbook.xml.rels` and the package
/// root (empty string) maps to `_rels/.rels`.
pub(crate) fn rels_path_for(part: &str) -> String {
    match part.rfind('/') {
        Some(pos) => format!("{}/_rels/{}.rels", &part[..pos], &part[pos + 1..]),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the part that owns the relationship
pub(crate) fn resolve_target(source_part: &str, target: &str) -> String {
    let joined = if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else {
        match source_part.rfind('/') {
            Some(pos) => format!("{}/{}", &source_part[..pos], target),
            None => target.to_string(),
        }
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }
    segments.join("/")
}

/// Read the relationships of `source_part`; a missing `.rels` part means no relationships
pub(crate) fn read_relationships<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    source_part: &str,
) -> XlsxResult<Vec<Relationship>> {
    let rels_path = rels_path_for(source_part);
    let file = match archive.by_name(&rels_path) {
        Ok(f) => f,
        Err(_) => return Ok(Vec::new()),
    };

    let mut xml_reader = Reader::from_reader(BufReader::new(file));
    parse_relationships(&mut xml_reader, source_part)
}

/// Parse a `.rels` part, skipping external targets
pub(crate) fn parse_relationships<B: BufRead>(
    xml_reader: &mut Reader<B>,
    source_part: &str,
) -> XlsxResult<Vec<Relationship>> {
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut rels = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
                let mut id = None;
                let mut target = None;
                let mut rel_type = None;
                let mut external = false;

                for attr in e.attributes().flatten() {
                    let value = match attr.unescape_value() {
                        Ok(v) => v.into_owned(),
                        Err(_) => continue,
                    };
                    match attr.key.as_ref() {
                        b"Id" => id = Some(value),
                        b"Target" => target = Some(value),
                        b"Type" => rel_type = Some(value),
                        b"TargetMode" => external = value.eq_ignore_ascii_case("External"),
                        _ => {}
                    }
                }

                if external {
                    continue;
                }
                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                    rels.push(Relationship {
                        id,
                        rel_type,
                        target: resolve_target(source_part, &target),
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Locate the main workbook part through the package root relationships
///
/// Falls back to the conventional `xl/workbook.xml` for packages without a
/// root `.rels` entry.
pub(crate) fn find_workbook_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> XlsxResult<Option<String>> {
    let root_rels = read_relationships(archive, "")?;
    let candidate = root_rels
        .into_iter()
        .find(|rel| rel.is_type(OFFICE_DOCUMENT_REL))
        .map(|rel| rel.target)
        .unwrap_or_else(|| DEFAULT_WORKBOOK_PART.to_string());

    Ok(has_part(archive, &candidate).then_some(candidate))
}
