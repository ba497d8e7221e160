//! Common utilities for E2E tests.
//!
//! Fixtures are built in memory with `zip::ZipWriter`, so the tests need no
//! external tooling.

use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};

/// Escape text for use in XML content and attribute values
pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Builder for small XLSX packages.
///
/// Sheets are given as the XML that goes inside `<sheetData>`, or as a whole
/// worksheet document via [`FixtureBuilder::raw_sheet`].
#[derive(Debug, Default, Clone)]
pub struct FixtureBuilder {
    shared_strings: Vec<String>,
    sheets: Vec<(String, String)>,
    omit_content_types: bool,
    omit_shared_strings: bool,
}

#[allow(dead_code)]
impl FixtureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the shared string table
    pub fn shared_string(mut self, s: &str) -> Self {
        self.shared_strings.push(s.to_string());
        self
    }

    /// Add a sheet whose `<sheetData>` contains `rows_xml`
    pub fn sheet(mut self, name: &str, rows_xml: &str) -> Self {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetViews><sheetView workbookViewId="0"/></sheetViews>
<sheetData>{}</sheetData>
</worksheet>"#,
            rows_xml
        );
        self.sheets.push((name.to_string(), xml));
        self
    }

    /// Add a sheet with the complete worksheet document `xml`
    pub fn raw_sheet(mut self, name: &str, xml: &str) -> Self {
        self.sheets.push((name.to_string(), xml.to_string()));
        self
    }

    pub fn without_content_types(mut self) -> Self {
        self.omit_content_types = true;
        self
    }

    pub fn without_shared_strings(mut self) -> Self {
        self.omit_shared_strings = true;
        self
    }

    /// Build the package bytes
    pub fn build(&self) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        self.write_package(&mut buf);
        buf.into_inner()
    }

    fn write_package<W: Write + Seek>(&self, writer: W) {
        let mut zip = zip::ZipWriter::new(writer);
        let options = zip::write::SimpleFileOptions::default();

        if !self.omit_content_types {
            let mut content = String::from(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
            );
            for i in 0..self.sheets.len() {
                content.push_str(&format!(
                    r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                    i + 1
                ));
            }
            content.push_str("</Types>");
            zip.start_file("[Content_Types].xml", options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }

        zip.start_file("_rels/.rels", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#,
        )
        .unwrap();

        // Sheet relationships are numbered from rId3 to check that lookups
        // go through the relationship id rather than the sheet position
        let mut workbook = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>"#,
        );
        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (i, (name, _)) in self.sheets.iter().enumerate() {
            workbook.push_str(&format!(
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                xml_escape(name),
                i + 1,
                i + 3
            ));
            rels.push_str(&format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 3,
                i + 1
            ));
        }
        workbook.push_str("</sheets></workbook>");
        if !self.omit_shared_strings {
            rels.push_str(
                r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
            );
        }
        rels.push_str("</Relationships>");

        zip.start_file("xl/workbook.xml", options).unwrap();
        zip.write_all(workbook.as_bytes()).unwrap();
        zip.start_file("xl/_rels/workbook.xml.rels", options).unwrap();
        zip.write_all(rels.as_bytes()).unwrap();

        if !self.omit_shared_strings {
            let mut sst = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{0}" uniqueCount="{0}">"#,
                self.shared_strings.len()
            );
            for s in &self.shared_strings {
                sst.push_str(&format!("<si><t>{}</t></si>", xml_escape(s)));
            }
            sst.push_str("</sst>");
            zip.start_file("xl/sharedStrings.xml", options).unwrap();
            zip.write_all(sst.as_bytes()).unwrap();
        }

        for (i, (_, xml)) in self.sheets.iter().enumerate() {
            zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)
                .unwrap();
            zip.write_all(xml.as_bytes()).unwrap();
        }

        zip.finish().unwrap();
    }

    /// Write the package to `dir/file_name` and return the path
    pub fn write_to(&self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

/// Shared string cell XML, e.g. `<c r="B2" t="s"><v>3</v></c>`
pub fn shared_cell(reference: &str, index: usize) -> String {
    format!(r#"<c r="{}" t="s"><v>{}</v></c>"#, reference, index)
}

/// A row with the given cells
pub fn row(number: u32, cells: &[String]) -> String {
    format!(r#"<row r="{}">{}</row>"#, number, cells.concat())
}

/// Dense workbook in the shape of a typical data export.
///
/// Sheet "Value 1" has 183 rows of 68 shared-string cells (A..BP); O41
/// holds "9Ok$4Sx," and BP183 holds "8Xp&6Sd/". Sheet "Value 2" has a
/// formula in A1 whose cached result is "5Rg+7Vd*".
pub fn value_workbook() -> FixtureBuilder {
    let mut rows = String::new();
    for r in 1..=183u32 {
        let cells: Vec<String> = (1..=68u32)
            .map(|c| {
                let reference = format!("{}{}", slim_sheets_core::column_to_letters(c), r);
                let index = match (r, c) {
                    (41, 15) => 1,
                    (183, 68) => 2,
                    _ => 0,
                };
                shared_cell(&reference, index)
            })
            .collect();
        rows.push_str(&row(r, &cells));
    }

    let formula_rows = row(
        1,
        &[
            r#"<c r="A1" t="str"><f>CONCATENATE("5Rg+","7Vd*")</f><v>5Rg+7Vd*</v></c>"#.to_string(),
            shared_cell("B1", 0),
        ],
    );

    FixtureBuilder::new()
        .shared_string("filler")
        .shared_string("9Ok$4Sx,")
        .shared_string("8Xp&6Sd/")
        .sheet("Value 1", &rows)
        .sheet("Value 2", &formula_rows)
}
