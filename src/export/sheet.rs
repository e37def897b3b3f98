//! Requirements spreadsheet
//!
//! The sheet keeps the two-column layout `Requirement | Description` and is
//! written as an Office Open XML workbook (`.xlsx`): a ZIP package holding
//! the content types, the package and workbook relationships, the workbook
//! and one worksheet. Cells are inline strings, so no shared string table is
//! needed.

use std::io::{Seek, Write};

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Error, Result};
use crate::model::RequirementAnnotation;

/// Column headers of the requirements sheet
pub const HEADER: [&str; 2] = ["Requirement", "Description"];

/// Name of the single worksheet
pub const WORKSHEET_NAME: &str = "Requirements";

/// Package part holding the content types
pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";

/// Package relationships part
pub const RELS_PATH: &str = "_rels/.rels";

/// Workbook part
pub const WORKBOOK_PATH: &str = "xl/workbook.xml";

/// Workbook relationships part
pub const WORKBOOK_RELS_PATH: &str = "xl/_rels/workbook.xml.rels";

/// Worksheet part
pub const WORKSHEET_PATH: &str = "xl/worksheets/sheet1.xml";

const MAIN_NAMESPACE: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
  <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

/// Table rows, header first
pub fn requirements_rows(requirements: &[RequirementAnnotation]) -> Vec<[String; 2]> {
    let header = [HEADER[0].to_string(), HEADER[1].to_string()];
    std::iter::once(header)
        .chain(
            requirements
                .iter()
                .map(|r| [r.id.clone(), r.description.clone()]),
        )
        .collect()
}

/// Write the requirements table as an `.xlsx` package
///
/// Returns the writer after the archive is finished.
pub fn write_requirements_workbook<W: Write + Seek>(
    requirements: &[RequirementAnnotation],
    writer: W,
) -> Result<W> {
    let workbook = workbook_xml()?;
    let worksheet = worksheet_xml(requirements)?;

    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default();
    let parts = [
        (CONTENT_TYPES_PATH, CONTENT_TYPES),
        (RELS_PATH, RELS),
        (WORKBOOK_PATH, workbook.as_str()),
        (WORKBOOK_RELS_PATH, WORKBOOK_RELS),
        (WORKSHEET_PATH, worksheet.as_str()),
    ];
    for (name, content) in parts {
        zip.start_file(name, options)
            .map_err(|e| Error::export(format!("Failed to create {}: {}", name, e)))?;
        zip.write_all(content.as_bytes())
            .map_err(|e| Error::export(format!("Failed to write {}: {}", name, e)))?;
    }

    zip.finish()
        .map_err(|e| Error::export(format!("Failed to finalize workbook archive: {}", e)))
}

/// The workbook part, declaring the single worksheet
pub fn workbook_xml() -> Result<String> {
    let mut xml = Writer::new(Vec::new());
    declaration(&mut xml)?;

    let mut workbook = BytesStart::new("workbook");
    workbook.push_attribute(("xmlns", MAIN_NAMESPACE));
    workbook.push_attribute((
        "xmlns:r",
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships",
    ));
    start(&mut xml, workbook)?;
    start(&mut xml, BytesStart::new("sheets"))?;
    let mut sheet = BytesStart::new("sheet");
    sheet.push_attribute(("name", WORKSHEET_NAME));
    sheet.push_attribute(("sheetId", "1"));
    sheet.push_attribute(("r:id", "rId1"));
    xml.write_event(Event::Empty(sheet))
        .map_err(|e| Error::export(format!("Failed to write sheet element: {}", e)))?;
    end(&mut xml, "sheets")?;
    end(&mut xml, "workbook")?;

    into_string(xml)
}

/// The worksheet part: header row then one row per requirement
pub fn worksheet_xml(requirements: &[RequirementAnnotation]) -> Result<String> {
    let mut xml = Writer::new(Vec::new());
    declaration(&mut xml)?;

    let mut worksheet = BytesStart::new("worksheet");
    worksheet.push_attribute(("xmlns", MAIN_NAMESPACE));
    start(&mut xml, worksheet)?;
    start(&mut xml, BytesStart::new("sheetData"))?;

    for (index, row) in requirements_rows(requirements).iter().enumerate() {
        let number = (index + 1).to_string();
        let mut row_start = BytesStart::new("row");
        row_start.push_attribute(("r", number.as_str()));
        start(&mut xml, row_start)?;
        for (column, value) in ["A", "B"].iter().zip(row) {
            let reference = format!("{}{}", column, number);
            let mut cell = BytesStart::new("c");
            cell.push_attribute(("r", reference.as_str()));
            cell.push_attribute(("t", "inlineStr"));
            start(&mut xml, cell)?;
            start(&mut xml, BytesStart::new("is"))?;
            let mut text = BytesStart::new("t");
            if value.trim() != value.as_str() {
                text.push_attribute(("xml:space", "preserve"));
            }
            start(&mut xml, text)?;
            xml.write_event(Event::Text(BytesText::new(value)))
                .map_err(|e| Error::export(format!("Failed to write cell {}: {}", reference, e)))?;
            end(&mut xml, "t")?;
            end(&mut xml, "is")?;
            end(&mut xml, "c")?;
        }
        end(&mut xml, "row")?;
    }

    end(&mut xml, "sheetData")?;
    end(&mut xml, "worksheet")?;

    into_string(xml)
}

fn declaration(xml: &mut Writer<Vec<u8>>) -> Result<()> {
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(|e| Error::export(format!("Failed to write XML declaration: {}", e)))
}

fn start(xml: &mut Writer<Vec<u8>>, element: BytesStart<'_>) -> Result<()> {
    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    xml.write_event(Event::Start(element))
        .map_err(|e| Error::export(format!("Failed to write {} element: {}", name, e)))
}

fn end(xml: &mut Writer<Vec<u8>>, name: &str) -> Result<()> {
    xml.write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| Error::export(format!("Failed to close {} element: {}", name, e)))
}

fn into_string(xml: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(xml.into_inner())
        .map_err(|e| Error::export(format!("Generated XML is not UTF-8: {}", e)))
}
