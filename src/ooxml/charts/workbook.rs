//! Embedded workbook holding a chart's data.
//!
//! PowerPoint opens this workbook when the user edits chart data. The layout
//! matches the references the chart writer emits:
//!
//! ```text
//!     |    A     |    B     |    C     |
//! ----+----------+----------+----------+
//!   1 |          | Series 1 | Series 2 |
//!   2 | Cat 1    |   10.0   |   15.0   |
//!   3 | Cat 2    |   20.0   |   25.0   |
//! ```

use super::models::Chart;
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, namespace, relationship_type as rt};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::{BlobPart, Compression, OpcPackage, PackURI, PackageWriter, Part};
use std::fmt::Write as _;

/// Name of the single worksheet.
pub const SHEET_NAME: &str = "Sheet1";

/// Generate a minimal `.xlsx` workbook containing the chart data.
///
/// The workbook is an OPC package of its own, written with the same
/// deterministic package writer as the presentation.
pub fn generate_chart_workbook(chart: &Chart) -> Result<Vec<u8>> {
    let workbook_uri = pack_uri("/xl/workbook.xml")?;
    let sheet_uri = pack_uri("/xl/worksheets/sheet1.xml")?;

    let mut workbook = BlobPart::from_xml(workbook_uri.clone(), ct::SML_SHEET_MAIN, workbook_xml()?);
    workbook.relate_to(&sheet_uri, rt::WORKSHEET);
    let sheet = BlobPart::from_xml(sheet_uri, ct::SML_WORKSHEET, worksheet_xml(chart)?);

    let mut package = OpcPackage::new();
    package.relate_to(&workbook_uri, rt::OFFICE_DOCUMENT);
    package.add_blob_part(workbook)?;
    package.add_blob_part(sheet)?;

    Ok(PackageWriter::to_bytes(&package, Compression::Deflated)?)
}

fn pack_uri(name: &str) -> Result<PackURI> {
    Ok(PackURI::new(name).map_err(OpcError::InvalidPackUri)?)
}

fn workbook_xml() -> Result<String> {
    let mut xml = String::with_capacity(320);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    write!(
        xml,
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="{}">"#,
        namespace::OFC_RELATIONSHIPS
    )?;
    write!(
        xml,
        r#"<sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets>"#,
        SHEET_NAME
    )?;
    xml.push_str("</workbook>");
    Ok(xml)
}

fn worksheet_xml(chart: &Chart) -> Result<String> {
    let rows = chart.row_count();
    let mut xml = String::with_capacity(1024 + rows * 64 * (chart.series.len() + 1));
    let mut number = ryu::Buffer::new();

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#);
    xml.push_str("<sheetData>");

    // header row: series names from column B
    xml.push_str(r#"<row r="1">"#);
    for (index, series) in chart.series.iter().enumerate() {
        write!(
            xml,
            r#"<c r="{}1" t="inlineStr"><is><t>{}</t></is></c>"#,
            column_letter(index + 1),
            escape_xml(&series.name)
        )?;
    }
    xml.push_str("</row>");

    for row in 0..rows {
        let row_num = row + 2;
        write!(xml, r#"<row r="{}">"#, row_num)?;

        if let Some(category) = chart.categories.get(row) {
            write!(
                xml,
                r#"<c r="A{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                row_num,
                escape_xml(category)
            )?;
        }

        for (index, series) in chart.series.iter().enumerate() {
            if let Some(value) = series.values.get(row).filter(|v| v.is_finite()) {
                write!(
                    xml,
                    r#"<c r="{}{}"><v>{}</v></c>"#,
                    column_letter(index + 1),
                    row_num,
                    number.format_finite(*value)
                )?;
            }
        }

        xml.push_str("</row>");
    }

    xml.push_str("</sheetData>");
    xml.push_str("</worksheet>");
    Ok(xml)
}

/// Convert a 0-based column index to its spreadsheet letter (0=A, 25=Z, 26=AA).
pub fn column_letter(col: usize) -> String {
    let mut result = Vec::new();
    let mut n = col;
    loop {
        result.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result.reverse();
    result.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::charts::models::{ChartSeries, ChartType};
    use std::io::{Cursor, Read};

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(1), "B");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_workbook_contents() {
        let chart = Chart::new(ChartType::Bar, vec!["North".into(), "South & East".into()])
            .with_series(ChartSeries::new("2024", vec![1.5, 2.0]))
            .with_series(ChartSeries::new("2025", vec![3.0, 4.0]));

        let bytes = generate_chart_workbook(&chart).unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 5);

        let mut sheet = String::new();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut sheet)
            .unwrap();
        assert!(sheet.contains(r#"<c r="B1" t="inlineStr"><is><t>2024</t></is></c>"#));
        assert!(sheet.contains("South &amp; East"));
        assert!(sheet.contains(r#"<c r="B2"><v>1.5</v></c>"#));
        assert!(sheet.contains(r#"<c r="C3"><v>4.0</v></c>"#));

        let mut rels = String::new();
        archive
            .by_name("xl/_rels/workbook.xml.rels")
            .unwrap()
            .read_to_string(&mut rels)
            .unwrap();
        assert!(rels.contains(r#"Target="worksheets/sheet1.xml""#));

        let mut root = String::new();
        archive.by_name("_rels/.rels").unwrap().read_to_string(&mut root).unwrap();
        assert!(root.contains(r#"Target="xl/workbook.xml""#));
    }

    #[test]
    fn test_workbook_is_deterministic() {
        let chart = Chart::new(ChartType::Pie, vec!["a".into()])
            .with_series(ChartSeries::new("s", vec![1.0]));
        assert_eq!(
            generate_chart_workbook(&chart).unwrap(),
            generate_chart_workbook(&chart).unwrap()
        );
    }
}
