/// Shape types and implementation for PPTX presentations.
use crate::common::RGBColor;
use crate::common::unit::pt_to_centipoints;
use crate::common::xml::escape_xml;
use crate::ooxml::charts::Chart;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::pptx::template::DEFAULT_TABLE_STYLE_ID;
use std::fmt::Write as FmtWrite;

// Import shared format types
pub use super::super::format::{ImageFormat, TextAlignment, TextFormat};

const TABLE_URI: &str = "http://schemas.openxmlformats.org/drawingml/2006/table";

/// Preset geometries for auto shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetGeometry {
    Rect,
    Ellipse,
    Triangle,
    Line,
}

impl PresetGeometry {
    fn prst(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Ellipse => "ellipse",
            Self::Triangle => "triangle",
            Self::Line => "line",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Rect => "Rectangle",
            Self::Ellipse => "Oval",
            Self::Triangle => "Triangle",
            Self::Line => "Line",
        }
    }
}

/// Outline of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub color: RGBColor,
    /// Width in EMUs
    pub width: i64,
}

/// Cell formatting shared by every cell of a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    /// Row height in EMUs
    pub row_height: i64,
    /// Font size in points
    pub font_size: f64,
    pub text_color: RGBColor,
    pub border_color: RGBColor,
    /// Border width in EMUs
    pub border_width: i64,
    /// Style the first row as a header
    pub first_row_header: bool,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            row_height: 274_320,
            font_size: 12.0,
            text_color: RGBColor::WHITE,
            border_color: RGBColor::new(0x64, 0x74, 0x8B),
            border_width: 6_350,
            first_row_header: false,
        }
    }
}

/// Where the bytes of a picture come from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PictureSource {
    /// Stored in the package as a media part
    Embedded { data: Vec<u8>, format: ImageFormat },
    /// Referenced by an external relationship
    Linked { target: String },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ShapeType {
    TextBox {
        text: String,
        format: TextFormat,
    },
    AutoShape {
        geometry: PresetGeometry,
        fill: Option<RGBColor>,
        line: Option<LineStyle>,
        alpha: Option<f64>,
    },
    Picture {
        source: PictureSource,
        description: String,
        alpha: Option<f64>,
    },
    Table {
        rows: Vec<Vec<String>>,
        style: TableStyle,
    },
    Chart {
        chart: Box<Chart>,
    },
}

/// A shape on a slide (text box, picture, table, etc.).
#[derive(Debug, Clone, PartialEq)]
pub struct MutableShape {
    pub(crate) shape_id: u32,
    pub(crate) x: i64,
    pub(crate) y: i64,
    pub(crate) width: i64,
    pub(crate) height: i64,
    /// Rotation in 1/60000 degree
    pub(crate) rotation: i64,
    pub(crate) shape_type: ShapeType,
}

impl MutableShape {
    /// Negative extents are clamped to zero.
    pub(crate) fn new(shape_id: u32, x: i64, y: i64, width: i64, height: i64, shape_type: ShapeType) -> Self {
        Self {
            shape_id,
            x,
            y,
            width: width.max(0),
            height: height.max(0),
            rotation: 0,
            shape_type,
        }
    }

    /// Get the shape id within its slide.
    pub fn shape_id(&self) -> u32 {
        self.shape_id
    }

    /// Rotation in 1/60000 degree.
    pub fn rotation(&mut self, rot: i64) -> &mut Self {
        self.rotation = rot;
        self
    }

    /// Replace the whole text format (only for text boxes).
    pub fn set_text_format(&mut self, format: TextFormat) -> &mut Self {
        if let ShapeType::TextBox { format: f, .. } = &mut self.shape_type {
            *f = format;
        }
        self
    }

    /// Builder method: set font size in points.
    pub fn font_size(&mut self, size: f64) -> &mut Self {
        if let ShapeType::TextBox { format, .. } = &mut self.shape_type {
            format.size = size;
        }
        self
    }

    /// Builder method: set bold.
    pub fn bold(&mut self, bold: bool) -> &mut Self {
        if let ShapeType::TextBox { format, .. } = &mut self.shape_type {
            format.bold = bold;
        }
        self
    }

    /// Builder method: set italic.
    pub fn italic(&mut self, italic: bool) -> &mut Self {
        if let ShapeType::TextBox { format, .. } = &mut self.shape_type {
            format.italic = italic;
        }
        self
    }

    /// Builder method: set text color.
    pub fn color(&mut self, color: RGBColor) -> &mut Self {
        if let ShapeType::TextBox { format, .. } = &mut self.shape_type {
            format.color = color;
        }
        self
    }

    /// Builder method: set paragraph alignment.
    pub fn align(&mut self, alignment: TextAlignment) -> &mut Self {
        if let ShapeType::TextBox { format, .. } = &mut self.shape_type {
            format.alignment = alignment;
        }
        self
    }

    /// Fill color of a text box or auto shape.
    pub fn fill(&mut self, color: RGBColor) -> &mut Self {
        match &mut self.shape_type {
            ShapeType::TextBox { format, .. } => format.fill = Some(color),
            ShapeType::AutoShape { fill, .. } => *fill = Some(color),
            _ => {},
        }
        self
    }

    /// Remove the fill of an auto shape.
    pub fn no_fill(&mut self) -> &mut Self {
        if let ShapeType::AutoShape { fill, .. } = &mut self.shape_type {
            *fill = None;
        }
        self
    }

    /// Outline of an auto shape.
    pub fn line(&mut self, color: RGBColor, width: i64) -> &mut Self {
        if let ShapeType::AutoShape { line, .. } = &mut self.shape_type {
            *line = Some(LineStyle { color, width });
        }
        self
    }

    /// Opacity from 0.0 to 1.0 (not for tables and charts).
    pub fn alpha(&mut self, opacity: f64) -> &mut Self {
        let opacity = opacity.clamp(0.0, 1.0);
        match &mut self.shape_type {
            ShapeType::TextBox { format, .. } => format.alpha = Some(opacity),
            ShapeType::AutoShape { alpha, .. } | ShapeType::Picture { alpha, .. } => {
                *alpha = Some(opacity)
            },
            _ => {},
        }
        self
    }

    /// Replace the table style (only for tables).
    pub fn table_style(&mut self, table_style: TableStyle) -> &mut Self {
        if let ShapeType::Table { style, .. } = &mut self.shape_type {
            *style = table_style;
        }
        self
    }

    /// Whether this shape needs a relationship from its slide.
    pub(crate) fn needs_relationship(&self) -> bool {
        matches!(
            self.shape_type,
            ShapeType::Picture { .. } | ShapeType::Chart { .. }
        )
    }

    /// Generate XML for this shape.
    ///
    /// Pictures and charts need the relationship id of their target.
    pub(crate) fn to_xml(&self, xml: &mut String, rel_id: Option<&str>) -> Result<()> {
        match &self.shape_type {
            ShapeType::TextBox { text, format } => self.write_text_box(xml, text, format),
            ShapeType::AutoShape {
                geometry,
                fill,
                line,
                alpha,
            } => self.write_auto_shape(xml, *geometry, *fill, *line, *alpha),
            ShapeType::Picture {
                source,
                description,
                alpha,
            } => {
                let rid = rel_id.ok_or_else(|| missing_relationship(self.shape_id))?;
                self.write_picture(xml, source, description, *alpha, rid)
            },
            ShapeType::Table { rows, style } => self.write_table(xml, rows, style),
            ShapeType::Chart { .. } => {
                let rid = rel_id.ok_or_else(|| missing_relationship(self.shape_id))?;
                self.write_chart_frame(xml, rid)
            },
        }
    }

    fn write_xfrm(&self, xml: &mut String, tag: &str) -> Result<()> {
        if self.rotation != 0 {
            write!(xml, r#"<{} rot="{}">"#, tag, self.rotation)?;
        } else {
            write!(xml, "<{}>", tag)?;
        }
        write!(xml, r#"<a:off x="{}" y="{}"/>"#, self.x, self.y)?;
        write!(xml, r#"<a:ext cx="{}" cy="{}"/>"#, self.width, self.height)?;
        write!(xml, "</{}>", tag)?;
        Ok(())
    }

    fn write_text_box(&self, xml: &mut String, text: &str, format: &TextFormat) -> Result<()> {
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="TextBox {}"/>"#,
            self.shape_id, self.shape_id
        )?;
        xml.push_str(r#"<p:cNvSpPr txBox="1"/>"#);
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvSpPr>");

        xml.push_str("<p:spPr>");
        self.write_xfrm(xml, "a:xfrm")?;
        xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
        match format.fill {
            Some(color) => write_solid_fill(xml, color, format.alpha)?,
            None => xml.push_str("<a:noFill/>"),
        }
        xml.push_str("</p:spPr>");

        xml.push_str("<p:txBody>");
        xml.push_str(r#"<a:bodyPr wrap="square" rtlCol="0"><a:noAutofit/></a:bodyPr>"#);
        xml.push_str("<a:lstStyle/>");

        let size = font_size_value(format.size);
        for line in text.split('\n') {
            xml.push_str("<a:p>");
            write!(xml, r#"<a:pPr algn="{}"/>"#, format.alignment.to_xml_value())?;
            if line.is_empty() {
                write!(xml, r#"<a:endParaRPr lang="en-US" sz="{}" dirty="0"/>"#, size)?;
            } else {
                xml.push_str("<a:r>");
                write!(xml, r#"<a:rPr lang="en-US" sz="{}""#, size)?;
                if format.bold {
                    xml.push_str(r#" b="1""#);
                }
                if format.italic {
                    xml.push_str(r#" i="1""#);
                }
                xml.push_str(r#" dirty="0">"#);
                write_solid_fill(xml, format.color, format.alpha)?;
                xml.push_str("</a:rPr>");
                write!(xml, "<a:t>{}</a:t>", escape_xml(line))?;
                xml.push_str("</a:r>");
            }
            xml.push_str("</a:p>");
        }

        xml.push_str("</p:txBody>");
        xml.push_str("</p:sp>");
        Ok(())
    }

    fn write_auto_shape(
        &self,
        xml: &mut String,
        geometry: PresetGeometry,
        fill: Option<RGBColor>,
        line: Option<LineStyle>,
        alpha: Option<f64>,
    ) -> Result<()> {
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="{} {}"/>"#,
            self.shape_id,
            geometry.name(),
            self.shape_id
        )?;
        xml.push_str("<p:cNvSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvSpPr>");

        xml.push_str("<p:spPr>");
        self.write_xfrm(xml, "a:xfrm")?;
        write!(xml, r#"<a:prstGeom prst="{}"><a:avLst/></a:prstGeom>"#, geometry.prst())?;
        match fill {
            Some(color) => write_solid_fill(xml, color, alpha)?,
            None => xml.push_str("<a:noFill/>"),
        }
        match line {
            Some(line) => {
                write!(xml, r#"<a:ln w="{}">"#, line.width)?;
                write_solid_fill(xml, line.color, alpha)?;
                xml.push_str("</a:ln>");
            },
            None => xml.push_str("<a:ln><a:noFill/></a:ln>"),
        }
        xml.push_str("</p:spPr>");
        xml.push_str("</p:sp>");
        Ok(())
    }

    fn write_picture(
        &self,
        xml: &mut String,
        source: &PictureSource,
        description: &str,
        alpha: Option<f64>,
        rel_id: &str,
    ) -> Result<()> {
        xml.push_str("<p:pic>");
        xml.push_str("<p:nvPicPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="Picture {}" descr="{}"/>"#,
            self.shape_id,
            self.shape_id,
            escape_xml(description)
        )?;
        xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>"#);
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvPicPr>");

        xml.push_str("<p:blipFill>");
        let attr = match source {
            PictureSource::Embedded { .. } => "r:embed",
            PictureSource::Linked { .. } => "r:link",
        };
        match alpha {
            Some(opacity) if opacity < 1.0 => {
                write!(
                    xml,
                    r#"<a:blip {}="{}"><a:alphaModFix amt="{}"/></a:blip>"#,
                    attr,
                    rel_id,
                    alpha_value(opacity)
                )?;
            },
            _ => write!(xml, r#"<a:blip {}="{}"/>"#, attr, rel_id)?,
        }
        xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
        xml.push_str("</p:blipFill>");

        xml.push_str("<p:spPr>");
        self.write_xfrm(xml, "a:xfrm")?;
        xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
        xml.push_str("</p:spPr>");
        xml.push_str("</p:pic>");
        Ok(())
    }

    fn write_frame_start(&self, xml: &mut String, name: &str, locks: &str) -> Result<()> {
        xml.push_str("<p:graphicFrame>");
        xml.push_str("<p:nvGraphicFramePr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="{} {}"/>"#,
            self.shape_id, name, self.shape_id
        )?;
        write!(xml, "<p:cNvGraphicFramePr>{}</p:cNvGraphicFramePr>", locks)?;
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGraphicFramePr>");
        self.write_xfrm(xml, "p:xfrm")
    }

    fn write_chart_frame(&self, xml: &mut String, rel_id: &str) -> Result<()> {
        self.write_frame_start(xml, "Chart", "")?;
        write!(
            xml,
            r#"<a:graphic><a:graphicData uri="{0}"><c:chart xmlns:c="{0}" r:id="{1}"/></a:graphicData></a:graphic>"#,
            namespace::DML_CHART,
            rel_id
        )?;
        xml.push_str("</p:graphicFrame>");
        Ok(())
    }

    fn write_table(&self, xml: &mut String, rows: &[Vec<String>], style: &TableStyle) -> Result<()> {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let row_count = rows.len().max(1);

        self.write_frame_start(xml, "Table", r#"<a:graphicFrameLocks noGrp="1"/>"#)?;
        write!(xml, r#"<a:graphic><a:graphicData uri="{}"><a:tbl>"#, TABLE_URI)?;
        write!(
            xml,
            r#"<a:tblPr firstRow="{}" bandRow="1"><a:tableStyleId>{}</a:tableStyleId></a:tblPr>"#,
            if style.first_row_header { "1" } else { "0" },
            DEFAULT_TABLE_STYLE_ID
        )?;

        // equal columns, the last one absorbing the rounding remainder
        let column_width = self.width / columns as i64;
        xml.push_str("<a:tblGrid>");
        for col in 0..columns {
            let w = if col + 1 == columns {
                self.width - column_width * (columns as i64 - 1)
            } else {
                column_width
            };
            write!(xml, r#"<a:gridCol w="{}"/>"#, w)?;
        }
        xml.push_str("</a:tblGrid>");

        let size = font_size_value(style.font_size);
        for row_idx in 0..row_count {
            let row = rows.get(row_idx).map(Vec::as_slice).unwrap_or(&[]);
            let bold = style.first_row_header && row_idx == 0;
            write!(xml, r#"<a:tr h="{}">"#, style.row_height)?;
            for col in 0..columns {
                xml.push_str("<a:tc><a:txBody><a:bodyPr/><a:lstStyle/><a:p>");
                match row.get(col).filter(|text| !text.is_empty()) {
                    Some(text) => {
                        write!(xml, r#"<a:r><a:rPr lang="en-US" sz="{}""#, size)?;
                        if bold {
                            xml.push_str(r#" b="1""#);
                        }
                        xml.push_str(r#" dirty="0">"#);
                        write_solid_fill(xml, style.text_color, None)?;
                        write!(xml, "</a:rPr><a:t>{}</a:t></a:r>", escape_xml(text))?;
                    },
                    None => write!(xml, r#"<a:endParaRPr lang="en-US" sz="{}"/>"#, size)?,
                }
                xml.push_str("</a:p></a:txBody><a:tcPr>");
                for edge in ["a:lnL", "a:lnR", "a:lnT", "a:lnB"] {
                    write!(xml, r#"<{} w="{}">"#, edge, style.border_width)?;
                    write_solid_fill(xml, style.border_color, None)?;
                    write!(xml, "</{}>", edge)?;
                }
                xml.push_str("<a:noFill/></a:tcPr></a:tc>");
            }
            xml.push_str("</a:tr>");
        }

        xml.push_str("</a:tbl></a:graphicData></a:graphic>");
        xml.push_str("</p:graphicFrame>");
        Ok(())
    }
}

fn missing_relationship(shape_id: u32) -> OoxmlError {
    OoxmlError::InvalidRelationship(format!("shape {} has no relationship id", shape_id))
}

/// Opacity to the DrawingML percentage unit (1/1000 percent).
/// `sz` value in hundredths of a point, within 1pt..4000pt.
fn font_size_value(pt: f64) -> u32 {
    pt_to_centipoints(pt).clamp(100, 400_000)
}

fn alpha_value(opacity: f64) -> u32 {
    (opacity.clamp(0.0, 1.0) * 100_000.0).round() as u32
}

fn write_solid_fill(xml: &mut String, color: RGBColor, alpha: Option<f64>) -> Result<()> {
    match alpha {
        Some(opacity) if opacity < 1.0 => write!(
            xml,
            r#"<a:solidFill><a:srgbClr val="{}"><a:alpha val="{}"/></a:srgbClr></a:solidFill>"#,
            color.to_hex(),
            alpha_value(opacity)
        )?,
        _ => write!(
            xml,
            r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
            color.to_hex()
        )?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shape: &MutableShape, rel_id: Option<&str>) -> String {
        let mut xml = String::new();
        shape.to_xml(&mut xml, rel_id).unwrap();
        xml
    }

    fn text_box(text: &str) -> MutableShape {
        MutableShape::new(
            3,
            914_400,
            1_828_800,
            4_572_000,
            914_400,
            ShapeType::TextBox {
                text: text.to_string(),
                format: TextFormat::default(),
            },
        )
    }

    #[test]
    fn test_text_box_paragraphs() {
        let mut shape = text_box("Title\n\n<b> & more");
        shape.bold(true).font_size(36.0).align(TextAlignment::Center);
        let xml = render(&shape, None);

        assert!(xml.contains(r#"<p:cNvSpPr txBox="1"/>"#));
        assert!(xml.contains(r#"<a:off x="914400" y="1828800"/>"#));
        assert_eq!(xml.matches("<a:p>").count(), 3);
        assert!(xml.contains(r#"sz="3600" b="1""#));
        assert!(xml.contains(r#"<a:pPr algn="ctr"/>"#));
        assert!(xml.contains("<a:t>&lt;b&gt; &amp; more</a:t>"));
        assert!(xml.contains(r#"<a:srgbClr val="FFFFFF"/>"#));
        assert!(!xml.contains("rot="));
    }

    #[test]
    fn test_rotation_and_alpha() {
        let mut shape = text_box("x");
        shape.rotation(5_400_000).alpha(0.5).fill(RGBColor::BLACK);
        let xml = render(&shape, None);
        assert!(xml.contains(r#"<a:xfrm rot="5400000">"#));
        assert!(xml.contains(r#"<a:srgbClr val="000000"><a:alpha val="50000"/></a:srgbClr>"#));
    }

    #[test]
    fn test_auto_shape_geometry_and_line() {
        let mut shape = MutableShape::new(
            4,
            0,
            0,
            100,
            100,
            ShapeType::AutoShape {
                geometry: PresetGeometry::Ellipse,
                fill: Some(RGBColor::new(0x38, 0xBD, 0xF8)),
                line: None,
                alpha: None,
            },
        );
        let xml = render(&shape, None);
        assert!(xml.contains(r#"<a:prstGeom prst="ellipse">"#));
        assert!(xml.contains("<a:ln><a:noFill/></a:ln>"));

        shape.line(RGBColor::WHITE, 12_700);
        let xml = render(&shape, None);
        assert!(xml.contains(r#"<a:ln w="12700"><a:solidFill><a:srgbClr val="FFFFFF"/>"#));
    }

    #[test]
    fn test_picture_requires_relationship() {
        let shape = MutableShape::new(
            5,
            0,
            0,
            10,
            10,
            ShapeType::Picture {
                source: PictureSource::Linked {
                    target: "https://example.com/a.png".into(),
                },
                description: "logo".into(),
                alpha: None,
            },
        );
        let mut xml = String::new();
        assert!(shape.to_xml(&mut xml, None).is_err());

        let xml = render(&shape, Some("rId2"));
        assert!(xml.contains(r#"<a:blip r:link="rId2"/>"#));
        assert!(xml.contains(r#"descr="logo""#));
    }

    #[test]
    fn test_table_grid_and_padding() {
        let shape = MutableShape::new(
            6,
            0,
            0,
            1000,
            600,
            ShapeType::Table {
                rows: vec![
                    vec!["Name".into(), "Value".into(), "Note".into()],
                    vec!["a".into()],
                ],
                style: TableStyle {
                    first_row_header: true,
                    ..TableStyle::default()
                },
            },
        );
        let xml = render(&shape, None);
        assert!(xml.contains(r#"<a:gridCol w="333"/>"#));
        assert!(xml.contains(r#"<a:gridCol w="334"/>"#));
        assert_eq!(xml.matches("<a:tc>").count(), 6);
        assert_eq!(xml.matches(r#"<a:tr h="274320">"#).count(), 2);
        assert!(xml.contains(r#"<a:tblPr firstRow="1" bandRow="1">"#));
        assert!(xml.contains(r#"<a:lnL w="6350"><a:solidFill><a:srgbClr val="64748B"/>"#));
        assert!(xml.contains(r#"sz="1200" b="1""#));
    }

    #[test]
    fn test_empty_table_still_has_a_cell() {
        let shape = MutableShape::new(
            7,
            0,
            0,
            100,
            100,
            ShapeType::Table {
                rows: Vec::new(),
                style: TableStyle::default(),
            },
        );
        let xml = render(&shape, None);
        assert_eq!(xml.matches("<a:tc>").count(), 1);
    }

    #[test]
    fn test_out_of_range_sizes_are_clamped() {
        let mut shape = MutableShape::new(
            8,
            10,
            10,
            -500,
            -1,
            ShapeType::TextBox {
                text: "tiny".into(),
                format: TextFormat::default(),
            },
        );
        shape.font_size(0.0);
        let xml = render(&shape, None);
        assert!(xml.contains(r#"<a:ext cx="0" cy="0"/>"#));
        assert!(xml.contains(r#"sz="100""#));

        shape.font_size(10_000.0);
        assert!(render(&shape, None).contains(r#"sz="400000""#));
    }

    #[test]
    fn test_set_text_format_replaces_all_fields() {
        let mut shape = text_box("Caption");
        shape.set_text_format(TextFormat {
            size: 24.0,
            italic: true,
            color: RGBColor::BLACK,
            alignment: TextAlignment::Right,
            fill: Some(RGBColor::WHITE),
            ..TextFormat::default()
        });
        let xml = render(&shape, None);
        assert!(xml.contains(r#"sz="2400" i="1""#));
        assert!(xml.contains(r#"<a:pPr algn="r"/>"#));
        assert!(xml.contains(r#"<a:srgbClr val="000000"/>"#));
        assert!(!xml.contains("<a:noFill/></p:spPr>"));
    }

    #[test]
    fn test_no_fill_removes_shape_fill() {
        let mut shape = MutableShape::new(
            9,
            0,
            0,
            100,
            100,
            ShapeType::AutoShape {
                geometry: PresetGeometry::Rect,
                fill: Some(RGBColor::BLACK),
                line: None,
                alpha: None,
            },
        );
        assert!(render(&shape, None).contains(r#"<a:srgbClr val="000000"/>"#));
        shape.no_fill();
        let xml = render(&shape, None);
        assert!(!xml.contains("000000"));
        assert!(xml.contains("<a:noFill/>"));
    }
}
