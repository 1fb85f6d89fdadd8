/// Presentation writer for PPTX.
use crate::ooxml::charts::{chart_to_bytes, generate_chart_workbook};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, namespace, relationship_type as rt};
use crate::ooxml::opc::{BlobPart, Compression, OpcPackage, PackURI, PackageWriter, Part};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::pptx::template::{self, DocumentProperties, SLIDE_MASTER_ID, ThemeColors};
use std::fmt::Write as FmtWrite;
use std::io::Write;
use std::path::Path;

use super::relmap::RelationshipMapper;
use super::shape::{PictureSource, ShapeType};
use super::slide::MutableSlide;

const PRESENTATION_URI: &str = "/ppt/presentation.xml";
const SLIDE_MASTER_URI: &str = "/ppt/slideMasters/slideMaster1.xml";
const SLIDE_LAYOUT_URI: &str = "/ppt/slideLayouts/slideLayout1.xml";
const THEME_URI: &str = "/ppt/theme/theme1.xml";
const PRES_PROPS_URI: &str = "/ppt/presProps.xml";
const VIEW_PROPS_URI: &str = "/ppt/viewProps.xml";
const TABLE_STYLES_URI: &str = "/ppt/tableStyles.xml";
const CORE_PROPS_URI: &str = "/docProps/core.xml";
const APP_PROPS_URI: &str = "/docProps/app.xml";

/// Notes page size; PowerPoint expects one even without notes.
const NOTES_WIDTH: i64 = 6_858_000;
const NOTES_HEIGHT: i64 = 9_144_000;

fn pack_uri(uri: impl Into<String>) -> Result<PackURI> {
    PackURI::new(uri).map_err(|e| OoxmlError::Opc(OpcError::InvalidPackUri(e)))
}

/// A mutable PowerPoint presentation for writing.
///
/// Slides are added in order and the whole presentation is turned into an
/// OPC package by [`to_package`](Self::to_package). Output is deterministic:
/// the same presentation always produces the same bytes.
///
/// # Examples
///
/// ```rust
/// use slidecraft::ooxml::pptx::{MutablePresentation, PresetGeometry};
///
/// let mut pres = MutablePresentation::new();
/// let slide = pres.add_slide();
/// slide.add_text_box("Hello", 914400, 914400, 4572000, 914400).font_size(32.0);
/// slide.add_shape(PresetGeometry::Ellipse, 914400, 2743200, 914400, 914400);
///
/// let bytes = pres.to_bytes()?;
/// assert_eq!(&bytes[0..2], b"PK");
/// # Ok::<(), slidecraft::ooxml::OoxmlError>(())
/// ```
#[derive(Debug)]
pub struct MutablePresentation {
    /// Slides in the presentation
    pub(crate) slides: Vec<MutableSlide>,
    /// Slide width in EMUs (English Metric Units, 914400 EMU = 1 inch)
    slide_width: i64,
    /// Slide height in EMUs
    slide_height: i64,
    properties: DocumentProperties,
    theme_name: String,
    theme_colors: ThemeColors,
    /// Ship a workbook with every chart so it stays editable
    embed_chart_workbooks: bool,
    compression: Compression,
}

impl MutablePresentation {
    /// Create a new empty presentation with default dimensions.
    ///
    /// Default size is 10" x 5.625" (16:9).
    pub fn new() -> Self {
        Self {
            slides: Vec::new(),
            slide_width: 9_144_000,
            slide_height: 5_143_500,
            properties: DocumentProperties::default(),
            theme_name: "Office Theme".to_string(),
            theme_colors: ThemeColors::default(),
            embed_chart_workbooks: true,
            compression: Compression::default(),
        }
    }

    /// Add a new slide to the presentation.
    pub fn add_slide(&mut self) -> &mut MutableSlide {
        let index = self.slides.len();
        let slide_id = (index + 256) as u32;
        self.slides.push(MutableSlide::new(slide_id));
        &mut self.slides[index]
    }

    /// Get the number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slides(&self) -> &[MutableSlide] {
        &self.slides
    }

    /// Get the slide width in EMUs.
    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    /// Set the slide width in EMUs.
    pub fn set_slide_width(&mut self, width: i64) {
        self.slide_width = width;
    }

    /// Get the slide height in EMUs.
    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    /// Set the slide height in EMUs.
    pub fn set_slide_height(&mut self, height: i64) {
        self.slide_height = height;
    }

    pub fn properties(&self) -> &DocumentProperties {
        &self.properties
    }

    /// Set the values written to `docProps/core.xml`.
    pub fn set_properties(&mut self, properties: DocumentProperties) {
        self.properties = properties;
    }

    /// Set the theme name and its base colors.
    pub fn set_theme(&mut self, name: &str, colors: ThemeColors) {
        self.theme_name = name.to_string();
        self.theme_colors = colors;
    }

    /// Whether charts carry an embedded workbook with their data.
    pub fn set_embed_chart_workbooks(&mut self, embed: bool) {
        self.embed_chart_workbooks = embed;
    }

    pub fn set_compression(&mut self, compression: Compression) {
        self.compression = compression;
    }

    /// Build the OPC package for this presentation.
    pub fn to_package(&self) -> Result<OpcPackage> {
        let presentation_uri = pack_uri(PRESENTATION_URI)?;
        let master_uri = pack_uri(SLIDE_MASTER_URI)?;
        let layout_uri = pack_uri(SLIDE_LAYOUT_URI)?;
        let theme_uri = pack_uri(THEME_URI)?;

        // Master and layout point at each other; the master also owns the theme
        let mut master = BlobPart::from_xml(
            master_uri.clone(),
            ct::PML_SLIDE_MASTER,
            template::slide_master_xml(&self.theme_colors)?,
        );
        master.relate_to(&layout_uri, rt::SLIDE_LAYOUT);
        master.relate_to(&theme_uri, rt::THEME);

        let mut layout = BlobPart::from_xml(
            layout_uri.clone(),
            ct::PML_SLIDE_LAYOUT,
            template::blank_layout_xml()?,
        );
        layout.relate_to(&master_uri, rt::SLIDE_MASTER);

        let theme = BlobPart::from_xml(
            theme_uri.clone(),
            ct::OFC_THEME,
            template::theme_xml(&self.theme_name, &self.theme_colors)?,
        );

        let mut slide_parts = Vec::with_capacity(self.slides.len());
        let mut media_parts = Vec::new();
        let mut chart_parts = Vec::new();
        let mut rel_mapper = RelationshipMapper::new();
        let mut image_count = 0usize;
        let mut chart_count = 0usize;

        for (slide_index, slide) in self.slides.iter().enumerate() {
            let slide_uri = pack_uri(format!("/ppt/slides/slide{}.xml", slide_index + 1))?;
            let mut slide_part = BlobPart::new(slide_uri, ct::PML_SLIDE, Vec::new());
            slide_part.relate_to(&layout_uri, rt::SLIDE_LAYOUT);

            for (shape_index, shape) in slide.shapes.iter().enumerate() {
                if !shape.needs_relationship() {
                    continue;
                }
                let rel_id = match &shape.shape_type {
                    ShapeType::Picture {
                        source: PictureSource::Embedded { data, format },
                        ..
                    } => {
                        image_count += 1;
                        let media_uri = pack_uri(format!(
                            "/ppt/media/image{}.{}",
                            image_count,
                            format.extension()
                        ))?;
                        let rel_id = slide_part.relate_to(&media_uri, rt::IMAGE);
                        media_parts.push(BlobPart::new(media_uri, format.content_type(), data.clone()));
                        rel_id
                    },
                    ShapeType::Picture {
                        source: PictureSource::Linked { target },
                        ..
                    } => slide_part.relate_to_ext(target, rt::IMAGE),
                    ShapeType::Chart { chart } => {
                        chart_count += 1;
                        let chart_uri = pack_uri(format!("/ppt/charts/chart{}.xml", chart_count))?;
                        let rel_id = slide_part.relate_to(&chart_uri, rt::CHART);

                        let mut chart_part = BlobPart::new(chart_uri, ct::DML_CHART, Vec::new());
                        let workbook_rel_id = if self.embed_chart_workbooks {
                            let workbook_uri = pack_uri(format!(
                                "/ppt/embeddings/Microsoft_Excel_Worksheet{}.xlsx",
                                chart_count
                            ))?;
                            let workbook_rel_id = chart_part.relate_to(&workbook_uri, rt::PACKAGE);
                            chart_parts.push(BlobPart::new(
                                workbook_uri,
                                ct::SML_SHEET,
                                generate_chart_workbook(chart)?,
                            ));
                            Some(workbook_rel_id)
                        } else {
                            None
                        };
                        chart_part.set_blob(chart_to_bytes(chart, workbook_rel_id.as_deref())?);
                        chart_parts.push(chart_part);
                        rel_id
                    },
                    _ => continue,
                };
                rel_mapper.add_shape(slide_index, shape_index, rel_id);
            }

            slide_part.set_blob(slide.to_xml_with_rels(slide_index, &rel_mapper)?.into_bytes());
            slide_parts.push(slide_part);
        }

        // presentation.xml relationships: master first, then the slides
        let mut presentation = BlobPart::new(
            presentation_uri.clone(),
            ct::PML_PRESENTATION_MAIN,
            Vec::new(),
        );
        let master_rel_id = presentation.relate_to(&master_uri, rt::SLIDE_MASTER);
        let slide_rel_ids: Vec<String> = slide_parts
            .iter()
            .map(|part| presentation.relate_to(part.partname(), rt::SLIDE))
            .collect();

        let pres_props_uri = pack_uri(PRES_PROPS_URI)?;
        let view_props_uri = pack_uri(VIEW_PROPS_URI)?;
        let table_styles_uri = pack_uri(TABLE_STYLES_URI)?;
        presentation.relate_to(&pres_props_uri, rt::PRES_PROPS);
        presentation.relate_to(&view_props_uri, rt::VIEW_PROPS);
        presentation.relate_to(&theme_uri, rt::THEME);
        presentation.relate_to(&table_styles_uri, rt::TABLE_STYLES);
        presentation.set_blob(
            self.presentation_xml(&master_rel_id, &slide_rel_ids)?
                .into_bytes(),
        );

        let core_uri = pack_uri(CORE_PROPS_URI)?;
        let app_uri = pack_uri(APP_PROPS_URI)?;

        let mut package = OpcPackage::new();
        package.relate_to(&presentation_uri, rt::OFFICE_DOCUMENT);
        package.relate_to(&core_uri, rt::CORE_PROPERTIES);
        package.relate_to(&app_uri, rt::EXTENDED_PROPERTIES);

        package.add_blob_part(presentation)?;
        package.add_blob_part(master)?;
        package.add_blob_part(layout)?;
        package.add_blob_part(theme)?;
        for part in slide_parts.into_iter().chain(media_parts).chain(chart_parts) {
            package.add_blob_part(part)?;
        }
        package.add_blob_part(BlobPart::from_xml(
            pres_props_uri,
            ct::PML_PRES_PROPS,
            template::pres_props_xml()?,
        ))?;
        package.add_blob_part(BlobPart::from_xml(
            view_props_uri,
            ct::PML_VIEW_PROPS,
            template::view_props_xml()?,
        ))?;
        package.add_blob_part(BlobPart::from_xml(
            table_styles_uri,
            ct::PML_TABLE_STYLES,
            template::table_styles_xml()?,
        ))?;
        package.add_blob_part(BlobPart::from_xml(
            core_uri,
            ct::OPC_CORE_PROPERTIES,
            template::core_props_xml(&self.properties)?,
        ))?;
        package.add_blob_part(BlobPart::from_xml(
            app_uri,
            ct::OFC_EXTENDED_PROPERTIES,
            template::app_props_xml(self.slides.len())?,
        ))?;

        Ok(package)
    }

    /// Serialize the presentation to .pptx bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let package = self.to_package()?;
        Ok(PackageWriter::to_bytes(&package, self.compression)?)
    }

    /// Write the presentation to a stream.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let package = self.to_package()?;
        PackageWriter::write_to_stream(writer, &package, self.compression)?;
        Ok(())
    }

    /// Save the presentation to a file.
    ///
    /// The file appears only once it is complete; on failure any existing
    /// file at `path` is left as it was.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let package = self.to_package()?;
        PackageWriter::write(path, &package, self.compression)?;
        Ok(())
    }

    /// Generate presentation.xml content with actual relationship IDs.
    fn presentation_xml(&self, master_rel_id: &str, slide_rel_ids: &[String]) -> Result<String> {
        let mut xml = String::with_capacity(1024 + slide_rel_ids.len() * 48);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN
        )?;

        write!(
            xml,
            r#"<p:sldMasterIdLst><p:sldMasterId id="{}" r:id="{}"/></p:sldMasterIdLst>"#,
            SLIDE_MASTER_ID, master_rel_id
        )?;

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(xml, r#"<p:sldId id="{}" r:id="{}"/>"#, slide.slide_id(), rel_id)?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            self.slide_width, self.slide_height
        )?;
        write!(xml, r#"<p:notesSz cx="{}" cy="{}"/>"#, NOTES_WIDTH, NOTES_HEIGHT)?;
        xml.push_str("<p:defaultTextStyle/>");
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

impl Default for MutablePresentation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::RGBColor;
    use crate::ooxml::charts::{Chart, ChartSeries, ChartType};
    use crate::ooxml::pptx::writer::shape::PresetGeometry;
    use std::io::{Cursor, Read};

    const PNG_1X1: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89,
    ];

    fn read_member(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    fn member_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    fn sample() -> MutablePresentation {
        let mut pres = MutablePresentation::new();
        let slide = pres.add_slide();
        slide.add_text_box("Title", 0, 0, 1000, 1000);
        slide
            .add_picture_from_bytes(PNG_1X1.to_vec(), 0, 0, 100, 100, None)
            .unwrap();
        let slide = pres.add_slide();
        slide.add_shape(PresetGeometry::Rect, 0, 0, 10, 10).fill(RGBColor::WHITE);
        slide.add_chart(
            Chart::new(ChartType::Bar, vec!["Q1".into(), "Q2".into()])
                .with_series(ChartSeries::new("Sales", vec![1.0, 2.0])),
            0,
            0,
            1000,
            1000,
        );
        pres
    }

    #[test]
    fn test_add_slide_ids() {
        let mut pres = MutablePresentation::new();
        assert_eq!(pres.add_slide().slide_id(), 256);
        assert_eq!(pres.add_slide().slide_id(), 257);
        assert_eq!(pres.slide_count(), 2);
    }

    #[test]
    fn test_package_members() {
        let bytes = sample().to_bytes().unwrap();
        let names = member_names(&bytes);

        assert_eq!(names[0], "[Content_Types].xml");
        assert_eq!(names[1], "_rels/.rels");
        for expected in [
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/_rels/slide1.xml.rels",
            "ppt/media/image1.png",
            "ppt/charts/chart1.xml",
            "ppt/charts/_rels/chart1.xml.rels",
            "ppt/embeddings/Microsoft_Excel_Worksheet1.xlsx",
            "docProps/core.xml",
            "docProps/app.xml",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_presentation_xml() {
        let bytes = sample().to_bytes().unwrap();
        let xml = read_member(&bytes, "ppt/presentation.xml");
        assert!(xml.contains(r#"<p:sldMasterId id="2147483648" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(xml.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="5143500"/>"#));
        assert!(xml.contains(r#"<p:notesSz cx="6858000" cy="9144000"/>"#));
    }

    #[test]
    fn test_slide_relationships() {
        let bytes = sample().to_bytes().unwrap();
        let rels = read_member(&bytes, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels.contains(r#"Target="../slideLayouts/slideLayout1.xml""#));
        assert!(rels.contains(r#"Target="../media/image1.png""#));

        let slide = read_member(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains(r#"r:embed="rId2""#));

        let chart_rels = read_member(&bytes, "ppt/charts/_rels/chart1.xml.rels");
        assert!(chart_rels.contains("../embeddings/Microsoft_Excel_Worksheet1.xlsx"));
    }

    #[test]
    fn test_chart_without_workbook() {
        let mut pres = sample();
        pres.set_embed_chart_workbooks(false);
        let bytes = pres.to_bytes().unwrap();
        let names = member_names(&bytes);
        assert!(!names.iter().any(|n| n.starts_with("ppt/embeddings/")));
        let chart = read_member(&bytes, "ppt/charts/chart1.xml");
        assert!(!chart.contains("externalData"));
        assert!(chart.contains("<c:numLit>"));
    }

    #[test]
    fn test_output_is_deterministic() {
        assert_eq!(sample().to_bytes().unwrap(), sample().to_bytes().unwrap());
    }

    #[test]
    fn test_empty_presentation_is_valid_package() {
        let bytes = MutablePresentation::new().to_bytes().unwrap();
        let xml = read_member(&bytes, "ppt/presentation.xml");
        assert!(!xml.contains("sldIdLst"));
        let app = read_member(&bytes, "docProps/app.xml");
        assert!(app.contains("<Slides>0</Slides>"));
    }

    #[test]
    fn test_save_matches_to_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        let pres = sample();
        pres.save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), pres.to_bytes().unwrap());
    }

    #[test]
    fn test_write_to_matches_to_bytes() {
        let pres = sample();
        let mut streamed = Vec::new();
        pres.write_to(&mut streamed).unwrap();
        assert_eq!(streamed, pres.to_bytes().unwrap());
    }
}
