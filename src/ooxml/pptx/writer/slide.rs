/// Slide types and implementation for PPTX presentations.
use crate::ooxml::charts::Chart;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::pptx::backgrounds::SlideBackground;
use crate::ooxml::pptx::template::SHAPE_TREE_ROOT;
use crate::ooxml::pptx::transitions::SlideTransition;
use std::fmt::Write as FmtWrite;

// Import shared format types
use super::super::format::{ImageFormat, TextFormat};
use super::relmap::RelationshipMapper;
use super::shape::{MutableShape, PictureSource, PresetGeometry, ShapeType, TableStyle};

/// A mutable slide in a presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct MutableSlide {
    /// Slide ID (unique identifier, 256 and up)
    pub(crate) slide_id: u32,
    /// Shapes in back-to-front order
    pub(crate) shapes: Vec<MutableShape>,
    pub(crate) background: Option<SlideBackground>,
    pub(crate) transition: Option<SlideTransition>,
}

impl MutableSlide {
    /// Create a new empty slide.
    pub(crate) fn new(slide_id: u32) -> Self {
        Self {
            slide_id,
            shapes: Vec::new(),
            background: None,
            transition: None,
        }
    }

    /// Get the slide ID.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Set a background for the slide.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slidecraft::common::RGBColor;
    /// use slidecraft::ooxml::pptx::{MutablePresentation, SlideBackground};
    ///
    /// let mut pres = MutablePresentation::new();
    /// let slide = pres.add_slide();
    /// slide.set_background(SlideBackground::solid(RGBColor::new(0x1E, 0x29, 0x3B)));
    /// ```
    pub fn set_background(&mut self, background: SlideBackground) {
        self.background = Some(background);
    }

    pub fn background(&self) -> Option<&SlideBackground> {
        self.background.as_ref()
    }

    /// Set a transition effect for the slide.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slidecraft::ooxml::pptx::{MutablePresentation, SlideTransition, TransitionSpeed, TransitionType};
    ///
    /// let mut pres = MutablePresentation::new();
    /// let slide = pres.add_slide();
    /// slide.set_transition(SlideTransition::new(TransitionType::Fade).with_speed(TransitionSpeed::Fast));
    /// ```
    pub fn set_transition(&mut self, transition: SlideTransition) {
        self.transition = Some(transition);
    }

    pub fn transition(&self) -> Option<&SlideTransition> {
        self.transition.as_ref()
    }

    /// Number of shapes on the slide.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn shapes(&self) -> &[MutableShape] {
        &self.shapes
    }

    fn push_shape(&mut self, x: i64, y: i64, width: i64, height: i64, shape_type: ShapeType) -> &mut MutableShape {
        // id 1 is the shape tree itself
        let shape_id = (self.shapes.len() + 2) as u32;
        let index = self.shapes.len();
        self.shapes
            .push(MutableShape::new(shape_id, x, y, width, height, shape_type));
        &mut self.shapes[index]
    }

    /// Add a text box; lines of `text` become paragraphs.
    pub fn add_text_box(&mut self, text: &str, x: i64, y: i64, width: i64, height: i64) -> &mut MutableShape {
        self.push_shape(
            x,
            y,
            width,
            height,
            ShapeType::TextBox {
                text: text.to_string(),
                format: TextFormat::default(),
            },
        )
    }

    /// Add an auto shape with a preset geometry and no fill.
    pub fn add_shape(&mut self, geometry: PresetGeometry, x: i64, y: i64, width: i64, height: i64) -> &mut MutableShape {
        self.push_shape(
            x,
            y,
            width,
            height,
            ShapeType::AutoShape {
                geometry,
                fill: None,
                line: None,
                alpha: None,
            },
        )
    }

    /// Add a picture stored in the package.
    ///
    /// Fails with [`OoxmlError::InvalidFormat`] when the bytes are not a
    /// recognized image format.
    pub fn add_picture_from_bytes(
        &mut self,
        data: Vec<u8>,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        description: Option<String>,
    ) -> Result<&mut MutableShape> {
        let format = ImageFormat::detect_from_bytes(&data)
            .ok_or_else(|| OoxmlError::InvalidFormat("Unknown image format".to_string()))?;
        Ok(self.push_shape(
            x,
            y,
            width,
            height,
            ShapeType::Picture {
                source: PictureSource::Embedded { data, format },
                description: description.unwrap_or_else(|| "Picture".to_string()),
                alpha: None,
            },
        ))
    }

    /// Add a picture that links to an external target.
    pub fn add_linked_picture(
        &mut self,
        target: &str,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        description: Option<String>,
    ) -> &mut MutableShape {
        self.push_shape(
            x,
            y,
            width,
            height,
            ShapeType::Picture {
                source: PictureSource::Linked {
                    target: target.to_string(),
                },
                description: description.unwrap_or_else(|| "Picture".to_string()),
                alpha: None,
            },
        )
    }

    /// Add a table.
    ///
    /// # Arguments
    /// * `data` - cell text, rows x columns; short rows are padded
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slidecraft::ooxml::pptx::MutablePresentation;
    ///
    /// let mut pres = MutablePresentation::new();
    /// let slide = pres.add_slide();
    ///
    /// let data = vec![
    ///     vec!["Header 1".to_string(), "Header 2".to_string()],
    ///     vec!["Cell A".to_string(), "Cell B".to_string()],
    /// ];
    /// slide.add_table(data, 914400, 914400, 5486400, 1828800);
    /// assert_eq!(slide.shape_count(), 1);
    /// ```
    pub fn add_table(&mut self, data: Vec<Vec<String>>, x: i64, y: i64, width: i64, height: i64) -> &mut MutableShape {
        self.push_shape(
            x,
            y,
            width,
            height,
            ShapeType::Table {
                rows: data,
                style: TableStyle::default(),
            },
        )
    }

    /// Add a chart; it becomes its own chart part when the package is built.
    pub fn add_chart(&mut self, chart: Chart, x: i64, y: i64, width: i64, height: i64) -> &mut MutableShape {
        self.push_shape(
            x,
            y,
            width,
            height,
            ShapeType::Chart {
                chart: Box::new(chart),
            },
        )
    }

    /// Generate slide XML content with relationship IDs from the mapper.
    pub(crate) fn to_xml_with_rels(&self, slide_index: usize, rel_mapper: &RelationshipMapper) -> Result<String> {
        let mut xml = String::with_capacity(4096 + self.shapes.len() * 1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
            namespace::DML_MAIN,
            namespace::OFC_RELATIONSHIPS,
            namespace::PML_MAIN
        )?;

        xml.push_str("<p:cSld>");

        // Background must come before spTree
        if let Some(background) = &self.background {
            background.write_xml(&mut xml)?;
        }

        xml.push_str("<p:spTree>");
        xml.push_str(SHAPE_TREE_ROOT);
        for (shape_index, shape) in self.shapes.iter().enumerate() {
            let rel_id = rel_mapper.get_shape_id(slide_index, shape_index);
            shape.to_xml(&mut xml, rel_id)?;
        }
        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");

        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");

        if let Some(transition) = &self.transition {
            transition.write_xml(&mut xml)?;
        }

        xml.push_str("</p:sld>");
        Ok(xml)
    }
}
