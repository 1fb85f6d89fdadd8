//! Slide elements: positioned text, images, shapes, charts and tables.
//!
//! Every element kind carries its own style struct, so the exporter can match
//! exhaustively and each kind only exposes the styling it understands.

use super::chart::{ChartData, ChartKind};
use super::error::{DocumentError, Result};
use super::types::{ElementId, Position};
use serde::{Deserialize, Serialize};

/// A positioned visual element on a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    pub position: Position,
    /// Clockwise rotation in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Stacking order; elements without one stack in list order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

/// The closed set of element kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Text(TextElement),
    Image(ImageElement),
    Shape(ShapeElement),
    Chart(ChartElement),
    Table(TableElement),
}

impl ElementKind {
    /// Kind name as used in the editor ("text", "image", ...).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::Shape(_) => "shape",
            Self::Chart(_) => "chart",
            Self::Table(_) => "table",
        }
    }

    /// Whether both values are the same variant.
    pub fn same_kind(&self, other: &ElementKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Styling for text elements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Font size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default)]
    pub italic: bool,
    /// Text color, `#RRGGBB`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// 0.0 (transparent) to 1.0 (opaque)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.font_weight = Some(if bold {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        });
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[inline]
    pub fn is_bold(&self) -> bool {
        self.font_weight == Some(FontWeight::Bold)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    pub content: String,
    #[serde(default)]
    pub style: TextStyle,
}

impl TextElement {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: TextStyle::default(),
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    /// Opaque source reference: a URL, a file path or a `data:` URI.
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl ImageElement {
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: None,
            opacity: None,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = Some(alt.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rect,
    Circle,
    Triangle,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeElement {
    #[serde(rename = "shapeType")]
    pub shape: ShapeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Outline width in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl ShapeElement {
    pub fn new(shape: ShapeKind) -> Self {
        Self {
            shape,
            fill: None,
            stroke: None,
            stroke_width: None,
            opacity: None,
        }
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<String>, width: f64) -> Self {
        self.stroke = Some(stroke.into());
        self.stroke_width = Some(width);
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartElement {
    pub chart_type: ChartKind,
    pub data: ChartData,
}

impl ChartElement {
    pub fn new(chart_type: ChartKind, data: ChartData) -> Self {
        Self { chart_type, data }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableElement {
    pub rows: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<String>>,
}

impl TableElement {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self {
            rows,
            headers: None,
        }
    }

    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Header row (if any) followed by the body rows.
    pub fn all_rows(&self) -> impl Iterator<Item = &Vec<String>> {
        self.headers.iter().chain(self.rows.iter())
    }

    /// Widest row length across headers and body.
    pub fn column_count(&self) -> usize {
        self.all_rows().map(Vec::len).max().unwrap_or(0)
    }
}

impl From<TextElement> for ElementKind {
    fn from(e: TextElement) -> Self {
        Self::Text(e)
    }
}

impl From<ImageElement> for ElementKind {
    fn from(e: ImageElement) -> Self {
        Self::Image(e)
    }
}

impl From<ShapeElement> for ElementKind {
    fn from(e: ShapeElement) -> Self {
        Self::Shape(e)
    }
}

impl From<ChartElement> for ElementKind {
    fn from(e: ChartElement) -> Self {
        Self::Chart(e)
    }
}

impl From<TableElement> for ElementKind {
    fn from(e: TableElement) -> Self {
        Self::Table(e)
    }
}

impl Element {
    /// Create an element with a fresh id.
    pub fn new(position: Position, kind: impl Into<ElementKind>) -> Self {
        Self {
            id: ElementId::generate(),
            position,
            rotation: None,
            z_index: None,
            kind: kind.into(),
        }
    }

    /// Unstyled text element.
    pub fn text(position: Position, content: impl Into<String>) -> Self {
        Self::new(position, TextElement::new(content))
    }

    pub fn image(position: Position, src: impl Into<String>) -> Self {
        Self::new(position, ImageElement::new(src))
    }

    pub fn shape(position: Position, shape: ShapeKind) -> Self {
        Self::new(position, ShapeElement::new(shape))
    }

    pub fn chart(position: Position, chart_type: ChartKind, data: ChartData) -> Self {
        Self::new(position, ChartElement::new(chart_type, data))
    }

    pub fn table(position: Position, rows: Vec<Vec<String>>) -> Self {
        Self::new(position, TableElement::new(rows))
    }

    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Check kind-specific invariants.
    pub fn validate(&self) -> Result<()> {
        match &self.kind {
            ElementKind::Chart(chart) => chart.data.validate(),
            ElementKind::Text(_)
            | ElementKind::Image(_)
            | ElementKind::Shape(_)
            | ElementKind::Table(_) => Ok(()),
        }
    }

    /// Merge a patch into this element.
    ///
    /// The element is left untouched when the patch is rejected.
    pub fn apply_patch(&mut self, patch: &ElementPatch) -> Result<()> {
        if let Some(kind) = &patch.kind {
            if !self.kind.same_kind(kind) {
                return Err(DocumentError::ElementKindMismatch {
                    from: self.kind.name(),
                    to: kind.name(),
                });
            }
            if let ElementKind::Chart(chart) = kind {
                chart.data.validate()?;
            }
        }

        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = Some(rotation);
        }
        if let Some(z_index) = patch.z_index {
            self.z_index = Some(z_index);
        }
        if let Some(kind) = &patch.kind {
            self.kind = kind.clone();
        }
        Ok(())
    }
}

/// Partial update for an element. Unset fields keep their current value.
///
/// `kind` replaces the whole payload (content and style) and must keep the
/// element's kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ElementKind>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn with_kind(mut self, kind: impl Into<ElementKind>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.rotation.is_none()
            && self.z_index.is_none()
            && self.kind.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::chart::Dataset;

    fn pos() -> Position {
        Position::new(10.0, 10.0, 100.0, 50.0)
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut el = Element::text(pos(), "hello").with_rotation(15.0);
        let patch = ElementPatch::new().with_position(Position::new(0.0, 0.0, 1.0, 1.0));
        el.apply_patch(&patch).unwrap();

        assert_eq!(el.position, Position::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(el.rotation, Some(15.0));
        assert!(matches!(el.kind, ElementKind::Text(ref t) if t.content == "hello"));
    }

    #[test]
    fn test_patch_rejects_kind_change() {
        let mut el = Element::text(pos(), "hello");
        let before = el.clone();
        let patch = ElementPatch::new()
            .with_position(Position::new(1.0, 1.0, 1.0, 1.0))
            .with_kind(ShapeElement::new(ShapeKind::Rect));

        assert_eq!(
            el.apply_patch(&patch),
            Err(DocumentError::ElementKindMismatch {
                from: "text",
                to: "shape"
            })
        );
        assert_eq!(el, before);
    }

    #[test]
    fn test_patch_validates_chart_payload() {
        let data = ChartData::new(vec!["a".into()]).with_dataset(Dataset::new("s", vec![1.0]));
        let mut el = Element::chart(pos(), ChartKind::Bar, data);

        let bad = ChartData::new(vec!["a".into(), "b".into()])
            .with_dataset(Dataset::new("s", vec![1.0]));
        let patch = ElementPatch::new().with_kind(ChartElement::new(ChartKind::Line, bad));
        assert!(matches!(
            el.apply_patch(&patch),
            Err(DocumentError::ChartDataMismatch { .. })
        ));
        assert!(matches!(el.kind, ElementKind::Chart(ref c) if c.chart_type == ChartKind::Bar));
    }

    #[test]
    fn test_table_column_count_includes_headers() {
        let table = TableElement::new(vec![vec!["1".into()], vec!["2".into(), "3".into()]])
            .with_headers(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.all_rows().count(), 3);
    }

    #[test]
    fn test_element_json_shape() {
        let el = Element::text(pos(), "Hi")
            .with_id("t1")
            .with_z_index(2);
        let json = serde_json::to_value(&el).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["id"], "t1");
        assert_eq!(json["zIndex"], 2);
        assert_eq!(json["content"], "Hi");

        let back: Element = serde_json::from_value(json).unwrap();
        assert_eq!(back, el);
    }

    #[test]
    fn test_deserialize_shape_element() {
        let json = r##"{
            "id": "s1",
            "type": "shape",
            "position": {"x": 0, "y": 0, "width": 10, "height": 10},
            "shapeType": "circle",
            "fill": "#FF0000"
        }"##;
        let el: Element = serde_json::from_str(json).unwrap();
        match el.kind {
            ElementKind::Shape(shape) => {
                assert_eq!(shape.shape, ShapeKind::Circle);
                assert_eq!(shape.fill.as_deref(), Some("#FF0000"));
            },
            other => panic!("unexpected kind {}", other.name()),
        }
    }
}
