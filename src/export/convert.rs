/// Conversion of the document model into the PPTX writer model.
///
/// Everything the document allows but PowerPoint cannot show is substituted
/// here (with a warning) so that building the package itself cannot fail on
/// document content.
use super::config::ExportOptions;
use super::error::Result;
use super::resolver::ImageResolver;
use super::task::CancellationToken;
use crate::common::style::{DEFAULT_BACKGROUND, LinearGradient, first_hex_token, resolve_background};
use crate::common::unit::{degrees_to_rot, pt_to_emu_f64, units_to_emu};
use crate::common::RGBColor;
use crate::document::{
    ChartData, ChartElement, ChartKind, DatasetColors, Element, ElementKind, ImageElement,
    Presentation, ShapeElement, ShapeKind, Slide, TableElement, TextAlign, TextElement,
    Transition, TransitionDirection, TransitionKind,
};
use crate::ooxml::charts::{Chart, ChartSeries, ChartType, palette_color};
use crate::ooxml::pptx::{
    DocumentProperties, ImageFormat, MutablePresentation, MutableShape, MutableSlide,
    PresetGeometry, SlideBackground, SlideTransition, TableStyle, TextAlignment, ThemeColors,
    TransitionSpeed, TransitionType,
};
use crate::ooxml::pptx::TransitionDirection as PptxDirection;
use tracing::{debug, warn};

/// Fill of shapes that do not set one.
pub(crate) const DEFAULT_SHAPE_FILL: RGBColor = RGBColor::new(0x38, 0xBD, 0xF8);
/// Outline width of shapes that set a stroke color but no width, in points.
const DEFAULT_STROKE_WIDTH_PT: f64 = 1.0;
const DEFAULT_FONT_SIZE_PT: f64 = 18.0;

/// Parse a color attribute, falling back to `default` when it is absent or
/// malformed. Only the malformed case is logged.
fn color_or(value: Option<&str>, default: RGBColor, what: &str) -> RGBColor {
    match value {
        None => default,
        Some(raw) => parse_color(raw).unwrap_or_else(|| {
            warn!(value = raw, what, "malformed color, using {}", default);
            default
        }),
    }
}

fn parse_color(raw: &str) -> Option<RGBColor> {
    RGBColor::from_hex(raw).or_else(|| first_hex_token(raw))
}

/// Converts one presentation; holds what every slide needs.
pub(crate) struct Converter<'a> {
    options: &'a ExportOptions,
    resolver: &'a dyn ImageResolver,
    cancel: Option<&'a CancellationToken>,
    text_color: RGBColor,
}

impl<'a> Converter<'a> {
    pub fn new(
        options: &'a ExportOptions,
        resolver: &'a dyn ImageResolver,
        cancel: Option<&'a CancellationToken>,
    ) -> Self {
        Self {
            options,
            resolver,
            cancel,
            text_color: RGBColor::WHITE,
        }
    }

    /// Build the writer model for a presentation.
    ///
    /// Fails only when cancelled or when the writer rejects its own input.
    pub fn convert(mut self, presentation: &Presentation) -> Result<MutablePresentation> {
        let mut pres = MutablePresentation::new();
        pres.set_slide_width(units_to_emu(self.options.slide_width_units));
        pres.set_slide_height(units_to_emu(self.options.slide_height_units));
        pres.set_embed_chart_workbooks(self.options.embed_chart_data);
        pres.set_compression(self.options.compression);

        pres.set_properties(DocumentProperties {
            title: presentation.title.clone(),
            subject: presentation.subtitle.clone(),
            creator: presentation
                .author
                .clone()
                .unwrap_or_else(|| self.options.default_author.clone()),
            created: presentation.created_at,
            modified: presentation.updated_at,
        });

        let template = &presentation.template;
        let theme = ThemeColors {
            background: resolve_background(&template.background),
            text: color_or(Some(&template.text_color), RGBColor::WHITE, "template text"),
            accent: color_or(Some(&template.accent_color), DEFAULT_SHAPE_FILL, "template accent"),
        };
        self.text_color = theme.text;
        pres.set_theme(&template.name, theme);

        for (index, slide) in presentation.slides.iter().enumerate() {
            if let Some(token) = self.cancel {
                token.check()?;
            }
            debug!(slide = index, elements = slide.elements.len(), "converting slide");
            self.convert_slide(pres.add_slide(), slide)?;
        }

        Ok(pres)
    }

    fn convert_slide(&self, out: &mut MutableSlide, slide: &Slide) -> Result<()> {
        out.set_background(self.background(&slide.background));
        if let Some(transition) = convert_transition(&slide.transition) {
            out.set_transition(transition);
        }

        for element in stacking_order(&slide.elements) {
            self.convert_element(out, element)?;
        }
        Ok(())
    }

    fn background(&self, descriptor: &str) -> SlideBackground {
        if self.options.gradient_backgrounds && descriptor.contains("gradient") {
            if let Some(gradient) = LinearGradient::parse(descriptor) {
                return SlideBackground::from_gradient(&gradient);
            }
            debug!(descriptor, "gradient not parseable, using its first color");
        }

        let color = resolve_background(descriptor);
        if color == DEFAULT_BACKGROUND && first_hex_token(descriptor).is_none() {
            warn!(descriptor, "background has no color, using {}", DEFAULT_BACKGROUND);
        }
        SlideBackground::solid(color)
    }

    fn convert_element(&self, slide: &mut MutableSlide, element: &Element) -> Result<()> {
        let pos = &element.position;
        let (x, y) = (units_to_emu(pos.x), units_to_emu(pos.y));
        let (w, h) = (units_to_emu(pos.width), units_to_emu(pos.height));

        let shape = match &element.kind {
            ElementKind::Text(text) => self.text_box(slide, text, x, y, w, h),
            ElementKind::Image(image) => match self.picture(slide, image, x, y, w, h)? {
                Some(shape) => shape,
                None => return Ok(()),
            },
            ElementKind::Shape(shape) => auto_shape(slide, shape, x, y, w, h),
            ElementKind::Chart(chart) => {
                let chart = self.chart(chart, element);
                slide.add_chart(chart, x, y, w, h)
            },
            ElementKind::Table(table) => table_frame(slide, table, element, x, y, w, h),
        };

        if let Some(degrees) = element.rotation {
            shape.rotation(degrees_to_rot(degrees));
        }
        Ok(())
    }

    fn text_box<'s>(
        &self,
        slide: &'s mut MutableSlide,
        text: &TextElement,
        x: i64,
        y: i64,
        w: i64,
        h: i64,
    ) -> &'s mut MutableShape {
        let style = &text.style;
        let shape = slide.add_text_box(&text.content, x, y, w, h);
        shape
            .font_size(style.font_size.unwrap_or(DEFAULT_FONT_SIZE_PT))
            .bold(style.is_bold())
            .italic(style.italic)
            .color(color_or(style.color.as_deref(), RGBColor::WHITE, "text"))
            .align(match style.text_align.unwrap_or_default() {
                TextAlign::Left => TextAlignment::Left,
                TextAlign::Center => TextAlignment::Center,
                TextAlign::Right => TextAlignment::Right,
            });

        match style.background_color.as_deref() {
            None | Some("transparent") => {},
            Some(raw) => match parse_color(raw) {
                Some(color) => {
                    shape.fill(color);
                },
                None => warn!(value = raw, "malformed text background, leaving it unfilled"),
            },
        }
        if let Some(opacity) = style.opacity {
            shape.alpha(opacity);
        }
        shape
    }

    /// Picture for an image element; `None` when there is nothing to show.
    fn picture<'s>(
        &self,
        slide: &'s mut MutableSlide,
        image: &ImageElement,
        x: i64,
        y: i64,
        w: i64,
        h: i64,
    ) -> Result<Option<&'s mut MutableShape>> {
        if image.src.trim().is_empty() {
            warn!("image without source skipped");
            return Ok(None);
        }

        let data = if self.options.embed_images {
            self.resolver
                .resolve(&image.src)
                .filter(|bytes| ImageFormat::detect_from_bytes(bytes).is_some())
        } else {
            None
        };

        let shape = match data {
            Some(bytes) => slide.add_picture_from_bytes(bytes, x, y, w, h, image.alt.clone())?,
            // An unresolvable inline image has no useful external target
            None if image.src.starts_with("data:") => {
                warn!("inline image could not be decoded, skipped");
                return Ok(None);
            },
            None => {
                if self.options.embed_images {
                    warn!(src = %image.src, "image not embeddable, linking to source");
                }
                slide.add_linked_picture(&image.src, x, y, w, h, image.alt.clone())
            },
        };

        if let Some(opacity) = image.opacity {
            shape.alpha(opacity);
        }
        Ok(Some(shape))
    }

    fn chart(&self, element: &ChartElement, owner: &Element) -> Chart {
        let chart_type = match element.chart_type {
            ChartKind::Bar => ChartType::Bar,
            ChartKind::Line => ChartType::Line,
            ChartKind::Pie => ChartType::Pie,
            ChartKind::Scatter => {
                warn!(element = %owner.id, "scatter charts are exported as bar charts");
                ChartType::Bar
            },
        };
        build_chart(chart_type, &element.data).with_text_color(self.text_color)
    }
}

/// Elements ordered back to front: stable sort on `z_index`, elements without
/// one keyed by their list position.
pub(crate) fn stacking_order(elements: &[Element]) -> Vec<&Element> {
    let mut ordered: Vec<(i64, &Element)> = elements
        .iter()
        .enumerate()
        .map(|(i, e)| (e.z_index.map_or(i as i64, i64::from), e))
        .collect();
    ordered.sort_by_key(|(key, _)| *key);
    ordered.into_iter().map(|(_, e)| e).collect()
}

pub(crate) fn convert_transition(transition: &Transition) -> Option<SlideTransition> {
    let transition_type = match transition.kind {
        TransitionKind::None => return None,
        TransitionKind::Fade => TransitionType::Fade,
        TransitionKind::Slide => TransitionType::Push {
            direction: match transition.direction.unwrap_or(TransitionDirection::Left) {
                TransitionDirection::Left => PptxDirection::Left,
                TransitionDirection::Right => PptxDirection::Right,
                TransitionDirection::Up => PptxDirection::Up,
                TransitionDirection::Down => PptxDirection::Down,
            },
        },
        TransitionKind::Zoom => TransitionType::Zoom,
        TransitionKind::Flip => {
            debug!("flip transition exported as fade");
            TransitionType::Fade
        },
    };
    Some(
        SlideTransition::new(transition_type)
            .with_speed(TransitionSpeed::from_duration_ms(transition.duration_ms)),
    )
}

fn auto_shape<'s>(
    slide: &'s mut MutableSlide,
    element: &ShapeElement,
    x: i64,
    y: i64,
    w: i64,
    h: i64,
) -> &'s mut MutableShape {
    let geometry = match element.shape {
        ShapeKind::Rect => PresetGeometry::Rect,
        ShapeKind::Circle => PresetGeometry::Ellipse,
        ShapeKind::Triangle => PresetGeometry::Triangle,
        ShapeKind::Line => PresetGeometry::Line,
    };
    let fill = color_or(element.fill.as_deref(), DEFAULT_SHAPE_FILL, "shape fill");
    let stroke_width = pt_to_emu_f64(element.stroke_width.unwrap_or(DEFAULT_STROKE_WIDTH_PT));

    let shape = slide.add_shape(geometry, x, y, w, h);
    if geometry == PresetGeometry::Line {
        // a line is all outline
        let color = match element.stroke.as_deref() {
            Some(stroke) => color_or(Some(stroke), fill, "line stroke"),
            None => fill,
        };
        shape.line(color, stroke_width);
    } else {
        shape.fill(fill);
        if let Some(stroke) = element.stroke.as_deref() {
            shape.line(color_or(Some(stroke), fill, "shape stroke"), stroke_width);
        }
    }
    if let Some(opacity) = element.opacity {
        shape.alpha(opacity);
    }
    shape
}

fn table_frame<'s>(
    slide: &'s mut MutableSlide,
    table: &TableElement,
    owner: &Element,
    x: i64,
    y: i64,
    w: i64,
    h: i64,
) -> &'s mut MutableShape {
    let rows: Vec<Vec<String>> = table.all_rows().cloned().collect();
    if rows.iter().all(Vec::is_empty) {
        warn!(element = %owner.id, "empty table exported as a single empty cell");
    }
    let shape = slide.add_table(rows, x, y, w, h);
    shape.table_style(TableStyle {
        first_row_header: table.headers.is_some(),
        ..TableStyle::default()
    });
    shape
}

/// Chart model for chart data; colors that do not parse fall back to the palette.
pub(crate) fn build_chart(chart_type: ChartType, data: &ChartData) -> Chart {
    let mut chart = Chart::new(chart_type, data.labels.clone());
    for (index, dataset) in data.datasets.iter().enumerate() {
        let mut series = ChartSeries::new(dataset.label.clone(), dataset.values.clone());
        match &dataset.colors {
            None => {},
            Some(DatasetColors::Single(raw)) => match parse_color(raw) {
                Some(color) => series = series.with_color(color),
                None => warn!(value = %raw, series = index, "malformed series color, using palette"),
            },
            Some(DatasetColors::PerCategory(raw)) => {
                let colors = raw
                    .iter()
                    .enumerate()
                    .map(|(i, c)| {
                        parse_color(c).unwrap_or_else(|| {
                            warn!(value = %c, category = i, "malformed point color, using palette");
                            palette_color(i)
                        })
                    })
                    .collect();
                series = series.with_point_colors(colors);
            },
        }
        chart = chart.with_series(series);
    }
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Dataset, Position, SlideKind, TextStyle};
    use crate::export::resolver::{DefaultImageResolver, LinkOnlyResolver};
    use crate::ooxml::pptx::writer::shape::ShapeType;

    fn convert(presentation: &Presentation, options: &ExportOptions) -> MutablePresentation {
        Converter::new(options, &DefaultImageResolver, None)
            .convert(presentation)
            .unwrap()
    }

    fn single_slide(elements: Vec<Element>) -> Presentation {
        let mut slide = Slide::new(SlideKind::Content, "#0F172A");
        slide.elements = elements;
        Presentation::with_slides("Test", vec![slide])
    }

    #[test]
    fn test_position_units_to_emu() {
        let pres = single_slide(vec![Element::text(Position::new(96.0, 192.0, 480.0, 96.0), "x")]);
        let out = convert(&pres, &ExportOptions::default());
        let shape = &out.slides()[0].shapes()[0];
        assert_eq!(
            (shape.x, shape.y, shape.width, shape.height),
            (914_400, 1_828_800, 4_572_000, 914_400)
        );
        assert_eq!(out.slide_width(), 9_144_000);
        assert_eq!(out.slide_height(), 5_143_500);
    }

    #[test]
    fn test_text_defaults() {
        let pres = single_slide(vec![Element::text(Position::new(0.0, 0.0, 10.0, 10.0), "x")]);
        let out = convert(&pres, &ExportOptions::default());
        match &out.slides()[0].shapes()[0].shape_type {
            ShapeType::TextBox { format, .. } => {
                assert_eq!(format.size, 18.0);
                assert_eq!(format.color, RGBColor::WHITE);
                assert_eq!(format.alignment, TextAlignment::Left);
                assert!(!format.bold);
                assert!(format.fill.is_none());
            },
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_malformed_text_color_falls_back() {
        let element = Element::new(
            Position::new(0.0, 0.0, 10.0, 10.0),
            TextElement::new("x").with_style(TextStyle::new().with_color("not-a-color").with_bold(true)),
        );
        let out = convert(&single_slide(vec![element]), &ExportOptions::default());
        match &out.slides()[0].shapes()[0].shape_type {
            ShapeType::TextBox { format, .. } => {
                assert_eq!(format.color, RGBColor::WHITE);
                assert!(format.bold);
            },
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_scatter_becomes_bar() {
        let data = ChartData::new(vec!["a".into(), "b".into()])
            .with_dataset(Dataset::new("s", vec![1.0, 2.0]));
        let element = Element::chart(Position::new(0.0, 0.0, 100.0, 100.0), ChartKind::Scatter, data);
        let out = convert(&single_slide(vec![element]), &ExportOptions::default());
        match &out.slides()[0].shapes()[0].shape_type {
            ShapeType::Chart { chart } => assert_eq!(chart.chart_type, ChartType::Bar),
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_chart_colors() {
        let data = ChartData::new(vec!["a".into(), "b".into()])
            .with_dataset(Dataset::new("s", vec![1.0, 2.0]).with_colors(DatasetColors::Single("#ff0000".into())))
            .with_dataset(
                Dataset::new("t", vec![3.0, 4.0])
                    .with_colors(DatasetColors::PerCategory(vec!["#00ff00".into(), "bogus".into()])),
            );
        let chart = build_chart(ChartType::Bar, &data);
        assert_eq!(chart.series[0].color, Some(RGBColor::new(255, 0, 0)));
        assert_eq!(
            chart.series[1].point_colors,
            Some(vec![RGBColor::new(0, 255, 0), palette_color(1)])
        );
    }

    #[test]
    fn test_stacking_order_is_stable() {
        let at = |z: Option<i32>, label: &str| {
            let e = Element::text(Position::new(0.0, 0.0, 1.0, 1.0), label);
            match z {
                Some(z) => e.with_z_index(z),
                None => e,
            }
        };
        let elements = vec![at(Some(5), "top"), at(None, "first"), at(None, "second"), at(Some(1), "tie")];
        let labels: Vec<&str> = stacking_order(&elements)
            .into_iter()
            .map(|e| match &e.kind {
                ElementKind::Text(t) => t.content.as_str(),
                _ => unreachable!(),
            })
            .collect();
        // keys: top=5, first=1, second=2, tie=1
        assert_eq!(labels, vec!["first", "tie", "second", "top"]);
    }

    #[test]
    fn test_transitions() {
        assert!(convert_transition(&Transition::none()).is_none());

        let flip = convert_transition(&Transition::new(TransitionKind::Flip, 300)).unwrap();
        assert_eq!(flip.transition_type, TransitionType::Fade);
        assert_eq!(flip.speed, TransitionSpeed::Fast);

        let push = convert_transition(
            &Transition::new(TransitionKind::Slide, 800).with_direction(TransitionDirection::Up),
        )
        .unwrap();
        assert_eq!(
            push.transition_type,
            TransitionType::Push {
                direction: PptxDirection::Up
            }
        );
        assert_eq!(push.speed, TransitionSpeed::Medium);
    }

    #[test]
    fn test_gradient_background() {
        let descriptor = "linear-gradient(135deg, #1e293b 0%, #0f172a 100%)";
        let mut slide = Slide::new(SlideKind::Content, descriptor);
        slide.elements.clear();
        let pres = Presentation::with_slides("g", vec![slide]);

        let out = convert(&pres, &ExportOptions::default());
        assert_eq!(
            out.slides()[0].background(),
            Some(&SlideBackground::solid(RGBColor::new(0x1E, 0x29, 0x3B)))
        );

        let out = convert(&pres, &ExportOptions::new().with_gradient_backgrounds(true));
        assert!(matches!(
            out.slides()[0].background(),
            Some(SlideBackground::Gradient { .. })
        ));
    }

    #[test]
    fn test_unresolvable_images() {
        let elements = vec![
            Element::image(Position::new(0.0, 0.0, 10.0, 10.0), "https://example.com/a.png"),
            Element::image(Position::new(0.0, 0.0, 10.0, 10.0), "data:image/png;base64,@@"),
            Element::image(Position::new(0.0, 0.0, 10.0, 10.0), ""),
        ];
        let out = convert(&single_slide(elements), &ExportOptions::default());
        let shapes = out.slides()[0].shapes();
        assert_eq!(shapes.len(), 1);
        assert!(matches!(shapes[0].shape_type, ShapeType::Picture { .. }));
    }

    #[test]
    fn test_embedded_image() {
        let element = Element::image(
            Position::new(0.0, 0.0, 10.0, 10.0),
            "data:image/png;base64,iVBORw0KGgo=",
        );
        let pres = single_slide(vec![element]);

        let out = convert(&pres, &ExportOptions::default());
        let bytes = out.to_bytes().unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        assert!(archive.by_name("ppt/media/image1.png").is_ok());

        let linked = Converter::new(&ExportOptions::default(), &LinkOnlyResolver, None)
            .convert(&pres)
            .unwrap();
        // inline data that is not resolved cannot be linked either
        assert_eq!(linked.slides()[0].shape_count(), 0);
    }

    #[test]
    fn test_shape_defaults() {
        let elements = vec![
            Element::shape(Position::new(0.0, 0.0, 10.0, 10.0), ShapeKind::Circle),
            Element::new(
                Position::new(0.0, 0.0, 10.0, 10.0),
                ShapeElement::new(ShapeKind::Line).with_fill("#FF0000"),
            ),
        ];
        let out = convert(&single_slide(elements), &ExportOptions::default());
        let shapes = out.slides()[0].shapes();
        match &shapes[0].shape_type {
            ShapeType::AutoShape { geometry, fill, line, .. } => {
                assert_eq!(*geometry, PresetGeometry::Ellipse);
                assert_eq!(*fill, Some(DEFAULT_SHAPE_FILL));
                assert!(line.is_none());
            },
            other => panic!("unexpected shape {:?}", other),
        }
        match &shapes[1].shape_type {
            ShapeType::AutoShape { line: Some(line), fill, .. } => {
                assert_eq!(line.color, RGBColor::new(255, 0, 0));
                assert_eq!(line.width, 12_700);
                assert!(fill.is_none());
            },
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_shape_stroke_and_opacity() {
        let element = Element::new(
            Position::new(0.0, 0.0, 10.0, 10.0),
            ShapeElement::new(ShapeKind::Rect)
                .with_fill("#000000")
                .with_stroke("#FFFFFF", 2.0)
                .with_opacity(0.25),
        );
        let out = convert(&single_slide(vec![element]), &ExportOptions::default());
        match &out.slides()[0].shapes()[0].shape_type {
            ShapeType::AutoShape { fill, line: Some(line), alpha, .. } => {
                assert_eq!(*fill, Some(RGBColor::BLACK));
                assert_eq!(line.color, RGBColor::WHITE);
                assert_eq!(line.width, 25_400);
                assert_eq!(*alpha, Some(0.25));
            },
            other => panic!("unexpected shape {:?}", other),
        }
    }

    #[test]
    fn test_text_background() {
        let text = |background: &str| {
            Element::new(
                Position::new(0.0, 0.0, 10.0, 10.0),
                TextElement::new("x").with_style(
                    TextStyle::new()
                        .with_background_color(background)
                        .with_opacity(0.5),
                ),
            )
        };
        let elements = vec![text("#1E293B"), text("transparent"), text("nope")];
        let out = convert(&single_slide(elements), &ExportOptions::default());
        let fills: Vec<_> = out.slides()[0]
            .shapes()
            .iter()
            .map(|shape| match &shape.shape_type {
                ShapeType::TextBox { format, .. } => {
                    assert_eq!(format.alpha, Some(0.5));
                    format.fill
                },
                other => panic!("unexpected shape {:?}", other),
            })
            .collect();
        assert_eq!(fills, [Some(RGBColor::new(0x1E, 0x29, 0x3B)), None, None]);
    }

    #[test]
    fn test_properties_and_theme() {
        let mut pres = single_slide(vec![]);
        pres.subtitle = Some("Q3".into());
        let out = convert(&pres, &ExportOptions::default());
        assert_eq!(out.properties().title, "Test");
        assert_eq!(out.properties().subject.as_deref(), Some("Q3"));
        assert_eq!(out.properties().creator, "slidecraft");

        pres.author = Some("Ada".into());
        let out = convert(&pres, &ExportOptions::default());
        assert_eq!(out.properties().creator, "Ada");
    }

    #[test]
    fn test_cancelled_conversion() {
        let token = CancellationToken::new();
        token.cancel();
        let options = ExportOptions::default();
        let result = Converter::new(&options, &DefaultImageResolver, Some(&token))
            .convert(&Presentation::new());
        assert!(matches!(result, Err(crate::export::ExportError::Cancelled)));
    }
}
