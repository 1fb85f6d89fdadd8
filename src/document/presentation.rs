//! The presentation root and the default document.

use super::element::{Element, TextAlign, TextElement, TextStyle};
use super::error::{DocumentError, Result};
use super::slide::{Slide, SlideKind};
use super::template::Template;
use super::types::{Position, SlideId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title given to new presentations.
pub const DEFAULT_TITLE: &str = "Untitled Presentation";

/// A slide deck.
///
/// Always holds at least one slide once it has passed
/// [`Presentation::validate`]; the document store never lets it drop to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub slides: Vec<Slide>,
    #[serde(default)]
    pub template: Template,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Presentation {
    /// The default document: a title slide and a content slide on the dark
    /// template.
    pub fn new() -> Self {
        let template = Template::default();
        let now = Utc::now();

        let title_slide = Slide::new(SlideKind::Title, template.background.clone()).with_element(
            Element::new(
                Position::new(100.0, 200.0, 800.0, 100.0),
                TextElement::new("Presentation Title").with_style(
                    TextStyle::new()
                        .with_font_size(48.0)
                        .with_bold(true)
                        .with_color("#FFFFFF")
                        .with_align(TextAlign::Center),
                ),
            ),
        );

        let content_slide = Slide::new(SlideKind::Content, template.background.clone())
            .with_element(Element::new(
                Position::new(100.0, 100.0, 800.0, 60.0),
                TextElement::new("Content Title").with_style(
                    TextStyle::new()
                        .with_font_size(36.0)
                        .with_bold(true)
                        .with_color("#FFFFFF"),
                ),
            ))
            .with_element(Element::new(
                Position::new(100.0, 180.0, 800.0, 300.0),
                TextElement::new("Click to add content...\n- Point 1\n- Point 2\n- Point 3")
                    .with_style(TextStyle::new().with_font_size(20.0).with_color("#CBD5E1")),
            ));

        Self {
            id: crate::common::id::generate_id(),
            title: DEFAULT_TITLE.to_string(),
            subtitle: None,
            author: None,
            slides: vec![title_slide, content_slide],
            template,
            created_at: now,
            updated_at: now,
        }
    }

    /// Presentation with the given slides on the default template.
    pub fn with_slides(title: impl Into<String>, slides: Vec<Slide>) -> Self {
        let now = Utc::now();
        Self {
            id: crate::common::id::generate_id(),
            title: title.into(),
            subtitle: None,
            author: None,
            slides,
            template: Template::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slide_index(&self, id: &SlideId) -> Option<usize> {
        self.slides.iter().position(|s| &s.id == id)
    }

    /// Check the document-wide invariants.
    pub fn validate(&self) -> Result<()> {
        if self.slides.is_empty() {
            return Err(DocumentError::EmptyPresentation);
        }
        self.slides.iter().try_for_each(Slide::validate)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
