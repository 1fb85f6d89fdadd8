//! Boundary to content-suggestion services.
//!
//! A suggestion service turns a topic into candidate slides. The core only
//! consumes the resulting plain records through
//! [`DocumentStore::insert_suggestion`](super::DocumentStore::insert_suggestion);
//! it never talks to a service itself.

use super::element::{Element, TextElement, TextStyle};
use super::layout::{LayoutContent, LayoutPreset};
use super::slide::SlideKind;
use super::types::Position;
use serde::{Deserialize, Serialize};

/// One candidate slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSuggestion {
    #[serde(rename = "type", default)]
    pub kind: SlideKind,
    pub title: String,
    /// Body text, one point per line
    #[serde(default)]
    pub content: String,
    /// Preferred arrangement; the default heading/body pair when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutPreset>,
}

impl SlideSuggestion {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            kind: SlideKind::Content,
            title: title.into(),
            content: content.into(),
            layout: None,
        }
    }

    pub fn with_kind(mut self, kind: SlideKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_layout(mut self, layout: LayoutPreset) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Layout fill for this suggestion: the title plus one item per line.
    pub fn layout_content(&self) -> LayoutContent {
        LayoutContent::new()
            .with_title(self.title.clone())
            .with_items(self.content.lines().filter(|l| !l.trim().is_empty()))
    }

    /// The heading and body elements used when no layout is requested.
    pub fn default_elements(&self) -> [Element; 2] {
        [
            Element::new(
                Position::new(50.0, 50.0, 860.0, 60.0),
                TextElement::new(self.title.clone()).with_style(
                    TextStyle::new()
                        .with_font_size(36.0)
                        .with_bold(true)
                        .with_color("#FFFFFF"),
                ),
            ),
            Element::new(
                Position::new(50.0, 130.0, 860.0, 350.0),
                TextElement::new(self.content.clone())
                    .with_style(TextStyle::new().with_font_size(18.0).with_color("#CBD5E1")),
            ),
        ]
    }
}

/// What to ask a suggestion service for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub topic: String,
    pub slide_count: usize,
}

impl SuggestionRequest {
    pub fn new(topic: impl Into<String>, slide_count: usize) -> Self {
        Self {
            topic: topic.into(),
            slide_count,
        }
    }
}

/// A producer of candidate slides.
pub trait SuggestionSource {
    type Error: std::error::Error;

    fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<SlideSuggestion>, Self::Error>;
}

/// Offline source that returns a generic talk outline for any topic.
///
/// Useful as a fallback when no service is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineSource;

const OUTLINE: [(&str, &str); 9] = [
    (
        "Agenda",
        "1. Background\n2. Key points\n3. Analysis\n4. Conclusions",
    ),
    ("Background", "Context and why this matters"),
    ("Key Points", "The main ideas in detail"),
    ("Data Analysis", "Figures and trends"),
    ("Case Study", "A worked example and lessons learned"),
    ("Challenges", "Open problems"),
    ("Solutions", "Practical ways forward"),
    ("Conclusion", "Summary and recommendations"),
    ("Thank You", "Thanks for listening\nQuestions?"),
];

impl SuggestionSource for OutlineSource {
    type Error = std::convert::Infallible;

    fn suggest(&self, request: &SuggestionRequest) -> Result<Vec<SlideSuggestion>, Self::Error> {
        let title = SlideSuggestion::new(request.topic.clone(), "Presentation")
            .with_kind(SlideKind::Title)
            .with_layout(LayoutPreset::TitleCenter);

        let outline = OUTLINE
            .iter()
            .map(|(title, content)| SlideSuggestion::new(*title, *content));

        Ok(std::iter::once(title)
            .chain(outline)
            .take(request.slide_count)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_respects_slide_count() {
        let request = SuggestionRequest::new("Rust", 4);
        let slides = OutlineSource.suggest(&request).unwrap();
        assert_eq!(slides.len(), 4);
        assert_eq!(slides[0].title, "Rust");
        assert_eq!(slides[0].kind, SlideKind::Title);
        assert_eq!(slides[1].title, "Agenda");

        let all = OutlineSource.suggest(&SuggestionRequest::new("Rust", 50)).unwrap();
        assert_eq!(all.len(), OUTLINE.len() + 1);
    }

    #[test]
    fn test_layout_content_skips_blank_lines() {
        let s = SlideSuggestion::new("T", "a\n\n b \n");
        let content = s.layout_content();
        assert_eq!(content.title.as_deref(), Some("T"));
        assert_eq!(content.items, [String::from("a"), String::from(" b ")]);
    }

    #[test]
    fn test_deserialize_service_record() {
        let json = r#"{"title": "Intro", "content": "Hello", "layout": "two-column"}"#;
        let s: SlideSuggestion = serde_json::from_str(json).unwrap();
        assert_eq!(s.kind, SlideKind::Content);
        assert_eq!(s.layout, Some(LayoutPreset::TwoColumn));
    }
}
