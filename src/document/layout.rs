//! Built-in slide layouts.
//!
//! A layout is a fixed arrangement of text boxes on the 960x540 canvas.
//! Applying one replaces the slide's elements.

use super::element::{Element, TextAlign, TextElement, TextStyle};
use super::types::Position;
use serde::{Deserialize, Serialize};

const TITLE_COLOR: &str = "#FFFFFF";
const BODY_COLOR: &str = "#CBD5E1";
const QUOTE_COLOR: &str = "#94A3B8";
const STAT_COLOR: &str = "#38BDF8";

const DEFAULT_BODY: &str = "Click to add content...\n- Point 1\n- Point 2\n- Point 3";
const DEFAULT_STATS: [&str; 4] = ["100%", "50+", "1M+", "99%"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutPreset {
    TitleLeft,
    TitleCenter,
    TitleRight,
    TwoColumn,
    List,
    Comparison,
    Quote,
    Stats,
}

/// Text used to fill a layout. Missing parts get placeholder text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

impl LayoutContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_items<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self
    }

    fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(fallback)
    }

    fn body_or(&self, fallback: &str) -> String {
        if self.items.is_empty() {
            fallback.to_string()
        } else {
            self.items.join("\n")
        }
    }

    /// Item `index`, or `fallback` when the content has fewer items.
    fn item_or<'a>(&'a self, index: usize, fallback: &'a str) -> &'a str {
        self.items.get(index).map(String::as_str).unwrap_or(fallback)
    }
}

impl LayoutPreset {
    pub const ALL: [LayoutPreset; 8] = [
        Self::TitleLeft,
        Self::TitleCenter,
        Self::TitleRight,
        Self::TwoColumn,
        Self::List,
        Self::Comparison,
        Self::Quote,
        Self::Stats,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::TitleLeft => "title-left",
            Self::TitleCenter => "title-center",
            Self::TitleRight => "title-right",
            Self::TwoColumn => "two-column",
            Self::List => "list",
            Self::Comparison => "comparison",
            Self::Quote => "quote",
            Self::Stats => "stats",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.key() == key)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TitleLeft => "Title left",
            Self::TitleCenter => "Centered title",
            Self::TitleRight => "Title right",
            Self::TwoColumn => "Two columns",
            Self::List => "List",
            Self::Comparison => "Comparison",
            Self::Quote => "Quote",
            Self::Stats => "Statistics",
        }
    }

    /// Build the elements of this layout, each with a fresh id.
    pub fn build(&self, content: &LayoutContent) -> Vec<Element> {
        match self {
            Self::TitleLeft | Self::TitleRight => {
                let align = if *self == Self::TitleRight {
                    TextAlign::Right
                } else {
                    TextAlign::Left
                };
                vec![
                    title(50.0, 50.0, 860.0, 80.0, 48.0, align, content.title_or("Title")),
                    body(
                        Position::new(50.0, 150.0, 860.0, 350.0),
                        20.0,
                        align,
                        content.body_or(DEFAULT_BODY),
                    ),
                ]
            },
            Self::TitleCenter => vec![
                title(100.0, 180.0, 760.0, 80.0, 48.0, TextAlign::Center, content.title_or("Title")),
                body(
                    Position::new(100.0, 280.0, 760.0, 50.0),
                    24.0,
                    TextAlign::Center,
                    content.body_or("Subtitle"),
                ),
            ],
            Self::TwoColumn => vec![
                title(50.0, 30.0, 860.0, 50.0, 36.0, TextAlign::Left, content.title_or("Title")),
                body(
                    Position::new(50.0, 100.0, 400.0, 380.0),
                    18.0,
                    TextAlign::Left,
                    content.item_or(0, "Left column\n\n• Point 1\n• Point 2").to_string(),
                ),
                body(
                    Position::new(510.0, 100.0, 400.0, 380.0),
                    18.0,
                    TextAlign::Left,
                    content.item_or(1, "Right column\n\n• Point 3\n• Point 4").to_string(),
                ),
            ],
            Self::List => vec![
                title(50.0, 30.0, 860.0, 50.0, 36.0, TextAlign::Left, content.title_or("Title")),
                body(
                    Position::new(50.0, 100.0, 860.0, 400.0),
                    20.0,
                    TextAlign::Left,
                    content.body_or(DEFAULT_BODY),
                ),
            ],
            Self::Comparison => vec![
                title(50.0, 30.0, 860.0, 50.0, 36.0, TextAlign::Left, content.title_or("Title")),
                body(
                    Position::new(50.0, 100.0, 400.0, 380.0),
                    18.0,
                    TextAlign::Left,
                    content.item_or(0, "Option A\n\n• Strength\n• Weakness").to_string(),
                ),
                body(
                    Position::new(510.0, 100.0, 400.0, 380.0),
                    18.0,
                    TextAlign::Left,
                    content.item_or(1, "Option B\n\n• Strength\n• Weakness").to_string(),
                ),
            ],
            Self::Quote => vec![
                Element::new(
                    Position::new(100.0, 150.0, 760.0, 200.0),
                    TextElement::new(content.title_or("\"Quote\"")).with_style(
                        TextStyle::new()
                            .with_font_size(32.0)
                            .with_italic(true)
                            .with_color(QUOTE_COLOR)
                            .with_align(TextAlign::Center),
                    ),
                ),
                body(
                    Position::new(100.0, 380.0, 760.0, 40.0),
                    18.0,
                    TextAlign::Center,
                    content.item_or(0, "- Author").to_string(),
                ),
            ],
            Self::Stats => {
                let mut elements = vec![title(
                    50.0,
                    30.0,
                    860.0,
                    50.0,
                    36.0,
                    TextAlign::Left,
                    content.title_or("Title"),
                )];
                for (i, x) in [50.0, 280.0, 510.0, 740.0].into_iter().enumerate() {
                    elements.push(Element::new(
                        Position::new(x, 100.0, 200.0, 150.0),
                        TextElement::new(content.item_or(i, DEFAULT_STATS[i])).with_style(
                            TextStyle::new()
                                .with_font_size(48.0)
                                .with_color(STAT_COLOR)
                                .with_align(TextAlign::Center),
                        ),
                    ));
                }
                elements
            },
        }
    }
}

fn title(x: f64, y: f64, w: f64, h: f64, size: f64, align: TextAlign, text: &str) -> Element {
    Element::new(
        Position::new(x, y, w, h),
        TextElement::new(text).with_style(
            TextStyle::new()
                .with_font_size(size)
                .with_bold(true)
                .with_color(TITLE_COLOR)
                .with_align(align),
        ),
    )
}

fn body(position: Position, size: f64, align: TextAlign, text: String) -> Element {
    Element::new(
        position,
        TextElement::new(text).with_style(
            TextStyle::new()
                .with_font_size(size)
                .with_color(BODY_COLOR)
                .with_align(align),
        ),
    )
}
