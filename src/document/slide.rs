//! Slides and slide transitions.

use super::element::Element;
use super::error::{DocumentError, Result};
use super::types::{ElementId, SlideId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Advisory slide category; does not constrain the elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    Title,
    #[default]
    Content,
    Chart,
    Image,
    Blank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    None,
    #[default]
    Fade,
    Slide,
    Zoom,
    Flip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Transition played when the slide appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    #[serde(rename = "duration")]
    pub duration_ms: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<TransitionDirection>,
}

impl Default for Transition {
    /// 300 ms fade.
    fn default() -> Self {
        Self::new(TransitionKind::Fade, 300)
    }
}

impl Transition {
    pub const fn new(kind: TransitionKind, duration_ms: u32) -> Self {
        Self {
            kind,
            duration_ms,
            direction: None,
        }
    }

    pub const fn with_direction(mut self, direction: TransitionDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub const fn none() -> Self {
        Self::new(TransitionKind::None, 0)
    }

    /// Built-in transition presets by name.
    ///
    /// Names: `none`, `fade`, `slide-left`, `slide-right`, `slide-up`,
    /// `slide-down`, `zoom`, `flip`.
    pub fn preset(name: &str) -> Option<Self> {
        use TransitionDirection::{Down, Left, Right, Up};

        let slide = |direction| Self::new(TransitionKind::Slide, 400).with_direction(direction);
        let transition = match name {
            "none" => Self::none(),
            "fade" => Self::new(TransitionKind::Fade, 500),
            "slide-left" => slide(Left),
            "slide-right" => slide(Right),
            "slide-up" => slide(Up),
            "slide-down" => slide(Down),
            "zoom" => Self::new(TransitionKind::Zoom, 300),
            "flip" => Self::new(TransitionKind::Flip, 500),
            _ => return None,
        };
        Some(transition)
    }

    /// Names accepted by [`Transition::preset`].
    pub const PRESET_NAMES: [&'static str; 8] = [
        "none",
        "fade",
        "slide-left",
        "slide-right",
        "slide-up",
        "slide-down",
        "zoom",
        "flip",
    ];
}

/// One slide: a background and an ordered list of elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub id: SlideId,
    #[serde(rename = "type", default)]
    pub kind: SlideKind,
    /// Background descriptor: a solid color or a CSS `linear-gradient(...)`.
    pub background: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub transition: Transition,
}

impl Slide {
    /// Empty slide with a fresh id and the default transition.
    pub fn new(kind: SlideKind, background: impl Into<String>) -> Self {
        Self {
            id: SlideId::generate(),
            kind,
            background: background.into(),
            elements: Vec::new(),
            transition: Transition::default(),
        }
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    pub fn element_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| &e.id == id)
    }

    pub fn element_index(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    pub fn contains_element(&self, id: &ElementId) -> bool {
        self.element_index(id).is_some()
    }

    /// Check that element ids are unique and every element is valid.
    pub fn validate(&self) -> Result<()> {
        validate_elements(&self.elements)
    }

    /// Deep copy with a fresh slide id and fresh element ids.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        copy.id = SlideId::generate();
        for element in &mut copy.elements {
            element.id = ElementId::generate();
        }
        copy
    }
}

/// Validate an element list as it would appear on a slide.
pub fn validate_elements(elements: &[Element]) -> Result<()> {
    let mut seen = HashSet::with_capacity(elements.len());
    for element in elements {
        if !seen.insert(element.id.as_str()) {
            return Err(DocumentError::DuplicateElementId(element.id.to_string()));
        }
        element.validate()?;
    }
    Ok(())
}

/// Partial update for a slide. Unset fields keep their current value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlidePatch {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SlideKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<Element>>,
}

impl SlidePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: SlideKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn with_elements(mut self, elements: Vec<Element>) -> Self {
        self.elements = Some(elements);
        self
    }

    /// Check the patch without applying it.
    pub fn validate(&self) -> Result<()> {
        match &self.elements {
            Some(elements) => validate_elements(elements),
            None => Ok(()),
        }
    }

    /// Merge into `slide`. Call [`SlidePatch::validate`] first.
    pub(crate) fn apply_to(self, slide: &mut Slide) {
        if let Some(kind) = self.kind {
            slide.kind = kind;
        }
        if let Some(background) = self.background {
            slide.background = background;
        }
        if let Some(transition) = self.transition {
            slide.transition = transition;
        }
        if let Some(elements) = self.elements {
            slide.elements = elements;
        }
    }
}
