//! PowerPoint (.pptx) presentation writing.
//!
//! A [`MutablePresentation`] holds slides built from text boxes, auto shapes,
//! pictures, tables and charts. It is turned into a complete PresentationML
//! package (master, layout, theme, property parts) in memory or on disk.
//!
//! # Example
//!
//! ```rust
//! use slidecraft::common::RGBColor;
//! use slidecraft::ooxml::pptx::{
//!     MutablePresentation, PresetGeometry, SlideBackground, SlideTransition, TextAlignment,
//!     TransitionType,
//! };
//!
//! let mut pres = MutablePresentation::new();
//! let slide = pres.add_slide();
//! slide.set_background(SlideBackground::solid(RGBColor::new(0x1E, 0x29, 0x3B)));
//! slide.set_transition(SlideTransition::new(TransitionType::Fade));
//! slide
//!     .add_text_box("Quarterly review", 457200, 457200, 8229600, 914400)
//!     .font_size(40.0)
//!     .bold(true)
//!     .align(TextAlignment::Center);
//! slide
//!     .add_shape(PresetGeometry::Rect, 457200, 1600200, 2743200, 1371600)
//!     .fill(RGBColor::new(0x38, 0xBD, 0xF8));
//!
//! let bytes = pres.to_bytes()?;
//! assert!(!bytes.is_empty());
//! # Ok::<(), slidecraft::ooxml::OoxmlError>(())
//! ```

pub mod backgrounds;
pub mod format;
pub mod template;
pub mod transitions;
pub mod writer;

pub use backgrounds::SlideBackground;
pub use format::{ImageFormat, TextAlignment, TextFormat};
pub use template::{DocumentProperties, ThemeColors};
pub use transitions::{SlideTransition, TransitionDirection, TransitionSpeed, TransitionType};
pub use writer::{
    LineStyle, MutablePresentation, MutableShape, MutableSlide, PresetGeometry, TableStyle,
};
