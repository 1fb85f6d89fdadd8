//! Color and background helpers shared by the document model and the exporter.

// Submodule declarations
pub mod background;
pub mod color;

// Re-exports
pub use background::{
    DEFAULT_BACKGROUND, GradientStop, LinearGradient, first_hex_token, resolve_background,
};
pub use color::RGBColor;
