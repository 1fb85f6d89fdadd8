/// Configuration options for presentation export.
use crate::common::unit::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::ooxml::opc::Compression;

/// Options controlling how a presentation is written to .pptx.
///
/// # Examples
///
/// ```rust
/// use slidecraft::export::ExportOptions;
///
/// // Create with defaults
/// let options = ExportOptions::default();
/// assert_eq!(options.slide_width_units, 960.0);
///
/// // Or customize
/// let options = ExportOptions::new()
///     .with_default_author("Design team")
///     .with_gradient_backgrounds(true)
///     .with_embed_images(false);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Canvas width in logical units (96 per inch)
    pub slide_width_units: f64,
    /// Canvas height in logical units
    pub slide_height_units: f64,
    /// Creator written when the presentation has no author
    pub default_author: String,
    /// Store resolvable images in the package instead of linking them
    pub embed_images: bool,
    /// Ship a workbook with each chart so its data stays editable
    pub embed_chart_data: bool,
    /// Write `linear-gradient(...)` backgrounds as gradient fills instead of
    /// their first color
    pub gradient_backgrounds: bool,
    pub compression: Compression,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            slide_width_units: CANVAS_WIDTH,
            slide_height_units: CANVAS_HEIGHT,
            default_author: env!("CARGO_PKG_NAME").to_string(),
            embed_images: true,
            embed_chart_data: true,
            gradient_backgrounds: false,
            compression: Compression::Deflated,
        }
    }
}

impl ExportOptions {
    /// Create a new `ExportOptions` with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size in logical units.
    #[inline]
    pub fn with_slide_size(mut self, width_units: f64, height_units: f64) -> Self {
        self.slide_width_units = width_units;
        self.slide_height_units = height_units;
        self
    }

    #[inline]
    pub fn with_default_author(mut self, author: impl Into<String>) -> Self {
        self.default_author = author.into();
        self
    }

    /// Set whether images are stored in the package.
    ///
    /// When disabled every picture links to its source.
    #[inline]
    pub fn with_embed_images(mut self, embed: bool) -> Self {
        self.embed_images = embed;
        self
    }

    #[inline]
    pub fn with_embed_chart_data(mut self, embed: bool) -> Self {
        self.embed_chart_data = embed;
        self
    }

    /// Set whether gradient backgrounds are kept as gradients.
    #[inline]
    pub fn with_gradient_backgrounds(mut self, enabled: bool) -> Self {
        self.gradient_backgrounds = enabled;
        self
    }

    #[inline]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::new();
        assert_eq!(options.slide_width_units, 960.0);
        assert_eq!(options.slide_height_units, 540.0);
        assert_eq!(options.default_author, "slidecraft");
        assert!(options.embed_images);
        assert!(options.embed_chart_data);
        assert!(!options.gradient_backgrounds);
        assert_eq!(options.compression, Compression::Deflated);
    }

    #[test]
    fn test_builder_chain() {
        let options = ExportOptions::new()
            .with_slide_size(1280.0, 720.0)
            .with_compression(Compression::Stored)
            .with_embed_chart_data(false);
        assert_eq!(options.slide_width_units, 1280.0);
        assert_eq!(options.compression, Compression::Stored);
        assert!(!options.embed_chart_data);
    }
}
