/// Core trait for PPTX export.
use super::Exporter;
use super::config::ExportOptions;
use super::error::Result;
use crate::document::Presentation;

/// Types that can be written as a .pptx package.
///
/// # Examples
///
/// ```rust
/// use slidecraft::document::Presentation;
/// use slidecraft::export::{ExportOptions, ToPptx};
///
/// let presentation = Presentation::new();
/// let bytes = presentation.to_pptx()?;
/// let stored = presentation.to_pptx_with_options(&ExportOptions::new().with_embed_images(false))?;
/// assert!(!bytes.is_empty() && !stored.is_empty());
/// # Ok::<(), slidecraft::export::ExportError>(())
/// ```
pub trait ToPptx {
    /// Export with default options.
    fn to_pptx(&self) -> Result<Vec<u8>> {
        self.to_pptx_with_options(&ExportOptions::default())
    }

    /// Export with custom options.
    fn to_pptx_with_options(&self, options: &ExportOptions) -> Result<Vec<u8>>;
}

impl ToPptx for Presentation {
    fn to_pptx_with_options(&self, options: &ExportOptions) -> Result<Vec<u8>> {
        Exporter::with_options(options.clone()).export_to_buffer(self)
    }
}
