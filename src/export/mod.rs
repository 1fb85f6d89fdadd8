/// Presentation to PowerPoint (.pptx) export.
///
/// Export is a pure transform: the presentation is read, never changed, and
/// the same presentation always yields the same bytes.
///
/// # Quick Start
///
/// ```rust,no_run
/// use slidecraft::document::Presentation;
/// use slidecraft::export::{ExportOptions, Exporter};
///
/// # fn main() -> Result<(), slidecraft::export::ExportError> {
/// let presentation = Presentation::new();
///
/// let exporter = Exporter::with_options(ExportOptions::new().with_gradient_backgrounds(true));
/// let bytes = exporter.export_to_buffer(&presentation)?;
/// exporter.export_to_file(&presentation, "deck.pptx")?;
/// # Ok(())
/// # }
/// ```
///
/// # Architecture
///
/// - [`Exporter`]: entry points for memory, streams and files
/// - [`ExportOptions`]: canvas size, embedding and compression
/// - [`ImageResolver`]: how image sources become bytes
/// - [`ExportTask`]: background export with cancellation
/// - `convert`: document model to `ooxml::pptx` writer model
mod config;
mod convert;
mod error;
mod resolver;
mod task;
mod traits;

pub use config::ExportOptions;
pub use error::{ExportError, Result};
pub use resolver::{DefaultImageResolver, ImageResolver, LinkOnlyResolver};
pub use task::{CancellationToken, ExportTask};
pub use traits::ToPptx;

use crate::document::Presentation;
use crate::ooxml::opc::PackageWriter;
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::pptx::MutablePresentation;
use convert::Converter;
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Writes presentations as .pptx packages.
#[derive(Clone)]
pub struct Exporter {
    options: ExportOptions,
    resolver: Arc<dyn ImageResolver>,
}

impl fmt::Debug for Exporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exporter")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Exporter {
    /// Exporter with default options and the [`DefaultImageResolver`].
    pub fn new() -> Self {
        Self::with_options(ExportOptions::default())
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self {
            options,
            resolver: Arc::new(DefaultImageResolver),
        }
    }

    /// Replace the image resolver.
    pub fn with_image_resolver(mut self, resolver: impl ImageResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Build the writer model without serializing it.
    pub fn build(&self, presentation: &Presentation) -> Result<MutablePresentation> {
        Converter::new(&self.options, self.resolver.as_ref(), None).convert(presentation)
    }

    /// Export into memory.
    pub fn export_to_buffer(&self, presentation: &Presentation) -> Result<Vec<u8>> {
        self.export_bytes(presentation, None)
    }

    /// Export into a stream.
    pub fn export_to_writer<W: Write>(&self, presentation: &Presentation, mut writer: W) -> Result<()> {
        let bytes = self.export_bytes(presentation, None)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Export into a file.
    ///
    /// The package is written to a temporary file in the destination
    /// directory and renamed over `path`; on failure nothing is left at
    /// `path` (an existing file stays as it was).
    pub fn export_to_file<P: AsRef<Path>>(&self, presentation: &Presentation, path: P) -> Result<()> {
        self.export_file_with_token(presentation, path.as_ref(), None)
    }

    pub(crate) fn export_bytes(
        &self,
        presentation: &Presentation,
        cancel: Option<&CancellationToken>,
    ) -> Result<Vec<u8>> {
        let pres = Converter::new(&self.options, self.resolver.as_ref(), cancel).convert(presentation)?;
        if let Some(token) = cancel {
            token.check()?;
        }
        let bytes = pres.to_bytes()?;
        info!(
            slides = presentation.slides.len(),
            bytes = bytes.len(),
            "presentation exported"
        );
        Ok(bytes)
    }

    pub(crate) fn export_file_with_token(
        &self,
        presentation: &Presentation,
        path: &Path,
        cancel: Option<&CancellationToken>,
    ) -> Result<()> {
        let bytes = self.export_bytes(presentation, cancel)?;
        if let Some(token) = cancel {
            token.check()?;
        }
        PackageWriter::write_bytes_atomic(path, &bytes).map_err(|e| match e {
            OpcError::Persist { path, source } => ExportError::Persist { path, source },
            other => ExportError::Package(other.into()),
        })?;
        info!(path = %path.display(), "export written");
        Ok(())
    }
}

/// Export a presentation into memory with default options.
pub fn export_to_buffer(presentation: &Presentation) -> Result<Vec<u8>> {
    Exporter::new().export_to_buffer(presentation)
}

/// Export a presentation into a stream with default options.
pub fn export_to_writer<W: Write>(presentation: &Presentation, writer: W) -> Result<()> {
    Exporter::new().export_to_writer(presentation, writer)
}

/// Export a presentation into a file with default options.
pub fn export_to_file<P: AsRef<Path>>(presentation: &Presentation, path: P) -> Result<()> {
    Exporter::new().export_to_file(presentation, path)
}
