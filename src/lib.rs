//! Slidecraft - the editing core of a slide-deck application
//!
//! This library holds the in-memory presentation model, the mutation API with
//! snapshot-based undo/redo, and an exporter that turns a presentation into a
//! PowerPoint Open XML (.pptx) package.
//!
//! # Features
//!
//! - **Document model**: presentations, slides and positioned elements
//!   (text, images, shapes, charts, tables) with templates and layouts
//! - **Document store**: validated mutations, bounded undo/redo history
//! - **PPTX export**: deterministic OPC packages with native charts, tables
//!   and embedded media, to memory or atomically to disk
//! - **Background export**: run an export on a worker thread and cancel it
//!
//! # Example - Editing a presentation
//!
//! ```
//! use slidecraft::document::{DocumentStore, Element, Position, SlideKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = DocumentStore::new();
//! let slide_id = store.add_slide(SlideKind::Content);
//! let index = store.current_slide_index();
//! assert_eq!(store.presentation().slides[index].id, slide_id);
//!
//! store.add_element(index, Element::text(Position::new(100.0, 100.0, 800.0, 60.0), "Hello"))?;
//! assert_eq!(store.presentation().slides.len(), 3);
//!
//! store.undo();
//! assert!(store.presentation().slides[2].elements.is_empty());
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Exporting to PowerPoint
//!
//! ```no_run
//! use slidecraft::document::DocumentStore;
//! use slidecraft::export::Exporter;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = DocumentStore::new();
//! let exporter = Exporter::new();
//!
//! // Into memory
//! let bytes = exporter.export_to_buffer(store.presentation())?;
//! println!("Package size: {} bytes", bytes.len());
//!
//! // Or atomically into a file
//! exporter.export_to_file(store.presentation(), "deck.pptx")?;
//! # Ok(())
//! # }
//! ```

/// Shared helpers: identifiers, units, colors, XML escaping and the
/// crate-wide error type.
pub mod common;

/// Presentation model, document store and undo/redo history.
pub mod document;

/// Presentation to PPTX conversion and export entry points.
pub mod export;

/// Office Open XML writers: OPC packaging, PresentationML and DrawingML charts.
pub mod ooxml;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use document::{DocumentStore, Presentation};
pub use export::{ExportOptions, Exporter};
