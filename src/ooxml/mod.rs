//! Office Open XML (OOXML) writers.
//!
//! The module is organized into layers:
//!
//! 1. **OPC Layer** (`opc`): package structure, parts, relationships and the
//!    ZIP container
//! 2. **DrawingML charts** (`charts`): chart parts with embedded workbooks
//! 3. **PresentationML** (`pptx`): slides, shapes, transitions and the
//!    presentation scaffolding around them
//!
//! # Example
//!
//! ```rust
//! use slidecraft::ooxml::pptx::{MutablePresentation, PresetGeometry};
//!
//! let mut pres = MutablePresentation::new();
//! let slide = pres.add_slide();
//! slide.add_shape(PresetGeometry::Rect, 100, 100, 2_000_000, 1_000_000);
//! let bytes = pres.to_bytes()?;
//! assert_eq!(&bytes[0..2], b"PK");
//! # Ok::<(), slidecraft::ooxml::OoxmlError>(())
//! ```
pub mod charts;
pub mod error;
pub mod opc;
pub mod pptx;

// Re-export commonly used types from OPC layer
pub use opc::{OpcPackage, PackURI};

// Re-export error types
pub use error::{OoxmlError, Result};
