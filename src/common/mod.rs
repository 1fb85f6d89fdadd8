//! Common types and utilities shared across the document model and the writers.
//!
//! This module provides identifier generation, unit conversion between the
//! editor canvas and Office EMUs, color parsing and XML escaping.

// Submodule declarations
pub mod error;
pub mod id;
pub mod style;
pub mod unit;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use style::{RGBColor, resolve_background};
