//! Unified error type for the library.
//!
//! Each layer reports its own error enum; this module folds them into one
//! type for callers that drive both editing and export.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
