//! XML helpers used by the Office Open XML writers.

mod escape;

pub use escape::escape_xml;
