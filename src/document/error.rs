/// Error types for document mutations.
use thiserror::Error;

/// Result type for document mutations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Reasons a mutation is rejected.
///
/// A rejected mutation never changes the document or its history.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Removing the only remaining slide
    #[error("a presentation must keep at least one slide")]
    LastSlide,

    /// A presentation without slides was offered as a replacement
    #[error("a presentation must contain at least one slide")]
    EmptyPresentation,

    /// Slide index outside the slide list
    #[error("slide index {index} out of range (slide count {len})")]
    SlideOutOfRange { index: usize, len: usize },

    /// Two elements on one slide share an id
    #[error("duplicate element id '{0}' on slide")]
    DuplicateElementId(String),

    /// A chart dataset does not line up with the chart labels
    #[error("chart dataset {dataset} has {values} values for {labels} labels")]
    ChartDataMismatch {
        dataset: usize,
        labels: usize,
        values: usize,
    },

    /// A chart without datasets
    #[error("chart must have at least one dataset")]
    EmptyChart,

    /// A patch tried to turn an element into a different kind
    #[error("cannot change element kind from {from} to {to}")]
    ElementKindMismatch {
        from: &'static str,
        to: &'static str,
    },

    /// A batch was started while another one is open, or ended without one
    #[error("history batch error: {0}")]
    Batch(&'static str),
}
