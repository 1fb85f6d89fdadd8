use thiserror::Error;

/// Main error type for slidecraft operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A mutation was rejected because it would break a document invariant
    #[error("Document error: {0}")]
    Document(crate::document::DocumentError),

    /// Producing the .pptx package failed
    #[error(transparent)]
    Export(crate::export::ExportError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for slidecraft operations.
pub type Result<T> = std::result::Result<T, Error>;
