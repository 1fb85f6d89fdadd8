//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from the
//! per-layer error types to the unified Error type.

use super::types::Error;
use crate::document::DocumentError;
use crate::export::ExportError;
use crate::ooxml::error::OoxmlError;

impl From<DocumentError> for Error {
    fn from(err: DocumentError) -> Self {
        Error::Document(err)
    }
}

impl From<ExportError> for Error {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Io(e) => Error::Io(e),
            other => Error::Export(other),
        }
    }
}

impl From<OoxmlError> for Error {
    fn from(err: OoxmlError) -> Self {
        Error::Export(ExportError::Package(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_error_conversion() {
        let err: Error = DocumentError::LastSlide.into();
        assert!(matches!(err, Error::Document(DocumentError::LastSlide)));
        assert!(err.to_string().starts_with("Document error"));
    }

    #[test]
    fn test_export_io_error_flattens() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: Error = ExportError::Io(io).into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_export_error_message_is_transparent() {
        let err: Error = ExportError::Cancelled.into();
        assert_eq!(err.to_string(), "export failed: cancelled");
    }
}
