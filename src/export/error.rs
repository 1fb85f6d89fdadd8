/// Error types for presentation export.
use crate::ooxml::error::OoxmlError;
use thiserror::Error;

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Why an export failed.
///
/// Problems inside the document (malformed colors, unsupported chart kinds,
/// unreadable images) never fail an export; they are substituted and logged.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Building or serializing the package failed
    #[error("export failed: {0}")]
    Package(#[from] OoxmlError),

    /// IO error
    #[error("export failed: {0}")]
    Io(#[from] std::io::Error),

    /// The temporary file could not be moved into place
    #[error("export failed: could not persist {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The export was cancelled before it completed
    #[error("export failed: cancelled")]
    Cancelled,

    /// The worker running a background export went away without a result
    #[error("export failed: worker stopped without a result")]
    WorkerLost,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_share_prefix() {
        let errors = [
            ExportError::Cancelled,
            ExportError::WorkerLost,
            ExportError::Io(std::io::Error::other("disk full")),
            ExportError::Package(OoxmlError::Xml("bad".into())),
        ];
        for err in errors {
            assert!(err.to_string().starts_with("export failed: "), "{}", err);
        }
        assert_eq!(
            ExportError::Io(std::io::Error::other("disk full")).to_string(),
            "export failed: disk full"
        );
    }
}
