/// Configuration for the document store.
use super::history::DEFAULT_HISTORY_LIMIT;

/// Options controlling how a [`DocumentStore`](super::DocumentStore) records history.
///
/// # Examples
///
/// ```rust
/// use slidecraft::document::{DocumentStore, StoreOptions};
///
/// let options = StoreOptions::new()
///     .with_history_limit(50)
///     .with_track_metadata_edits(true);
/// let store = DocumentStore::with_options(options);
/// assert_eq!(store.options().history_limit, 50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreOptions {
    /// Maximum number of undo steps kept
    pub history_limit: usize,
    /// Whether title and subtitle edits are undoable
    pub track_metadata_edits: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            track_metadata_edits: false,
        }
    }
}

impl StoreOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of undo steps.
    ///
    /// A limit of zero disables undo entirely.
    #[inline]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Record title and subtitle edits in the undo history.
    ///
    /// Off by default: renaming the deck does not consume an undo step.
    #[inline]
    pub fn with_track_metadata_edits(mut self, track: bool) -> Self {
        self.track_metadata_edits = track;
        self
    }
}
