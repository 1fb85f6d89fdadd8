/// Background exports with cooperative cancellation.
///
/// An export runs on the rayon pool and reports its result through a
/// channel. Cancellation is checked between slides and once more before
/// anything is written, so a cancelled file export never leaves a file.
use super::Exporter;
use super::error::{ExportError, Result};
use crate::document::Presentation;
use crossbeam::channel::{self, Receiver};
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the export stops at its next check.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// `Err(Cancelled)` once cancellation was requested.
    pub(crate) fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            debug!("export cancelled");
            Err(ExportError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Handle to an export running in the background.
///
/// # Examples
///
/// ```rust
/// use slidecraft::document::Presentation;
/// use slidecraft::export::{ExportTask, Exporter};
///
/// let task = ExportTask::spawn(&Exporter::new(), Presentation::new());
/// let bytes = task.wait()?;
/// assert_eq!(&bytes[0..2], b"PK");
/// # Ok::<(), slidecraft::export::ExportError>(())
/// ```
#[derive(Debug)]
pub struct ExportTask<T> {
    token: CancellationToken,
    result: Receiver<Result<T>>,
}

impl ExportTask<Vec<u8>> {
    /// Export a presentation snapshot into memory.
    pub fn spawn(exporter: &Exporter, presentation: Presentation) -> Self {
        let exporter = exporter.clone();
        Self::start(CancellationToken::new(), move |token| {
            exporter.export_bytes(&presentation, Some(token))
        })
    }
}

impl ExportTask<()> {
    /// Export a presentation snapshot atomically into a file.
    pub fn spawn_to_file(exporter: &Exporter, presentation: Presentation, path: impl Into<PathBuf>) -> Self {
        let exporter = exporter.clone();
        let path = path.into();
        Self::start(CancellationToken::new(), move |token| {
            exporter.export_file_with_token(&presentation, &path, Some(token))
        })
    }
}

impl<T: Send + 'static> ExportTask<T> {
    fn start<F>(token: CancellationToken, job: F) -> Self
    where
        F: FnOnce(&CancellationToken) -> Result<T> + Send + 'static,
    {
        let (sender, receiver) = channel::bounded(1);
        let worker_token = token.clone();
        rayon::spawn(move || {
            // a panic would otherwise abort the whole pool
            let result = panic::catch_unwind(AssertUnwindSafe(|| job(&worker_token)))
                .unwrap_or(Err(ExportError::WorkerLost));
            if let Err(err) = &result {
                info!(%err, "background export finished with error");
            }
            // The handle may already be gone
            let _ = sender.send(result);
        });
        Self {
            token,
            result: receiver,
        }
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The token this task checks; clones cancel the same task.
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Whether a result is ready.
    pub fn is_finished(&self) -> bool {
        !self.result.is_empty()
    }

    /// Block until the export finishes.
    pub fn wait(self) -> Result<T> {
        self.result.recv().map_err(|_| ExportError::WorkerLost)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawned_export_matches_buffer() {
        let exporter = Exporter::new();
        let presentation = Presentation::new();
        let expected = exporter.export_to_buffer(&presentation).unwrap();

        let task = ExportTask::spawn(&exporter, presentation);
        assert_eq!(task.wait().unwrap(), expected);
    }

    #[test]
    fn test_cancelled_file_export_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");

        let token = CancellationToken::new();
        token.cancel();
        let exporter = Exporter::new();
        let presentation = Presentation::new();
        let target = path.clone();
        let task = ExportTask::start(token, move |token| {
            exporter.export_file_with_token(&presentation, &target, Some(token))
        });

        assert!(matches!(task.wait(), Err(ExportError::Cancelled)));
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_spawned_file_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        let exporter = Exporter::new();
        let presentation = Presentation::new();
        let expected = exporter.export_to_buffer(&presentation).unwrap();

        let task = ExportTask::spawn_to_file(&exporter, presentation, &path);
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(30);
        while !task.is_finished() && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(task.is_finished());
        task.wait().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), expected);
    }

    #[test]
    fn test_panicking_worker_is_reported() {
        let task: ExportTask<()> = ExportTask::start(CancellationToken::new(), |_| panic!("boom"));
        assert!(matches!(task.wait(), Err(ExportError::WorkerLost)));
    }

    #[test]
    fn test_token_is_shared() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
        assert!(matches!(clone.check(), Err(ExportError::Cancelled)));
    }
}
