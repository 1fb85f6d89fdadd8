//! Snapshot-based undo/redo history.
//!
//! Every tracked mutation records a deep copy of the presentation as it was
//! before the change. Undo swaps the current document with the most recent
//! snapshot; redo does the reverse.
//!
//! - `past` is bounded; the oldest entries are dropped beyond the limit
//! - recording a new entry clears `future` (a new branch of edits)
//! - a batch records one entry on its first mutation and suppresses the rest
//!   until it ends; a batch that changes nothing leaves both stacks as they were

use super::error::{DocumentError, Result};
use super::presentation::Presentation;
use std::collections::VecDeque;

/// Number of undo steps kept by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// A snapshot together with the action that replaced it.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Short description of the action, e.g. "Add slide".
    pub label: String,
    pub snapshot: Presentation,
}

/// Sizes of the undo and redo stacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HistoryDepth {
    pub past: usize,
    pub future: usize,
}

#[derive(Debug, Clone)]
pub struct History {
    /// Oldest at the front, most recent at the back.
    past: VecDeque<HistoryEntry>,
    /// Next redo at the back.
    future: Vec<HistoryEntry>,
    limit: usize,
    batch: Option<Batch>,
}

/// State of an open batch.
#[derive(Debug, Clone)]
struct Batch {
    label: String,
    /// Snapshot taken at `begin_batch`, moved into `past` on the first record.
    pending: Option<Presentation>,
    /// Redo entries cleared when the batch entry was pushed.
    displaced_future: Vec<HistoryEntry>,
    /// Oldest undo entry evicted by the limit when the batch entry was pushed.
    evicted: Option<HistoryEntry>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    /// Create a history keeping at most `limit` undo steps.
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::with_capacity(limit.min(64)),
            future: Vec::new(),
            limit,
            batch: None,
        }
    }

    /// Record the state before a mutation.
    ///
    /// Inside a batch only the first record has an effect: it pushes the
    /// snapshot taken when the batch began.
    pub fn record(&mut self, label: &str, snapshot: Presentation) {
        if let Some(mut batch) = self.batch.take() {
            if let Some(pending) = batch.pending.take() {
                batch.evicted = self.push_past(batch.label.clone(), pending);
                batch.displaced_future = std::mem::take(&mut self.future);
                tracing::debug!(label, batch = %batch.label, "Batch entry pushed");
            } else {
                tracing::debug!(label, batch = %batch.label, "Record suppressed: batch in progress");
            }
            self.batch = Some(batch);
            return;
        }
        self.push_past(label.to_string(), snapshot);
        self.future.clear();

        tracing::debug!(label, undo_depth = self.past.len(), "History entry pushed");
    }

    /// Step back: returns the snapshot to restore and keeps `current` for redo.
    ///
    /// Returns `None` (and drops nothing) when there is nothing to undo.
    pub fn undo(&mut self, current: Presentation) -> Option<Presentation> {
        self.close_batch("undo");

        let entry = self.past.pop_back()?;
        tracing::debug!(
            label = %entry.label,
            undo_remaining = self.past.len(),
            "Undo"
        );
        self.future.push(HistoryEntry {
            label: entry.label,
            snapshot: current,
        });
        Some(entry.snapshot)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: Presentation) -> Option<Presentation> {
        self.close_batch("redo");

        let entry = self.future.pop()?;
        tracing::debug!(
            label = %entry.label,
            redo_remaining = self.future.len(),
            "Redo"
        );
        self.push_past(entry.label, current);
        Some(entry.snapshot)
    }

    /// Open a batch. `snapshot` becomes the single undo entry of the batch
    /// once the first mutation records; later records are suppressed until
    /// [`History::end_batch`].
    pub fn begin_batch(&mut self, label: &str, snapshot: Presentation) -> Result<()> {
        if self.batch.is_some() {
            return Err(DocumentError::Batch("a batch is already open"));
        }
        self.batch = Some(Batch {
            label: label.to_string(),
            pending: Some(snapshot),
            displaced_future: Vec::new(),
            evicted: None,
        });
        tracing::debug!(label, "Batch started");
        Ok(())
    }

    /// Close the open batch.
    ///
    /// When nothing changed since the batch began (`current` equals the
    /// snapshot it started from) both stacks are restored to their state
    /// before the batch.
    pub fn end_batch(&mut self, current: &Presentation) -> Result<()> {
        let batch = self
            .batch
            .take()
            .ok_or(DocumentError::Batch("no batch is open"))?;

        if batch.pending.is_some() {
            tracing::debug!(label = %batch.label, "Batch ended without mutations");
            return Ok(());
        }

        let unchanged = self
            .past
            .back()
            .is_some_and(|entry| entry.label == batch.label && &entry.snapshot == current);
        if unchanged {
            self.past.pop_back();
            if let Some(evicted) = batch.evicted {
                self.past.push_front(evicted);
            }
            self.future = batch.displaced_future;
            tracing::debug!(label = %batch.label, "Batch ended without changes");
        } else {
            tracing::debug!(label = %batch.label, undo_depth = self.past.len(), "Batch ended");
        }
        Ok(())
    }

    pub fn is_batching(&self) -> bool {
        self.batch.is_some()
    }

    /// Drop both stacks and any open batch.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
        self.batch = None;
        tracing::debug!("History cleared");
    }

    pub fn depth(&self) -> HistoryDepth {
        HistoryDepth {
            past: self.past.len(),
            future: self.future.len(),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Label of the action the next undo reverts.
    pub fn undo_label(&self) -> Option<&str> {
        self.past.back().map(|e| e.label.as_str())
    }

    /// Label of the action the next redo re-applies.
    pub fn redo_label(&self) -> Option<&str> {
        self.future.last().map(|e| e.label.as_str())
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Push onto `past`, returning the entry evicted by the limit.
    fn push_past(&mut self, label: String, snapshot: Presentation) -> Option<HistoryEntry> {
        if self.limit == 0 {
            return None;
        }
        self.past.push_back(HistoryEntry { label, snapshot });
        if self.past.len() > self.limit {
            self.past.pop_front()
        } else {
            None
        }
    }

    fn close_batch(&mut self, during: &str) {
        if let Some(batch) = self.batch.take() {
            tracing::warn!(label = %batch.label, during, "Closing open batch");
        }
    }
}
