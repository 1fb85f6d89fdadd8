//! The document store: the single owner of the live presentation.
//!
//! All edits go through [`DocumentStore`] methods. Each tracked mutation
//! snapshots the presentation into the history before it applies, clears the
//! redo stack and refreshes `updated_at`. A rejected mutation changes
//! nothing, neither the document nor the history.

use super::config::StoreOptions;
use super::element::{Element, ElementPatch};
use super::error::{DocumentError, Result};
use super::history::{History, HistoryDepth};
use super::layout::{LayoutContent, LayoutPreset};
use super::presentation::Presentation;
use super::slide::{Slide, SlideKind, SlidePatch, Transition};
use super::suggestion::SlideSuggestion;
use super::template::{ColorScheme, Template};
use super::types::{ElementId, SlideId};

/// Owner of the live presentation, its undo history and the editor view
/// state (current slide, selected element).
#[derive(Debug, Clone)]
pub struct DocumentStore {
    presentation: Presentation,
    history: History,
    current_slide: usize,
    selected_element: Option<ElementId>,
    options: StoreOptions,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Store holding the default presentation.
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    pub fn with_options(options: StoreOptions) -> Self {
        Self {
            presentation: Presentation::new(),
            history: History::new(options.history_limit),
            current_slide: 0,
            selected_element: None,
            options,
        }
    }

    // ------------------------------------------------------------------
    // Snapshot reads
    // ------------------------------------------------------------------

    #[inline]
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Deep copy of the current document, e.g. for a background export.
    pub fn snapshot(&self) -> Presentation {
        self.presentation.clone()
    }

    pub fn into_presentation(self) -> Presentation {
        self.presentation
    }

    #[inline]
    pub fn current_slide_index(&self) -> usize {
        self.current_slide
    }

    pub fn current_slide(&self) -> &Slide {
        // `current_slide` is kept in range and the deck is never empty.
        &self.presentation.slides[self.current_slide]
    }

    pub fn selected_element_id(&self) -> Option<&ElementId> {
        self.selected_element.as_ref()
    }

    pub fn history_depth(&self) -> HistoryDepth {
        self.history.depth()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    // ------------------------------------------------------------------
    // Slides
    // ------------------------------------------------------------------

    /// Append an empty slide with the template background and select it.
    pub fn add_slide(&mut self, kind: SlideKind) -> SlideId {
        let slide = Slide::new(kind, self.presentation.template.background.clone());
        let id = slide.id.clone();

        self.apply("Add slide", |p| p.slides.push(slide));
        self.current_slide = self.presentation.slides.len() - 1;
        id
    }

    /// Remove the slide at `index`.
    ///
    /// The last remaining slide can't be removed.
    pub fn remove_slide(&mut self, index: usize) -> Result<()> {
        self.try_apply("Remove slide", |p| {
            if p.slides.len() <= 1 {
                return Err(DocumentError::LastSlide);
            }
            check_slide_index(p, index)?;
            p.slides.remove(index);
            Ok(())
        })?;
        self.sync_view();
        Ok(())
    }

    /// Insert a copy of the slide at `index` right after it and select the
    /// copy. The copy and its elements get fresh ids.
    pub fn duplicate_slide(&mut self, index: usize) -> Result<SlideId> {
        let id = self.try_apply("Duplicate slide", |p| {
            let copy = check_slide_index(p, index)?.duplicate();
            let id = copy.id.clone();
            p.slides.insert(index + 1, copy);
            Ok(id)
        })?;
        self.current_slide = index + 1;
        Ok(id)
    }

    /// Move the slide at `from` so that it ends up at `to`.
    ///
    /// The current slide index follows the slide it pointed at.
    pub fn move_slide(&mut self, from: usize, to: usize) -> Result<()> {
        check_slide_index(&self.presentation, from)?;
        check_slide_index(&self.presentation, to)?;
        if from == to {
            return Ok(());
        }

        self.apply("Move slide", |p| {
            let slide = p.slides.remove(from);
            p.slides.insert(to, slide);
        });

        let current = self.current_slide;
        self.current_slide = if current == from {
            to
        } else if from < current && to >= current {
            current - 1
        } else if from > current && to <= current {
            current + 1
        } else {
            current
        };
        Ok(())
    }

    /// Merge `patch` into the slide at `index`.
    pub fn update_slide(&mut self, index: usize, patch: SlidePatch) -> Result<()> {
        self.update_slide_labeled("Update slide", index, patch)
    }

    /// Replace the slide's elements with a built-in layout.
    pub fn apply_layout(
        &mut self,
        index: usize,
        layout: LayoutPreset,
        content: &LayoutContent,
    ) -> Result<()> {
        let patch = SlidePatch::new().with_elements(layout.build(content));
        self.update_slide_labeled("Apply layout", index, patch)
    }

    /// Recolor one slide's background with a built-in scheme.
    pub fn apply_color_scheme(&mut self, index: usize, scheme: ColorScheme) -> Result<()> {
        let patch = SlidePatch::new().with_background(scheme.background());
        self.update_slide_labeled("Apply color scheme", index, patch)
    }

    /// Set the slide's transition from a preset name such as `slide-left`.
    ///
    /// Returns `Ok(false)` for an unknown preset name.
    pub fn apply_transition_preset(&mut self, index: usize, name: &str) -> Result<bool> {
        let Some(transition) = Transition::preset(name) else {
            return Ok(false);
        };
        let patch = SlidePatch::new().with_transition(transition);
        self.update_slide_labeled("Set transition", index, patch)?;
        Ok(true)
    }

    fn update_slide_labeled(&mut self, label: &str, index: usize, patch: SlidePatch) -> Result<()> {
        self.try_apply(label, |p| {
            patch.validate()?;
            let slide = check_slide_index_mut(p, index)?;
            patch.apply_to(slide);
            Ok(())
        })?;
        self.sync_view();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------

    /// Append `element` to a slide and select it.
    pub fn add_element(&mut self, slide_index: usize, element: Element) -> Result<ElementId> {
        let id = element.id.clone();
        self.try_apply("Add element", |p| {
            let slide = check_slide_index_mut(p, slide_index)?;
            if slide.contains_element(&element.id) {
                return Err(DocumentError::DuplicateElementId(element.id.to_string()));
            }
            element.validate()?;
            slide.elements.push(element);
            Ok(())
        })?;
        self.selected_element = Some(id.clone());
        Ok(id)
    }

    /// Merge `patch` into an element.
    ///
    /// Returns `Ok(false)` without touching anything when the slide has no
    /// element with that id.
    pub fn update_element(
        &mut self,
        slide_index: usize,
        id: &ElementId,
        patch: ElementPatch,
    ) -> Result<bool> {
        if !check_slide_index(&self.presentation, slide_index)?.contains_element(id) {
            return Ok(false);
        }
        self.try_apply("Update element", |p| {
            let slide = check_slide_index_mut(p, slide_index)?;
            match slide.element_mut(id) {
                Some(element) => element.apply_patch(&patch),
                None => Ok(()),
            }
        })?;
        Ok(true)
    }

    /// Remove an element, clearing the selection if it was selected.
    ///
    /// Returns `Ok(false)` when the slide has no element with that id.
    pub fn remove_element(&mut self, slide_index: usize, id: &ElementId) -> Result<bool> {
        let Some(position) = check_slide_index(&self.presentation, slide_index)?.element_index(id)
        else {
            return Ok(false);
        };
        self.apply("Remove element", |p| {
            p.slides[slide_index].elements.remove(position);
        });
        if self.selected_element.as_ref() == Some(id) {
            self.selected_element = None;
        }
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Presentation-wide
    // ------------------------------------------------------------------

    /// Switch template; every slide takes the template background.
    pub fn set_template(&mut self, template: Template) {
        self.apply("Change template", |p| {
            for slide in &mut p.slides {
                slide.background = template.background.clone();
            }
            p.template = template;
        });
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.edit_metadata("Rename presentation", |p| p.title = title);
    }

    /// Set the subtitle; an empty string clears it.
    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        let subtitle = Some(subtitle.into()).filter(|s| !s.is_empty());
        self.edit_metadata("Change subtitle", |p| p.subtitle = subtitle);
    }

    /// Set the author; an empty string clears it.
    pub fn set_author(&mut self, author: impl Into<String>) {
        let author = Some(author.into()).filter(|s| !s.is_empty());
        self.edit_metadata("Change author", |p| p.author = author);
    }

    /// Start over with the default presentation and an empty history.
    pub fn new_presentation(&mut self) {
        self.reset(Presentation::new());
        tracing::debug!("New presentation");
    }

    /// Open `presentation` in place of the current one.
    ///
    /// The history is cleared. A presentation without slides or with invalid
    /// slides is rejected.
    pub fn replace_presentation(&mut self, presentation: Presentation) -> Result<()> {
        if let Err(e) = presentation.validate() {
            tracing::debug!(error = %e, "Rejected replacement presentation");
            return Err(e);
        }
        self.reset(presentation);
        Ok(())
    }

    // ------------------------------------------------------------------
    // View state
    // ------------------------------------------------------------------

    pub fn set_current_slide(&mut self, index: usize) -> Result<()> {
        check_slide_index(&self.presentation, index)?;
        self.current_slide = index;
        Ok(())
    }

    /// Select an element by id, or clear the selection with `None`.
    pub fn select_element(&mut self, id: Option<ElementId>) {
        self.selected_element = id;
    }

    // ------------------------------------------------------------------
    // Suggestions
    // ------------------------------------------------------------------

    /// Add a slide built from a content suggestion.
    ///
    /// Undoes as a single step.
    pub fn insert_suggestion(&mut self, suggestion: &SlideSuggestion) -> Result<SlideId> {
        self.batched("Insert suggestion", |store| store.insert_suggestion_inner(suggestion))
    }

    /// Add one slide per suggestion, undone as a single step.
    pub fn insert_suggestions(&mut self, suggestions: &[SlideSuggestion]) -> Result<Vec<SlideId>> {
        self.batched("Insert suggestions", |store| {
            suggestions
                .iter()
                .map(|s| store.insert_suggestion_inner(s))
                .collect()
        })
    }

    fn insert_suggestion_inner(&mut self, suggestion: &SlideSuggestion) -> Result<SlideId> {
        let id = self.add_slide(suggestion.kind);
        let index = self.current_slide;
        match suggestion.layout {
            Some(layout) => self.apply_layout(index, layout, &suggestion.layout_content())?,
            None => {
                for element in suggestion.default_elements() {
                    self.add_element(index, element)?;
                }
            },
        }
        Ok(id)
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Revert the most recent tracked mutation.
    ///
    /// Returns `false` when there is nothing to undo. The view resets to the
    /// first slide with nothing selected.
    pub fn undo(&mut self) -> bool {
        let current = self.presentation.clone();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                true
            },
            None => false,
        }
    }

    /// Re-apply the most recently undone mutation.
    pub fn redo(&mut self) -> bool {
        let current = self.presentation.clone();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                true
            },
            None => false,
        }
    }

    /// Group the following mutations into one undo step until
    /// [`DocumentStore::end_batch`].
    pub fn begin_batch(&mut self, label: &str) -> Result<()> {
        self.history.begin_batch(label, self.presentation.clone())
    }

    pub fn end_batch(&mut self) -> Result<()> {
        self.history.end_batch(&self.presentation)
    }

    pub fn is_batching(&self) -> bool {
        self.history.is_batching()
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Run an infallible tracked mutation.
    fn apply<T>(&mut self, label: &str, f: impl FnOnce(&mut Presentation) -> T) -> T {
        self.history.record(label, self.presentation.clone());
        let value = f(&mut self.presentation);
        self.presentation.touch();
        value
    }

    /// Run a tracked mutation on a working copy; nothing is recorded or
    /// changed when it fails.
    fn try_apply<T>(
        &mut self,
        label: &str,
        f: impl FnOnce(&mut Presentation) -> Result<T>,
    ) -> Result<T> {
        let mut working = self.presentation.clone();
        match f(&mut working) {
            Ok(value) => {
                let before = std::mem::replace(&mut self.presentation, working);
                self.history.record(label, before);
                self.presentation.touch();
                Ok(value)
            },
            Err(e) => {
                tracing::debug!(label, error = %e, "Mutation rejected");
                Err(e)
            },
        }
    }

    fn edit_metadata(&mut self, label: &str, f: impl FnOnce(&mut Presentation)) {
        if self.options.track_metadata_edits {
            self.apply(label, f);
        } else {
            f(&mut self.presentation);
            self.presentation.touch();
        }
    }

    /// Run `f` inside a batch unless one is already open. On failure the
    /// document is rolled back to where the batch started.
    fn batched<T>(&mut self, label: &str, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.history.is_batching() {
            return f(self);
        }

        let before = self.presentation.clone();
        let view = (self.current_slide, self.selected_element.clone());
        self.history.begin_batch(label, before.clone())?;
        let result = f(self);
        if result.is_err() {
            self.presentation = before;
            (self.current_slide, self.selected_element) = view;
        }
        self.history.end_batch(&self.presentation)?;
        result
    }

    fn restore(&mut self, presentation: Presentation) {
        self.presentation = presentation;
        self.current_slide = 0;
        self.selected_element = None;
    }

    fn reset(&mut self, presentation: Presentation) {
        self.history.clear();
        self.restore(presentation);
    }

    /// Clamp the current slide and drop a selection whose element is gone.
    fn sync_view(&mut self) {
        let last = self.presentation.slides.len().saturating_sub(1);
        self.current_slide = self.current_slide.min(last);

        if let Some(id) = &self.selected_element {
            let exists = self
                .presentation
                .slides
                .iter()
                .any(|s| s.contains_element(id));
            if !exists {
                self.selected_element = None;
            }
        }
    }
}

fn check_slide_index(p: &Presentation, index: usize) -> Result<&Slide> {
    p.slides.get(index).ok_or(DocumentError::SlideOutOfRange {
        index,
        len: p.slides.len(),
    })
}

fn check_slide_index_mut(p: &mut Presentation, index: usize) -> Result<&mut Slide> {
    let len = p.slides.len();
    p.slides
        .get_mut(index)
        .ok_or(DocumentError::SlideOutOfRange { index, len })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::chart::{ChartData, ChartKind, Dataset};
    use crate::document::element::{ElementKind, ShapeElement, ShapeKind, TextElement};
    use crate::document::template::TemplateKind;
    use crate::document::types::Position;
    use std::collections::HashSet;

    fn pos() -> Position {
        Position::new(100.0, 100.0, 200.0, 50.0)
    }

    /// Slide list only, ignoring document timestamps.
    fn slides(store: &DocumentStore) -> Vec<Slide> {
        store.presentation().slides.clone()
    }

    #[test]
    fn test_default_session_scenario() {
        let mut store = DocumentStore::new();
        assert_eq!(store.presentation().slides.len(), 2);

        store.add_slide(SlideKind::Content);
        assert_eq!(store.current_slide_index(), 2);

        let id = store.add_element(2, Element::text(pos(), "Hello")).unwrap();
        assert_eq!(store.selected_element_id(), Some(&id));

        let counts: Vec<usize> = store
            .presentation()
            .slides
            .iter()
            .map(|s| s.elements.len())
            .collect();
        assert_eq!(counts, [1, 2, 1]);

        assert!(store.undo());
        assert_eq!(store.presentation().slides.len(), 3);
        assert!(store.presentation().slides[2].elements.is_empty());
        assert_eq!(store.current_slide_index(), 0);
        assert_eq!(store.selected_element_id(), None);
    }

    #[test]
    fn test_remove_last_slide_is_rejected() {
        let mut store = DocumentStore::new();
        store.remove_slide(0).unwrap();
        let before = store.presentation().clone();
        let depth = store.history_depth();

        assert_eq!(store.remove_slide(0), Err(DocumentError::LastSlide));
        assert_eq!(store.presentation(), &before);
        assert_eq!(store.history_depth(), depth);
    }

    #[test]
    fn test_remove_slide_clamps_current() {
        let mut store = DocumentStore::new();
        store.set_current_slide(1).unwrap();
        store.remove_slide(1).unwrap();
        assert_eq!(store.current_slide_index(), 0);
        assert_eq!(
            store.remove_slide(5),
            Err(DocumentError::LastSlide),
        );
    }

    #[test]
    fn test_remove_slide_out_of_range() {
        let mut store = DocumentStore::new();
        assert_eq!(
            store.remove_slide(7),
            Err(DocumentError::SlideOutOfRange { index: 7, len: 2 })
        );
        assert!(!store.can_undo());
    }

    #[test]
    fn test_duplicate_slide() {
        let mut store = DocumentStore::new();
        let id = store.duplicate_slide(1).unwrap();
        let p = store.presentation();

        assert_eq!(p.slides.len(), 3);
        assert_eq!(p.slides[2].id, id);
        assert_eq!(store.current_slide_index(), 2);

        let original: HashSet<_> = p.slides[1].elements.iter().map(|e| &e.id).collect();
        assert!(p.slides[2].elements.iter().all(|e| !original.contains(&e.id)));
    }

    #[test]
    fn test_move_slide_tracks_current() {
        let mut store = DocumentStore::new();
        store.add_slide(SlideKind::Blank);
        store.add_slide(SlideKind::Blank);
        let ids: Vec<SlideId> = store.presentation().slides.iter().map(|s| s.id.clone()).collect();

        // current slide moves with the slide it points at
        store.set_current_slide(1).unwrap();
        store.move_slide(1, 3).unwrap();
        assert_eq!(store.current_slide_index(), 3);
        assert_eq!(store.current_slide().id, ids[1]);

        // moving a slide from before the current one shifts it down
        store.set_current_slide(2).unwrap();
        let current = store.current_slide().id.clone();
        store.move_slide(0, 3).unwrap();
        assert_eq!(store.current_slide().id, current);

        // and moving one from after it in front shifts it up
        store.move_slide(3, 0).unwrap();
        assert_eq!(store.current_slide().id, current);

        assert!(store.move_slide(0, 9).is_err());
    }

    #[test]
    fn test_update_slide_validates_elements() {
        let mut store = DocumentStore::new();
        let dup = vec![
            Element::text(pos(), "a").with_id("same"),
            Element::text(pos(), "b").with_id("same"),
        ];
        let before = slides(&store);
        let err = store.update_slide(0, SlidePatch::new().with_elements(dup));
        assert_eq!(err, Err(DocumentError::DuplicateElementId("same".into())));
        assert_eq!(slides(&store), before);

        store
            .update_slide(0, SlidePatch::new().with_background("#FFFFFF"))
            .unwrap();
        assert_eq!(store.presentation().slides[0].background, "#FFFFFF");
        assert_eq!(store.presentation().slides[0].elements.len(), 1);
    }

    #[test]
    fn test_add_element_rejects_duplicate_id_and_bad_chart() {
        let mut store = DocumentStore::new();
        let existing = store.presentation().slides[0].elements[0].id.clone();
        assert!(matches!(
            store.add_element(0, Element::text(pos(), "x").with_id(existing.clone())),
            Err(DocumentError::DuplicateElementId(_))
        ));

        let bad = ChartData::new(vec!["a".into(), "b".into()])
            .with_dataset(Dataset::new("s", vec![1.0]));
        assert_eq!(
            store.add_element(0, Element::chart(pos(), ChartKind::Bar, bad)),
            Err(DocumentError::ChartDataMismatch {
                dataset: 0,
                labels: 2,
                values: 1
            })
        );
        assert!(!store.can_undo());
    }

    #[test]
    fn test_update_element_unknown_id_is_noop() {
        let mut store = DocumentStore::new();
        let before = store.presentation().clone();
        let patched = store
            .update_element(0, &ElementId::from("missing"), ElementPatch::new().with_z_index(3))
            .unwrap();
        assert!(!patched);
        assert_eq!(store.presentation(), &before);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_update_element_is_idempotent() {
        let mut store = DocumentStore::new();
        let id = store.presentation().slides[1].elements[0].id.clone();
        let patch = ElementPatch::new()
            .with_position(Position::new(1.0, 2.0, 3.0, 4.0))
            .with_rotation(45.0)
            .with_kind(TextElement::new("Updated"));

        store.update_element(1, &id, patch.clone()).unwrap();
        let once = slides(&store);
        store.update_element(1, &id, patch).unwrap();
        assert_eq!(slides(&store), once);
    }

    #[test]
    fn test_update_element_kind_mismatch() {
        let mut store = DocumentStore::new();
        let id = store.presentation().slides[0].elements[0].id.clone();
        let result = store.update_element(
            0,
            &id,
            ElementPatch::new().with_kind(ShapeElement::new(ShapeKind::Rect)),
        );
        assert!(matches!(
            result,
            Err(DocumentError::ElementKindMismatch { .. })
        ));
        assert!(!store.can_undo());
    }

    #[test]
    fn test_remove_element_clears_selection() {
        let mut store = DocumentStore::new();
        let id = store.add_element(0, Element::shape(pos(), ShapeKind::Circle)).unwrap();
        assert!(store.remove_element(0, &id).unwrap());
        assert_eq!(store.selected_element_id(), None);
        assert!(!store.remove_element(0, &id).unwrap());
    }

    #[test]
    fn test_set_template_overwrites_backgrounds_only() {
        let mut store = DocumentStore::new();
        let elements_before: Vec<_> = slides(&store).into_iter().map(|s| s.elements).collect();

        let green = Template::preset(TemplateKind::Green);
        store.set_template(green.clone());

        let p = store.presentation();
        assert_eq!(p.template, green);
        assert!(p.slides.iter().all(|s| s.background == green.background));
        let elements_after: Vec<_> = p.slides.iter().map(|s| s.elements.clone()).collect();
        assert_eq!(elements_before, elements_after);
    }

    #[test]
    fn test_title_edits_skip_history_by_default() {
        let mut store = DocumentStore::new();
        let stamp = store.presentation().updated_at;
        store.set_title("Quarterly Review");
        store.set_subtitle("Q3");

        assert_eq!(store.presentation().title, "Quarterly Review");
        assert_eq!(store.presentation().subtitle.as_deref(), Some("Q3"));
        assert!(store.presentation().updated_at >= stamp);
        assert!(!store.can_undo());

        store.set_subtitle("");
        assert_eq!(store.presentation().subtitle, None);
    }

    #[test]
    fn test_title_edits_tracked_when_enabled() {
        let mut store =
            DocumentStore::with_options(StoreOptions::new().with_track_metadata_edits(true));
        store.set_title("Renamed");
        assert!(store.undo());
        assert_eq!(store.presentation().title, "Untitled Presentation");
    }

    #[test]
    fn test_bounded_history() {
        let mut store = DocumentStore::new();
        let mut states = vec![store.presentation().clone()];
        for _ in 0..25 {
            store.add_slide(SlideKind::Blank);
            states.push(store.presentation().clone());
        }
        assert_eq!(store.history_depth().past, 20);

        let mut undone = 0;
        while store.undo() {
            undone += 1;
        }
        assert_eq!(undone, 20);
        // the five oldest states are unreachable
        assert_eq!(store.presentation(), &states[5]);
    }

    #[test]
    fn test_branching_erases_future() {
        let mut store = DocumentStore::new();
        store.add_slide(SlideKind::Blank);
        store.add_slide(SlideKind::Blank);
        store.undo();
        assert!(store.can_redo());

        store.add_slide(SlideKind::Chart);
        assert!(!store.can_redo());
        assert!(!store.redo());
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut store = DocumentStore::new();
        let before = store.presentation().clone();
        store.duplicate_slide(0).unwrap();
        let after = store.presentation().clone();

        assert!(store.undo());
        assert_eq!(store.presentation(), &before);
        assert!(store.redo());
        assert_eq!(store.presentation(), &after);
        assert_eq!(store.undo_label(), Some("Duplicate slide"));
    }

    #[test]
    fn test_empty_history() {
        let mut store = DocumentStore::new();
        assert!(!store.undo());
        assert!(!store.redo());
    }

    #[test]
    fn test_new_and_replace_presentation_clear_history() {
        let mut store = DocumentStore::new();
        store.add_slide(SlideKind::Blank);
        store.new_presentation();
        assert_eq!(store.history_depth(), HistoryDepth::default());
        assert_eq!(store.presentation().slides.len(), 2);

        let empty = Presentation::with_slides("x", Vec::new());
        assert_eq!(
            store.replace_presentation(empty),
            Err(DocumentError::EmptyPresentation)
        );

        let mut other = Presentation::new();
        other.title = "Opened".into();
        store.add_slide(SlideKind::Blank);
        store.replace_presentation(other).unwrap();
        assert_eq!(store.presentation().title, "Opened");
        assert!(!store.can_undo());
    }

    #[test]
    fn test_apply_layout_and_color_scheme() {
        let mut store = DocumentStore::new();
        let content = LayoutContent::new().with_title("Stats");
        store.apply_layout(1, LayoutPreset::Stats, &content).unwrap();
        assert_eq!(store.presentation().slides[1].elements.len(), 5);

        store.apply_color_scheme(1, ColorScheme::LightMinimal).unwrap();
        assert_eq!(store.presentation().slides[1].background, "#FFFFFF");
        assert_eq!(store.history_depth().past, 2);

        assert!(store.apply_transition_preset(1, "zoom").unwrap());
        assert!(!store.apply_transition_preset(1, "bounce").unwrap());
    }

    #[test]
    fn test_insert_suggestion_is_one_undo_step() {
        let mut store = DocumentStore::new();
        let suggestion = SlideSuggestion::new("Findings", "One\nTwo");
        let id = store.insert_suggestion(&suggestion).unwrap();

        let slide = store.current_slide();
        assert_eq!(slide.id, id);
        assert_eq!(slide.elements.len(), 2);
        assert!(matches!(
            &slide.elements[0].kind,
            ElementKind::Text(t) if t.content == "Findings"
        ));
        assert_eq!(store.history_depth().past, 1);

        store.undo();
        assert_eq!(store.presentation().slides.len(), 2);
    }

    #[test]
    fn test_insert_suggestions_with_layout() {
        let mut store = DocumentStore::new();
        let suggestions = [
            SlideSuggestion::new("A", "x").with_layout(LayoutPreset::List),
            SlideSuggestion::new("B", "y"),
        ];
        let ids = store.insert_suggestions(&suggestions).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(store.presentation().slides.len(), 4);
        assert_eq!(store.history_depth().past, 1);
    }

    #[test]
    fn test_batch_groups_drag() {
        let mut store = DocumentStore::new();
        let id = store.presentation().slides[0].elements[0].id.clone();
        let before = slides(&store);

        store.begin_batch("Drag").unwrap();
        for step in 0..10u8 {
            let x = f64::from(step) * 5.0;
            store
                .update_element(0, &id, ElementPatch::new().with_position(Position::new(x, 0.0, 10.0, 10.0)))
                .unwrap();
        }
        store.end_batch().unwrap();

        assert_eq!(store.history_depth().past, 1);
        store.undo();
        assert_eq!(slides(&store), before);
    }

    #[test]
    fn test_selection_and_author() {
        let mut store = DocumentStore::new();
        let id = store.presentation().slides[1].elements[0].id.clone();
        store.select_element(Some(id.clone()));
        assert_eq!(store.selected_element_id(), Some(&id));

        store.remove_element(1, &id).unwrap();
        assert_eq!(store.selected_element_id(), None);

        store.select_element(Some(id));
        store.select_element(None);
        assert_eq!(store.selected_element_id(), None);

        let depth = store.history_depth();
        store.set_author("Ada");
        assert_eq!(store.presentation().author.as_deref(), Some("Ada"));
        store.set_author("");
        assert_eq!(store.presentation().author, None);
        assert_eq!(store.history_depth(), depth);
    }

    #[test]
    fn test_empty_batch_keeps_redo() {
        let mut store = DocumentStore::new();
        store.add_slide(SlideKind::Content);
        store.undo();
        assert!(store.can_redo());

        store.begin_batch("Drag").unwrap();
        store.end_batch().unwrap();

        assert!(store.can_redo());
        assert!(store.redo());
        assert_eq!(store.presentation().slides.len(), 3);
    }

    #[test]
    fn test_empty_batch_at_limit_keeps_oldest() {
        let mut store = DocumentStore::new();
        for _ in 0..20 {
            store.add_slide(SlideKind::Content);
        }
        assert_eq!(store.history_depth().past, 20);

        store.begin_batch("Drag").unwrap();
        store.end_batch().unwrap();
        assert_eq!(store.history_depth().past, 20);

        let mut undone = 0;
        while store.undo() {
            undone += 1;
        }
        assert_eq!(undone, 20);
        assert_eq!(store.presentation().slides.len(), 2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use proptest::test_runner::TestCaseResult;

        #[derive(Debug, Clone)]
        enum Op {
            AddSlide,
            RemoveSlide(usize),
            DuplicateSlide(usize),
            MoveSlide(usize, usize),
            AddText(usize),
            RemoveFirstElement(usize),
            Template(usize),
            Undo,
            Redo,
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                Just(Op::AddSlide),
                (0usize..8).prop_map(Op::RemoveSlide),
                (0usize..8).prop_map(Op::DuplicateSlide),
                (0usize..8, 0usize..8).prop_map(|(a, b)| Op::MoveSlide(a, b)),
                (0usize..8).prop_map(Op::AddText),
                (0usize..8).prop_map(Op::RemoveFirstElement),
                (0usize..5).prop_map(Op::Template),
                Just(Op::Undo),
                Just(Op::Redo),
            ]
        }

        fn run(store: &mut DocumentStore, op: &Op) {
            let _ = match op {
                Op::AddSlide => {
                    store.add_slide(SlideKind::Content);
                    Ok(())
                },
                Op::RemoveSlide(i) => store.remove_slide(*i),
                Op::DuplicateSlide(i) => store.duplicate_slide(*i).map(drop),
                Op::MoveSlide(a, b) => store.move_slide(*a, *b),
                Op::AddText(i) => store.add_element(*i, Element::text(pos(), "t")).map(drop),
                Op::RemoveFirstElement(i) => {
                    let first = store
                        .presentation()
                        .slides
                        .get(*i)
                        .and_then(|s| s.elements.first())
                        .map(|e| e.id.clone());
                    match first {
                        Some(id) => store.remove_element(*i, &id).map(drop),
                        None => Ok(()),
                    }
                },
                Op::Template(k) => {
                    store.set_template(Template::preset(TemplateKind::ALL[*k]));
                    Ok(())
                },
                Op::Undo => {
                    store.undo();
                    Ok(())
                },
                Op::Redo => {
                    store.redo();
                    Ok(())
                },
            };
        }

        fn assert_invariants(store: &DocumentStore) -> TestCaseResult {
            let p = store.presentation();
            prop_assert!(!p.slides.is_empty());
            prop_assert!(store.current_slide_index() < p.slides.len());
            for slide in &p.slides {
                let mut seen = HashSet::new();
                for element in &slide.elements {
                    prop_assert!(seen.insert(element.id.clone()), "duplicate id {}", element.id);
                }
            }
            prop_assert!(store.history_depth().past <= 20);
            Ok(())
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn prop_invariants_hold(ops in prop::collection::vec(op_strategy(), 0..60)) {
                let mut store = DocumentStore::new();
                for op in &ops {
                    run(&mut store, op);
                    assert_invariants(&store)?;
                }
            }

            #[test]
            fn prop_undo_redo_round_trip(
                ops in prop::collection::vec(op_strategy(), 0..30),
                last in op_strategy(),
            ) {
                let mut store = DocumentStore::new();
                for op in &ops {
                    run(&mut store, op);
                }
                let before = store.presentation().clone();
                let depth = store.history_depth().past;
                run(&mut store, &last);

                // only check when `last` recorded a new entry
                let recorded = store.history_depth().past > depth
                    || (depth == 20 && store.presentation() != &before && !store.can_redo());
                if recorded && !matches!(last, Op::Undo | Op::Redo) {
                    let after = store.presentation().clone();
                    prop_assert!(store.undo());
                    prop_assert_eq!(store.presentation(), &before);
                    prop_assert!(store.redo());
                    prop_assert_eq!(store.presentation(), &after);
                }
            }
        }
    }
}
