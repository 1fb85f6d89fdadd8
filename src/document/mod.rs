/// Presentation document model and editing store.
///
/// The model is plain data: a [`Presentation`] owns ordered [`Slide`]s, each
/// holding positioned [`Element`]s. All edits go through a [`DocumentStore`],
/// which validates them and keeps a bounded, snapshot-based undo history.
///
/// # Example
///
/// ```rust
/// use slidecraft::document::{
///     ChartData, ChartKind, Dataset, DocumentStore, Element, ElementPatch, Position,
/// };
///
/// let mut store = DocumentStore::new();
/// let data = ChartData::new(vec!["Q1".into(), "Q2".into()])
///     .with_dataset(Dataset::new("Revenue", vec![12.0, 18.5]));
/// let chart = Element::chart(Position::new(80.0, 120.0, 800.0, 360.0), ChartKind::Bar, data);
/// let id = store.add_element(1, chart)?;
///
/// store.update_element(1, &id, ElementPatch::new().with_rotation(5.0))?;
/// assert_eq!(store.history_depth().past, 2);
/// # Ok::<(), slidecraft::document::DocumentError>(())
/// ```
mod chart;
mod config;
mod element;
mod error;
mod history;
mod layout;
mod presentation;
mod slide;
mod store;
mod suggestion;
mod template;
mod types;

pub use chart::{ChartData, ChartKind, Dataset, DatasetColors};
pub use config::StoreOptions;
pub use element::{
    ChartElement, Element, ElementKind, ElementPatch, FontWeight, ImageElement, ShapeElement,
    ShapeKind, TableElement, TextAlign, TextElement, TextStyle,
};
pub use error::{DocumentError, Result};
pub use history::{DEFAULT_HISTORY_LIMIT, History, HistoryDepth, HistoryEntry};
pub use layout::{LayoutContent, LayoutPreset};
pub use presentation::{DEFAULT_TITLE, Presentation};
pub use slide::{Slide, SlideKind, SlidePatch, Transition, TransitionDirection, TransitionKind};
pub use store::DocumentStore;
pub use suggestion::{
    OutlineSource, SlideSuggestion, SuggestionRequest, SuggestionSource,
};
pub use template::{ColorScheme, Template, TemplateKind};
pub use types::{ElementId, Position, SlideId};
