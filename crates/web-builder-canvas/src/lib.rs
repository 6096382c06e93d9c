//! Canvas state manager: the page builder's element store, undo history,
//! property panel and exporter.
//!
//! A [`Builder`] owns one canvas. UI events arrive as [`Action`]s and are
//! routed through [`Builder::dispatch`]; every mutation records a full
//! snapshot so the canvas can be rolled back with undo.

pub mod action;
pub mod builder;
pub mod element;
pub mod export;
pub mod history;
pub mod markup;
pub mod properties;
pub mod store;

pub use action::{Action, CanvasView};
pub use builder::{Builder, BuilderOptions};
pub use element::{Element, ElementBody, ElementKind, Style};
pub use history::History;
pub use properties::{PanelView, PropertyForm, StyleControl};
pub use store::{CanvasState, CanvasStore};
