//! UI actions and the view returned after each one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::element::ElementKind;
use crate::properties::{PanelView, PropertyForm, StyleControl};

/// Everything the UI can ask the builder to do, keyed by `action` name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Drop a component onto the canvas.
    AddElement {
        #[serde(rename = "type")]
        kind: ElementKind,
    },
    SelectElement { index: usize },
    RemoveElement { index: usize },
    /// Only honoured when the user confirmed the prompt.
    ClearCanvas {
        #[serde(default)]
        confirmed: bool,
    },
    Undo,
    ApplyProperties {
        #[serde(default)]
        properties: PropertyForm,
    },
    /// Sidebar style controls (colors, font size, font family).
    SetStyle { style: StyleControl },
    /// Inline text edit finished on an editable element.
    EditText { index: usize, text: String },
    /// Replace the canvas with previously saved markup.
    LoadMarkup { html: String },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddElement { .. } => "add_element",
            Self::SelectElement { .. } => "select_element",
            Self::RemoveElement { .. } => "remove_element",
            Self::ClearCanvas { .. } => "clear_canvas",
            Self::Undo => "undo",
            Self::ApplyProperties { .. } => "apply_properties",
            Self::SetStyle { .. } => "set_style",
            Self::EditText { .. } => "edit_text",
            Self::LoadMarkup { .. } => "load_markup",
        }
    }
}

/// Rendered builder state sent back to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct CanvasView {
    pub html: String,
    pub elements: usize,
    pub selected: Option<usize>,
    pub panel: PanelView,
    pub can_undo: bool,
    pub history: usize,
    pub last_updated: DateTime<Utc>,
}
