//! The builder: one canvas, its selection, and its undo history.

use chrono::{DateTime, Utc};
use tracing::{debug, error};

use crate::action::{Action, CanvasView};
use crate::element::{Element, ElementKind};
use crate::export;
use crate::history::{History, HISTORY_LIMIT};
use crate::markup;
use crate::properties::{PanelView, PropertyForm, StyleControl};
use crate::store::CanvasStore;

pub const CLEAR_PROMPT: &str = "Are you sure you want to clear the canvas?";

#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// Name of the canvas container, used in diagnostics.
    pub container: String,
    pub history_limit: usize,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            container: "#canvas".into(),
            history_limit: HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Builder {
    options: BuilderOptions,
    /// `None` until a canvas container is mounted.
    canvas: Option<CanvasStore>,
    history: History,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new(BuilderOptions::default())
    }
}

impl Builder {
    /// A builder with its canvas mounted and an empty history.
    pub fn new(options: BuilderOptions) -> Self {
        let mut builder = Self::unmounted(options);
        builder.canvas = Some(CanvasStore::new());
        builder
    }

    /// A builder whose canvas container does not exist yet. Canvas
    /// operations log an error and do nothing until [`Builder::mount`].
    pub fn unmounted(options: BuilderOptions) -> Self {
        let now = Utc::now();
        Self {
            history: History::new(options.history_limit),
            options,
            canvas: None,
            created_at: now,
            last_updated: now,
        }
    }

    pub fn mount(&mut self) {
        if self.canvas.is_none() {
            self.canvas = Some(CanvasStore::new());
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn canvas(&self) -> Option<&CanvasStore> {
        self.canvas.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn elements(&self) -> &[Element] {
        self.canvas.as_ref().map(|c| c.elements()).unwrap_or_default()
    }

    pub fn selected(&self) -> Option<&Element> {
        self.canvas.as_ref().and_then(|c| c.selected())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.canvas.as_ref().and_then(|c| c.selected_index())
    }

    fn mounted_canvas(&mut self, operation: &str) -> Option<&mut CanvasStore> {
        if self.canvas.is_none() {
            error!(
                container = %self.options.container,
                operation,
                "Canvas container not found"
            );
        }
        self.canvas.as_mut()
    }

    /// Snapshot the current canvas onto the history stack.
    pub fn save_to_history(&mut self) {
        let Some(canvas) = &self.canvas else {
            return;
        };
        self.history.push(canvas.state().clone());
        self.last_updated = Utc::now();
    }

    /// Add a component, select it, and snapshot. Returns its position.
    pub fn add_element(&mut self, kind: ElementKind) -> Option<usize> {
        let canvas = self.mounted_canvas("add_element")?;
        if !kind.is_known() {
            debug!(element_type = %kind, "Unknown element type, using generic container");
        }
        let index = canvas.add(kind);
        canvas.select(index);
        debug!(index, elements = canvas.len(), "Element added");
        self.save_to_history();
        Some(index)
    }

    /// Select without touching history. Missing positions are ignored.
    pub fn select_element(&mut self, index: usize) -> bool {
        self.mounted_canvas("select_element")
            .is_some_and(|c| c.select(index))
    }

    pub fn remove_element(&mut self, index: usize) -> Option<Element> {
        let removed = self.mounted_canvas("remove_element")?.remove(index)?;
        debug!(index, element_type = %removed.kind, "Element removed");
        self.save_to_history();
        Some(removed)
    }

    /// Reset the canvas to the placeholder after `confirm` approves the
    /// prompt. Returns whether the canvas was cleared.
    pub fn clear_canvas(&mut self, confirm: impl FnOnce(&str) -> bool) -> bool {
        let Some(canvas) = self.mounted_canvas("clear_canvas") else {
            return false;
        };
        if !confirm(CLEAR_PROMPT) {
            return false;
        }
        canvas.clear();
        debug!("Canvas cleared");
        self.save_to_history();
        true
    }

    /// Restore the previous snapshot. Selection is lost since it is not
    /// part of a snapshot.
    pub fn undo(&mut self) -> bool {
        if self.mounted_canvas("undo").is_none() {
            return false;
        }
        let Some(state) = self.history.undo() else {
            return false;
        };
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.restore(state.clone());
        }
        self.last_updated = Utc::now();
        debug!(cursor = ?self.history.cursor(), "Undo");
        true
    }

    /// Apply the non-empty property fields to the selected element.
    pub fn apply_properties(&mut self, form: &PropertyForm) {
        let Some(selected) = self
            .mounted_canvas("apply_properties")
            .and_then(|c| c.selected_mut())
        else {
            return;
        };
        let written = form.apply_to(selected);
        debug!(written, "Properties applied");
        self.save_to_history();
    }

    /// Write one sidebar style control onto the selected element.
    pub fn update_selected_style(&mut self, control: &StyleControl) {
        let Some(selected) = self
            .mounted_canvas("update_selected_style")
            .and_then(|c| c.selected_mut())
        else {
            return;
        };
        let (property, value) = control.declaration();
        if !selected.style.set(property, &value) {
            debug!(property, "Ignored style value");
            return;
        }
        self.save_to_history();
    }

    /// Commit an inline text edit.
    pub fn edit_text(&mut self, index: usize, text: &str) -> bool {
        let changed = self
            .mounted_canvas("edit_text")
            .is_some_and(|c| c.set_text(index, text));
        if changed {
            self.save_to_history();
        }
        changed
    }

    /// Replace the canvas with elements read from saved markup.
    pub fn load_markup(&mut self, html: &str) {
        let Some(canvas) = self.mounted_canvas("load_markup") else {
            return;
        };
        let state = markup::read_canvas(html);
        debug!(elements = state.elements.len(), "Loaded canvas markup");
        canvas.restore(state);
        self.save_to_history();
    }

    pub fn generate_html(&self) -> String {
        self.canvas
            .as_ref()
            .map(|c| export::generate_html(c.state(), c.selected_index()))
            .unwrap_or_default()
    }

    pub fn generate_css(&self) -> &'static str {
        export::generate_css()
    }

    pub fn generate_js(&self) -> &'static str {
        export::generate_js()
    }

    /// Standalone document holding the canvas markup plus boilerplate CSS/JS.
    pub fn export_html(&self) -> String {
        export::export_document(&self.generate_html(), self.generate_css(), self.generate_js())
    }

    pub fn panel(&self) -> PanelView {
        PanelView::for_selection(self.selected())
    }

    pub fn view(&self) -> CanvasView {
        CanvasView {
            html: self.generate_html(),
            elements: self.elements().len(),
            selected: self.selected_index(),
            panel: self.panel(),
            can_undo: self.history.can_undo(),
            history: self.history.len(),
            last_updated: self.last_updated,
        }
    }

    /// Route an action to its operation and return the resulting view.
    pub fn dispatch(&mut self, action: Action) -> CanvasView {
        debug!(action = action.name(), "Dispatching action");
        match action {
            Action::AddElement { kind } => {
                self.add_element(kind);
            }
            Action::SelectElement { index } => {
                self.select_element(index);
            }
            Action::RemoveElement { index } => {
                self.remove_element(index);
            }
            Action::ClearCanvas { confirmed } => {
                self.clear_canvas(|_| confirmed);
            }
            Action::Undo => {
                self.undo();
            }
            Action::ApplyProperties { properties } => self.apply_properties(&properties),
            Action::SetStyle { style } => self.update_selected_style(&style),
            Action::EditText { index, text } => {
                self.edit_text(index, &text);
            }
            Action::LoadMarkup { html } => self.load_markup(&html),
        }
        self.view()
    }
}
