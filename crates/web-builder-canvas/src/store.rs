//! Canvas store: the ordered element list plus the current selection.

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementBody, ElementKind};

/// Everything that makes up a history snapshot. Selection is deliberately
/// not part of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasState {
    pub elements: Vec<Element>,
    /// Whether the "drag components here" hint is showing.
    pub placeholder: bool,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            placeholder: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CanvasStore {
    state: CanvasState,
    selected: Option<usize>,
}

impl CanvasStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    pub fn elements(&self) -> &[Element] {
        &self.state.elements
    }

    pub fn len(&self) -> usize {
        self.state.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.state.elements.get(index)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Element> {
        self.selected.and_then(|i| self.state.elements.get(i))
    }

    pub fn selected_mut(&mut self) -> Option<&mut Element> {
        self.selected.and_then(|i| self.state.elements.get_mut(i))
    }

    /// Append a new element of `kind`, hide the placeholder, and return its index.
    pub fn add(&mut self, kind: ElementKind) -> usize {
        self.state.placeholder = false;
        self.state.elements.push(Element::create(kind));
        self.state.elements.len() - 1
    }

    /// Select the element at `index`. Returns false if there is none.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.state.elements.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Detach the element at `index`. The selection follows the element it
    /// pointed at, or is cleared if that element was removed.
    pub fn remove(&mut self, index: usize) -> Option<Element> {
        if index >= self.state.elements.len() {
            return None;
        }
        let removed = self.state.elements.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        Some(removed)
    }

    /// Drop every element and show the placeholder again.
    pub fn clear(&mut self) {
        self.state = CanvasState::default();
        self.selected = None;
    }

    /// Replace the inline text of an editable element.
    pub fn set_text(&mut self, index: usize, new_text: &str) -> bool {
        match self.state.elements.get_mut(index).map(|e| &mut e.body) {
            Some(ElementBody::Editable { text, .. }) => {
                *text = new_text.to_string();
                true
            }
            _ => false,
        }
    }

    /// Restore a snapshot. Selection is cleared.
    pub fn restore(&mut self, state: CanvasState) {
        self.state = state;
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_hides_placeholder() {
        let mut store = CanvasStore::new();
        assert!(store.state().placeholder);
        let idx = store.add(ElementKind::Text);
        assert_eq!(idx, 0);
        assert!(!store.state().placeholder);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_adjusts_selection() {
        let mut store = CanvasStore::new();
        store.add(ElementKind::Text);
        store.add(ElementKind::Heading);
        store.add(ElementKind::Button);
        store.select(2);

        store.remove(0);
        assert_eq!(store.selected_index(), Some(1));
        assert_eq!(store.selected().unwrap().kind, ElementKind::Button);

        store.remove(1);
        assert_eq!(store.selected_index(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut store = CanvasStore::new();
        store.add(ElementKind::Text);
        assert!(store.remove(5).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_select_missing_is_rejected() {
        let mut store = CanvasStore::new();
        assert!(!store.select(0));
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_clear_restores_placeholder() {
        let mut store = CanvasStore::new();
        store.add(ElementKind::List);
        store.select(0);
        store.clear();
        assert!(store.is_empty());
        assert!(store.state().placeholder);
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_set_text_only_on_editable() {
        let mut store = CanvasStore::new();
        store.add(ElementKind::Heading);
        store.add(ElementKind::Image);
        assert!(store.set_text(0, "Welcome"));
        assert_eq!(store.get(0).unwrap().text(), Some("Welcome"));
        assert!(!store.set_text(1, "nope"));
        assert!(!store.set_text(9, "nope"));
    }
}
