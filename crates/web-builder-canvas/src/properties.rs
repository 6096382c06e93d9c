//! Property panel: a fixed table of style fields applied to the selected element.

use serde::{Deserialize, Serialize};

use crate::element::Element;

/// One row of the property form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropertyField {
    pub id: &'static str,
    pub label: &'static str,
    pub css: &'static str,
    pub placeholder: &'static str,
}

pub const PROPERTY_FIELDS: [PropertyField; 7] = [
    PropertyField {
        id: "elementWidth",
        label: "Width",
        css: "width",
        placeholder: "e.g., 100px, 50%",
    },
    PropertyField {
        id: "elementHeight",
        label: "Height",
        css: "height",
        placeholder: "e.g., 100px, auto",
    },
    PropertyField {
        id: "elementMargin",
        label: "Margin",
        css: "margin",
        placeholder: "e.g., 10px, 10px 20px",
    },
    PropertyField {
        id: "elementPadding",
        label: "Padding",
        css: "padding",
        placeholder: "e.g., 10px, 10px 20px",
    },
    PropertyField {
        id: "elementBorder",
        label: "Border",
        css: "border",
        placeholder: "e.g., 1px solid #ccc",
    },
    PropertyField {
        id: "elementBorderRadius",
        label: "Border Radius",
        css: "border-radius",
        placeholder: "e.g., 5px, 50%",
    },
    PropertyField {
        id: "elementTextAlign",
        label: "Text Align",
        css: "text-align",
        placeholder: "",
    },
];

pub const TEXT_ALIGN_OPTIONS: [&str; 4] = ["left", "center", "right", "justify"];

pub const EMPTY_PANEL_MESSAGE: &str = "Select an element to edit its properties";

/// Values read from the property form. Blank fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyForm {
    pub width: String,
    pub height: String,
    pub margin: String,
    pub padding: String,
    pub border: String,
    pub border_radius: String,
    pub text_align: String,
}

impl PropertyForm {
    fn value_for(&self, css: &str) -> &str {
        match css {
            "width" => &self.width,
            "height" => &self.height,
            "margin" => &self.margin,
            "padding" => &self.padding,
            "border" => &self.border,
            "border-radius" => &self.border_radius,
            "text-align" => &self.text_align,
            _ => "",
        }
    }

    /// Write every non-empty field onto `element`'s inline style. Values are
    /// not validated as CSS; see [`Style::set`] for the ones that are skipped.
    /// Returns how many declarations were written.
    ///
    /// [`Style::set`]: crate::element::Style::set
    pub fn apply_to(&self, element: &mut Element) -> usize {
        let mut written = 0;
        for field in &PROPERTY_FIELDS {
            let value = self.value_for(field.css);
            if !value.is_empty() && element.style.set(field.css, value) {
                written += 1;
            }
        }
        written
    }
}

/// Quick style controls in the sidebar, outside the property form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "control", content = "value", rename_all = "snake_case")]
pub enum StyleControl {
    BackgroundColor(String),
    TextColor(String),
    /// Font size in pixels.
    FontSize(u32),
    FontFamily(String),
}

impl StyleControl {
    pub fn declaration(&self) -> (&'static str, String) {
        match self {
            Self::BackgroundColor(v) => ("background-color", v.clone()),
            Self::TextColor(v) => ("color", v.clone()),
            Self::FontSize(px) => ("font-size", format!("{px}px")),
            Self::FontFamily(v) => ("font-family", v.clone()),
        }
    }
}

/// What the property panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelView {
    Empty {
        message: &'static str,
    },
    Element {
        element_type: String,
        fields: &'static [PropertyField],
        text_align_options: &'static [&'static str],
    },
}

impl PanelView {
    pub fn for_selection(selected: Option<&Element>) -> Self {
        match selected {
            None => Self::Empty {
                message: EMPTY_PANEL_MESSAGE,
            },
            Some(el) => Self::Element {
                element_type: el.kind.to_string(),
                fields: &PROPERTY_FIELDS,
                text_align_options: &TEXT_ALIGN_OPTIONS,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    #[test]
    fn test_apply_writes_non_empty_only() {
        let mut el = Element::create(ElementKind::Container);
        let form = PropertyForm {
            width: "50%".into(),
            border_radius: "8px".into(),
            ..Default::default()
        };
        assert_eq!(form.apply_to(&mut el), 2);
        assert_eq!(el.style.get("width"), Some("50%"));
        assert_eq!(el.style.get("border-radius"), Some("8px"));
        // Untouched defaults survive
        assert_eq!(el.style.get("border"), Some("2px dashed #ccc"));
        assert_eq!(el.style.get("padding"), Some("20px"));
    }

    #[test]
    fn test_blank_width_preserves_prior_width() {
        let mut el = Element::create(ElementKind::Text);
        PropertyForm {
            width: "120px".into(),
            ..Default::default()
        }
        .apply_to(&mut el);

        PropertyForm {
            height: "40px".into(),
            ..Default::default()
        }
        .apply_to(&mut el);

        assert_eq!(el.style.get("width"), Some("120px"));
        assert_eq!(el.style.get("height"), Some("40px"));
    }

    #[test]
    fn test_invalid_values_pass_through() {
        let mut el = Element::create(ElementKind::Button);
        PropertyForm {
            margin: "banana".into(),
            text_align: "sideways".into(),
            ..Default::default()
        }
        .apply_to(&mut el);
        assert_eq!(el.style.get("margin"), Some("banana"));
        assert_eq!(el.style.get("text-align"), Some("sideways"));
    }

    #[test]
    fn test_form_deserializes_camel_case_with_gaps() {
        let form: PropertyForm =
            serde_json::from_str(r#"{"borderRadius": "4px", "textAlign": "center"}"#).unwrap();
        assert_eq!(form.border_radius, "4px");
        assert_eq!(form.text_align, "center");
        assert!(form.width.is_empty());
    }

    #[test]
    fn test_style_control_declarations() {
        assert_eq!(
            StyleControl::FontSize(18).declaration(),
            ("font-size", "18px".to_string())
        );
        assert_eq!(
            StyleControl::BackgroundColor("#fff".into()).declaration(),
            ("background-color", "#fff".to_string())
        );
    }

    #[test]
    fn test_panel_view() {
        assert!(matches!(
            PanelView::for_selection(None),
            PanelView::Empty { message } if message == EMPTY_PANEL_MESSAGE
        ));
        let el = Element::create(ElementKind::Image);
        match PanelView::for_selection(Some(&el)) {
            PanelView::Element {
                element_type,
                fields,
                ..
            } => {
                assert_eq!(element_type, "image");
                assert_eq!(fields.len(), 7);
            }
            other => panic!("unexpected panel {other:?}"),
        }
    }
}
