//! Element model: component kind, body and inline style.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Component types offered by the palette. Anything else is kept verbatim
/// as [`ElementKind::Other`] and rendered as an empty generic container.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    Text,
    Heading,
    Button,
    Image,
    Container,
    Link,
    List,
    Form,
    Other(String),
}

impl ElementKind {
    pub const KNOWN: [ElementKind; 8] = [
        ElementKind::Text,
        ElementKind::Heading,
        ElementKind::Button,
        ElementKind::Image,
        ElementKind::Container,
        ElementKind::Link,
        ElementKind::List,
        ElementKind::Form,
    ];

    pub fn parse(s: &str) -> Self {
        match s {
            "text" => Self::Text,
            "heading" => Self::Heading,
            "button" => Self::Button,
            "image" => Self::Image,
            "container" => Self::Container,
            "link" => Self::Link,
            "list" => Self::List,
            "form" => Self::Form,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Heading => "heading",
            Self::Button => "button",
            Self::Image => "image",
            Self::Container => "container",
            Self::Link => "link",
            Self::List => "list",
            Self::Form => "form",
            Self::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for ElementKind {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const IMAGE_MARKUP: &str = r#"<img src="https://via.placeholder.com/300x200?text=Image" alt="Image" style="max-width: 100%; height: auto;">"#;

const LIST_MARKUP: &str = "<ul><li>Item 1</li><li>Item 2</li><li>Item 3</li></ul>";

const FORM_MARKUP: &str = concat!(
    "<form>",
    r#"<input type="text" placeholder="Name" style="width: 100%; margin: 5px 0; padding: 8px;">"#,
    r#"<input type="email" placeholder="Email" style="width: 100%; margin: 5px 0; padding: 8px;">"#,
    r#"<button type="submit" style="margin: 5px 0; padding: 8px 16px;">Submit</button>"#,
    "</form>",
);

/// What sits inside an element's wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ElementBody {
    /// A single inline-editable tag (`p`, `h2`, `button`, `a`).
    Editable { tag: String, text: String },
    /// Fixed markup, either a component template or read back from a saved page.
    Markup { html: String },
    Empty,
}

/// Inline CSS declarations in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style(Vec<(String, String)>);

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing an earlier value in place.
    ///
    /// The value is trimmed and otherwise stored as given. A value that is
    /// blank or contains `;` cannot stay inside one declaration, so it is
    /// ignored and any earlier value is kept. Returns whether it was stored.
    pub fn set(&mut self, property: &str, value: &str) -> bool {
        let property = property.trim().to_ascii_lowercase();
        let value = value.trim();
        if property.is_empty() || value.is_empty() || value.contains(';') {
            return false;
        }
        match self.0.iter_mut().find(|(k, _)| *k == property) {
            Some((_, v)) => *v = value.to_string(),
            None => self.0.push((property, value.to_string())),
        }
        true
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize as a `style` attribute value: `width: 10px; color: red;`.
    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse a `style` attribute value. Declarations without a colon are dropped.
    pub fn parse(css: &str) -> Self {
        let mut style = Self::new();
        for decl in css.split(';') {
            if let Some((k, v)) = decl.split_once(':') {
                style.set(k, v);
            }
        }
        style
    }
}

/// A placed component. Its id is its position in the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub body: ElementBody,
    #[serde(default)]
    pub style: Style,
}

impl Element {
    /// Build an element with its type-specific default content.
    pub fn create(kind: ElementKind) -> Self {
        let mut style = Style::new();
        let body = match &kind {
            ElementKind::Text => editable("p", "Click to edit text"),
            ElementKind::Heading => editable("h2", "Click to edit heading"),
            ElementKind::Button => editable("button", "Click me"),
            ElementKind::Link => editable("a", "Click here"),
            ElementKind::Image => markup(IMAGE_MARKUP),
            ElementKind::List => markup(LIST_MARKUP),
            ElementKind::Form => markup(FORM_MARKUP),
            ElementKind::Container => {
                style.set("min-height", "100px");
                style.set("border", "2px dashed #ccc");
                style.set("padding", "20px");
                ElementBody::Empty
            }
            ElementKind::Other(_) => ElementBody::Empty,
        };
        Self { kind, body, style }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.body, ElementBody::Editable { .. })
    }

    /// Inline text of an editable element.
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            ElementBody::Editable { text, .. } => Some(text),
            _ => None,
        }
    }
}

fn editable(tag: &str, text: &str) -> ElementBody {
    ElementBody::Editable {
        tag: tag.to_string(),
        text: text.to_string(),
    }
}

fn markup(html: &str) -> ElementBody {
    ElementBody::Markup {
        html: html.to_string(),
    }
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub(crate) fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_roundtrip() {
        for kind in ElementKind::KNOWN {
            assert_eq!(ElementKind::parse(kind.as_str()), kind);
            assert!(kind.is_known());
        }
        let other = ElementKind::parse("carousel");
        assert_eq!(other, ElementKind::Other("carousel".into()));
        assert_eq!(other.as_str(), "carousel");
        assert!(!other.is_known());
    }

    #[test]
    fn test_kind_serializes_as_string() {
        let json = serde_json::to_string(&ElementKind::Heading).unwrap();
        assert_eq!(json, "\"heading\"");
        let kind: ElementKind = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(kind, ElementKind::Other("video".into()));
    }

    #[test]
    fn test_default_bodies() {
        assert_eq!(Element::create(ElementKind::Text).text(), Some("Click to edit text"));
        assert_eq!(
            Element::create(ElementKind::Heading).text(),
            Some("Click to edit heading")
        );
        assert_eq!(Element::create(ElementKind::Button).text(), Some("Click me"));
        assert_eq!(Element::create(ElementKind::Link).text(), Some("Click here"));
        assert!(!Element::create(ElementKind::Image).is_editable());
        assert!(!Element::create(ElementKind::Form).is_editable());
    }

    #[test]
    fn test_container_default_style() {
        let el = Element::create(ElementKind::Container);
        assert_eq!(el.body, ElementBody::Empty);
        assert_eq!(el.style.get("min-height"), Some("100px"));
        assert_eq!(el.style.get("border"), Some("2px dashed #ccc"));
        assert_eq!(el.style.get("padding"), Some("20px"));
    }

    #[test]
    fn test_unknown_kind_is_empty_container() {
        let el = Element::create(ElementKind::parse("marquee"));
        assert_eq!(el.kind.as_str(), "marquee");
        assert_eq!(el.body, ElementBody::Empty);
        assert!(el.style.is_empty());
    }

    #[test]
    fn test_style_set_replaces_in_place() {
        let mut style = Style::new();
        style.set("width", "10px");
        style.set("color", "red");
        style.set("Width", "20px");
        assert_eq!(style.len(), 2);
        assert_eq!(style.to_css(), "width: 20px; color: red;");
    }

    #[test]
    fn test_style_set_ignores_values_that_leave_the_declaration() {
        let mut style = Style::new();
        assert!(style.set("width", "  10px "));
        assert!(!style.set("width", "20px; background: red"));
        assert!(!style.set("height", "   "));
        assert_eq!(style.get("width"), Some("10px"));
        assert_eq!(style.get("background"), None);
        assert_eq!(style.to_css(), "width: 10px;");
    }

    #[test]
    fn test_style_parse() {
        let style = Style::parse("width: 50%; border: 1px solid #ccc;;bogus; ");
        assert_eq!(style.get("width"), Some("50%"));
        assert_eq!(style.get("border"), Some("1px solid #ccc"));
        assert_eq!(style.len(), 2);
    }

    #[test]
    fn test_escape_roundtrip() {
        let raw = r#"Tom & "Jerry" <b>"#;
        assert_eq!(unescape_html(&escape_html(raw)), raw);
    }
}
