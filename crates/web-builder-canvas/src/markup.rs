//! Reads canvas markup (as produced by [`crate::export::generate_html`] and
//! saved in a project's `index.html`) back into elements.
//!
//! Only top-level `div.canvas-element` wrappers are recognised; anything else
//! at the top level, such as the placeholder, is skipped. Element bodies
//! that are not a single editable tag are kept as opaque markup.

use std::sync::OnceLock;

use regex::Regex;

use crate::element::{unescape_html, Element, ElementBody, ElementKind, Style};
use crate::export::REMOVE_CONTROL_MARKUP;
use crate::store::CanvasState;

const EDITABLE_TAGS: [&str; 4] = ["p", "h2", "button", "a"];

fn div_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<(/?)div\b([^>]*)>").expect("static regex"))
}

fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"([a-zA-Z][a-zA-Z0-9-]*)\s*=\s*"([^"]*)""#).expect("static regex"))
}

fn editable_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)^\s*<([a-z0-9]+)\b[^>]*\bcontenteditable="true"[^>]*>(.*?)</([a-z0-9]+)>\s*$"#)
            .expect("static regex")
    })
}

/// A top-level `<div ...>...</div>` block.
struct Block<'a> {
    attrs: &'a str,
    inner: &'a str,
}

/// Split markup into its top-level div blocks by counting div nesting.
fn top_level_divs(html: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut open: Option<(&str, usize)> = None;

    for caps in div_tag_re().captures_iter(html) {
        let whole = caps.get(0).expect("group 0 always present");
        let closing = !caps[1].is_empty();

        if !closing {
            if depth == 0 {
                let attrs = caps.get(2).map_or("", |m| m.as_str());
                open = Some((attrs, whole.end()));
            }
            depth += 1;
        } else if depth > 0 {
            depth -= 1;
            if depth == 0 {
                if let Some((attrs, start)) = open.take() {
                    blocks.push(Block {
                        attrs,
                        inner: &html[start..whole.start()],
                    });
                }
            }
        }
    }
    blocks
}

fn attribute<'a>(attrs: &'a str, name: &str) -> Option<&'a str> {
    attr_re()
        .captures_iter(attrs)
        .find(|c| c[1].eq_ignore_ascii_case(name))
        .and_then(|c| c.get(2))
        .map(|m| m.as_str())
}

fn read_body(inner: &str) -> ElementBody {
    let inner = inner.replace(REMOVE_CONTROL_MARKUP, "");
    let trimmed = inner.trim();
    if trimmed.is_empty() {
        return ElementBody::Empty;
    }

    if let Some(caps) = editable_re().captures(trimmed) {
        let (open, text, close) = (&caps[1], &caps[2], &caps[3]);
        let tag = open.to_ascii_lowercase();
        if tag == close.to_ascii_lowercase()
            && EDITABLE_TAGS.contains(&tag.as_str())
            && !text.contains('<')
        {
            return ElementBody::Editable {
                tag,
                text: unescape_html(text),
            };
        }
    }

    ElementBody::Markup {
        html: trimmed.to_string(),
    }
}

/// Read canvas markup into a canvas state.
pub fn read_canvas(html: &str) -> CanvasState {
    let mut elements = Vec::new();
    let mut saw_placeholder = false;

    for block in top_level_divs(html) {
        let classes = attribute(block.attrs, "class").unwrap_or("");
        let mut classes = classes.split_whitespace();
        if classes.clone().any(|c| c == "canvas-placeholder") {
            saw_placeholder = true;
            continue;
        }
        if !classes.any(|c| c == "canvas-element") {
            continue;
        }

        let kind = ElementKind::parse(&unescape_html(
            attribute(block.attrs, "data-type").unwrap_or(""),
        ));
        let style = attribute(block.attrs, "style")
            .map(|s| Style::parse(&unescape_html(s)))
            .unwrap_or_default();

        elements.push(Element {
            kind,
            body: read_body(block.inner),
            style,
        });
    }

    CanvasState {
        placeholder: elements.is_empty() && saw_placeholder,
        elements,
    }
}
