//! Markup generation and standalone-document export.

use std::fmt::Write;

use crate::element::{escape_html, Element, ElementBody};
use crate::store::CanvasState;

pub const PLACEHOLDER_MARKUP: &str = concat!(
    r#"<div class="canvas-placeholder">"#,
    r#"<i class="fas fa-mouse-pointer"></i>"#,
    "<p>Drag components here to start building your website</p>",
    "</div>",
);

pub const REMOVE_CONTROL_MARKUP: &str = r#"<div class="element-controls">×</div>"#;

const GENERATED_CSS: &str = r#"
/* Generated CSS */
body {
    font-family: Arial, sans-serif;
    margin: 0;
    padding: 20px;
    background-color: #f5f5f5;
}

.canvas-element {
    margin: 10px 0;
}

/* Add your custom styles here */
"#;

const GENERATED_JS: &str = r#"
// Generated JavaScript
console.log('Website loaded successfully!');

// Add your custom JavaScript here
"#;

/// Markup of the canvas exactly as it is displayed, selection marker included.
pub fn generate_html(state: &CanvasState, selected: Option<usize>) -> String {
    let mut out = String::new();
    if state.placeholder {
        out.push_str(PLACEHOLDER_MARKUP);
    }
    for (index, element) in state.elements.iter().enumerate() {
        // Writing into a String cannot fail
        let _ = write_element(&mut out, element, selected == Some(index));
    }
    out
}

fn write_element(out: &mut String, element: &Element, selected: bool) -> std::fmt::Result {
    let class = if selected {
        "canvas-element selected"
    } else {
        "canvas-element"
    };
    write!(
        out,
        r#"<div class="{class}" data-type="{}""#,
        escape_html(element.kind.as_str())
    )?;
    if !element.style.is_empty() {
        write!(out, r#" style="{}""#, escape_html(&element.style.to_css()))?;
    }
    out.push('>');

    match &element.body {
        ElementBody::Editable { tag, text } => {
            let href = if tag == "a" { r##" href="#""## } else { "" };
            write!(
                out,
                r#"<{tag}{href} contenteditable="true">{}</{tag}>"#,
                escape_html(text)
            )?;
        }
        ElementBody::Markup { html } => out.push_str(html),
        ElementBody::Empty => {}
    }

    out.push_str(REMOVE_CONTROL_MARKUP);
    out.push_str("</div>");
    Ok(())
}

/// Boilerplate stylesheet. Independent of canvas content.
pub fn generate_css() -> &'static str {
    GENERATED_CSS
}

/// Boilerplate script. Independent of canvas content.
pub fn generate_js() -> &'static str {
    GENERATED_JS
}

/// Wrap markup, stylesheet and script into one static document.
pub fn export_document(html: &str, css: &str, js: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>My Website</title>
    <style>
{css}
    </style>
</head>
<body>
{html}
    <script>
{js}
    </script>
</body>
</html>"#
    )
}
