//! `init` command: a starter project directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::json;
use tracing::debug;

use web_builder_core::project::validate_project_name;

fn package_json(name: &str) -> anyhow::Result<String> {
    let manifest = json!({
        "name": name,
        "version": "1.0.0",
        "description": "Project created with Visual Web Builder",
        "main": "index.html",
        "scripts": {
            "start": "visual-web-builder start",
            "build": "visual-web-builder build"
        }
    });
    Ok(serde_json::to_string_pretty(&manifest)?)
}

fn index_html(name: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{name}</title>
    <link rel="stylesheet" href="style.css">
</head>
<body>
    <h1>Welcome to {name}</h1>
    <p>This project was created with Visual Web Builder</p>
    <script src="script.js"></script>
</body>
</html>"#
    )
}

fn style_css(name: &str) -> String {
    format!(
        r#"/* {name} Styles */
body {{
    font-family: Arial, sans-serif;
    margin: 0;
    padding: 20px;
    background-color: #f5f5f5;
}}

h1 {{
    color: #333;
    text-align: center;
}}"#
    )
}

fn script_js(name: &str) -> String {
    format!("// {name} JavaScript\nconsole.log('{name} loaded successfully!');")
}

/// Create `<parent>/<name>/` with the starter files. Fails if it already exists.
pub fn init_project(parent: &Path, name: &str) -> anyhow::Result<PathBuf> {
    validate_project_name(name)?;

    let dir = parent.join(name);
    if dir.exists() {
        anyhow::bail!("Directory {name} already exists!");
    }
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let files = [
        ("package.json", package_json(name)?),
        ("index.html", index_html(name)),
        ("style.css", style_css(name)),
        ("script.js", script_js(name)),
    ];
    for (file, contents) in files {
        let path = dir.join(file);
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(file = %path.display(), "Created");
    }

    Ok(dir)
}
