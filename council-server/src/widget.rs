//! The HTML widget the chat client renders for council results.
//!
//! CSS and JS bundles are read from the assets directory once at startup and
//! inlined into a single document.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

pub const WIDGET_IDENTIFIER: &str = "your-ai-council";
pub const WIDGET_URI: &str = "app://your-ai-council.html";
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";
pub const HTML_ROOT_ID: &str = "your-ai-council-root";

#[derive(Debug, Clone, Default)]
pub struct WidgetAssets {
    pub css: String,
    pub js: String,
}

impl WidgetAssets {
    /// Load `your-ai-council-*.css` and `your-ai-council-*.js` from `dir`.
    /// A missing bundle renders as empty; the server still starts.
    pub fn load(dir: &Path) -> Self {
        let css = load_asset_text(dir, "css").unwrap_or_default();
        let js = load_asset_text(dir, "js").unwrap_or_default();
        info!(
            "Loaded widget assets from {} - CSS: {} bytes, JS: {} bytes",
            dir.display(),
            css.len(),
            js.len()
        );
        Self { css, js }
    }

    pub fn render_html(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Your AI Council</title>
    <style>{css}</style>
  </head>
  <body>
    <div id="{root}"></div>
    <script type="module">{js}</script>
  </body>
</html>"#,
            css = self.css,
            root = HTML_ROOT_ID,
            js = self.js,
        )
    }
}

/// First matching bundle in file-name order, so the pick is deterministic
/// when a build leaves several hashed bundles behind.
fn find_asset(dir: &Path, extension: &str) -> Option<PathBuf> {
    let prefix = format!("{WIDGET_IDENTIFIER}-");
    let suffix = format!(".{extension}");

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read assets directory {}: {}", dir.display(), e);
            return None;
        }
    };

    let mut matches: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&prefix) && name.ends_with(&suffix))
        })
        .collect();
    matches.sort();
    matches.into_iter().next()
}

fn load_asset_text(dir: &Path, extension: &str) -> Option<String> {
    let Some(path) = find_asset(dir, extension) else {
        warn!("No {} bundle found for {}", extension, WIDGET_IDENTIFIER);
        return None;
    };

    match fs::read_to_string(&path) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            None
        }
    }
}
