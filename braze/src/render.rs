//! Per-file compilation tasks: page rendering and asset pass-through.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use handlebars::Handlebars;
use log::debug;
use serde_json::{Map, Value};

use crate::{fs, paths, Config, Error};

/// Renders a single page template against the shared context and writes the
/// result into the output tree, returning the output path.
///
/// Pages are trusted pre-rendered HTML, so the engine passed in here must
/// have escaping disabled.
pub async fn render_page(
    config: &Config,
    hb: &Handlebars<'_>,
    context: &Map<String, Value>,
    page: &Path,
) -> Result<PathBuf> {
    let raw = fs::read_text(page)
        .await
        .wrap_err_with(|| Error::FailedToLoadPage(page.to_path_buf()))?;
    let raw = if config.minify_output {
        minify_page(&raw)
    } else {
        raw
    };
    let rendered = hb
        .render_template(&raw, context)
        .map_err(|e| Error::TemplateRender(page.display().to_string(), e))?;

    let output_path = paths::source_to_output_path(page, &config.pages_dir, &config.output_dir);
    ensure_parent_dir(&output_path).await?;
    fs::write_text(&output_path, &rendered).await?;
    debug!("Rendered {} -> {}", page.display(), output_path.display());
    Ok(output_path)
}

/// Copies a non-page asset into the output tree unchanged, returning the
/// output path.
pub async fn copy_asset(config: &Config, asset: &Path) -> Result<PathBuf> {
    let output_path = paths::source_to_output_path(asset, &config.pages_dir, &config.output_dir);
    ensure_parent_dir(&output_path).await?;
    fs::copy(asset, &output_path).await?;
    debug!("Copied {} -> {}", asset.display(), output_path.display());
    Ok(output_path)
}

// Sibling tasks may race to create a shared parent directory; creation
// treats "already exists" as success.
async fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::ensure_dir(parent, false).await,
        _ => Ok(()),
    }
}

fn minify_page(raw: &str) -> String {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.keep_comments = false;
    cfg.minify_css = true;
    cfg.minify_js = true;
    String::from_utf8_lossy(&minify_html::minify(raw.as_bytes(), &cfg)).into_owned()
}
