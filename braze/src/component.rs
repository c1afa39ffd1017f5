//! Loading of reusable component fragments.
//!
//! Components are plain HTML files. Each one becomes an entry in the shared
//! render context under a name derived from its file name, so a page can
//! pull in `components/nav.html` with `{{nav}}`.

use std::path::PathBuf;

use eyre::{Result, WrapErr};
use log::{debug, warn};
use serde_json::{Map, Value};

use crate::{fs, paths, Error};

/// Loads every `*.html` fragment under the given directory into a
/// name-to-content mapping.
///
/// All fragments are read concurrently, and any single failure fails the
/// whole load. Returns an empty mapping when no directory is configured or
/// nothing matches. Duplicate names resolve deterministically: fragments are
/// folded into the mapping in discovery (sorted) order, so the last one in
/// that order wins.
pub async fn load_components(components_dir: Option<&str>) -> Result<Map<String, Value>> {
    let dir = match components_dir {
        Some(dir) if !dir.is_empty() => dir,
        _ => return Ok(Map::new()),
    };

    let files = fs::find_files(&format!("{}/**/*.html", dir))?;
    let mut tasks = Vec::with_capacity(files.len());
    for path in files {
        if !path.is_file() {
            continue;
        }
        tasks.push(tokio::spawn(async move {
            let content = fs::read_text(&path)
                .await
                .wrap_err_with(|| Error::FailedToLoadComponent(path.clone()))?;
            Ok::<(PathBuf, String), eyre::Report>((path, content))
        }));
    }

    let mut components = Map::new();
    for task in tasks {
        let (path, content) = task.await.map_err(Error::Join)??;
        let name = paths::component_name(&path)?;
        if components.contains_key(&name) {
            warn!(
                "Duplicate component name \"{}\", overriding with {}",
                name,
                path.display()
            );
        }
        debug!("Loaded component {} from {}", name, path.display());
        components.insert(name, Value::String(clean_fragment(&content)));
    }
    Ok(components)
}

// Only the first newline is removed; the remainder of the fragment is kept
// verbatim apart from surrounding whitespace.
fn clean_fragment(content: &str) -> String {
    content.replacen('\n', "", 1).trim().to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn clean_fragment_strips_only_the_first_newline() {
        assert_eq!(clean_fragment("\nHello {{name}}\n"), "Hello {{name}}");
        assert_eq!(clean_fragment("\nline1\nline2\n"), "line1\nline2");
        assert_eq!(clean_fragment("  <nav/>  "), "<nav/>");
    }

    #[tokio::test]
    async fn loads_fragments_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let components_dir = dir.path().join("components");
        std::fs::create_dir_all(components_dir.join("widgets")).unwrap();
        std::fs::write(components_dir.join("nav.html"), "\nHello {{name}}\n").unwrap();
        std::fs::write(components_dir.join("widgets/footer.html"), "<footer/>").unwrap();

        let components = load_components(components_dir.to_str())
            .await
            .unwrap();
        assert_eq!(components.len(), 2);
        assert_eq!(
            components.get("nav"),
            Some(&Value::String("Hello {{name}}".to_string()))
        );
        assert_eq!(
            components.get("footer"),
            Some(&Value::String("<footer/>".to_string()))
        );
    }

    #[tokio::test]
    async fn unset_directory_yields_an_empty_mapping() {
        assert!(load_components(None).await.unwrap().is_empty());
        assert!(load_components(Some("")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unmatched_directory_yields_an_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let components = load_components(dir.path().join("nowhere").to_str())
            .await
            .unwrap();
        assert!(components.is_empty());
    }

    #[tokio::test]
    async fn duplicate_names_resolve_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        let components_dir = dir.path().join("components");
        std::fs::create_dir_all(components_dir.join("z")).unwrap();
        std::fs::write(components_dir.join("nav.html"), "first").unwrap();
        std::fs::write(components_dir.join("z/nav.html"), "second").unwrap();

        let components = load_components(components_dir.to_str())
            .await
            .unwrap();
        assert_eq!(
            components.get("nav"),
            Some(&Value::String("second".to_string()))
        );
    }
}
