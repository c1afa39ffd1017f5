//! Configuration-related functionality for braze.

use std::fs;
use std::path::Path;

use eyre::{Result, WrapErr};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Error;

/// Compilation configuration, conventionally read from a `braze.json` file
/// in the invocation directory.
///
/// Helper functions are not part of the configuration file. They are live
/// values and are registered through
/// [`Context::register_helper`](crate::Context::register_helper) instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Root directory of the page templates to compile.
    pub pages_dir: String,
    /// Root directory into which compiled output is written.
    pub output_dir: String,
    /// Optional root directory of reusable component fragments.
    pub components_dir: Option<String>,
    /// Static properties merged into every page's render context. Entries
    /// override same-named components.
    pub props: Map<String, Value>,
    /// Whether page text is minified before rendering.
    pub minify_output: bool,
}

impl Config {
    /// Load configuration from the given JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Io(path.to_path_buf(), e))
            .wrap_err_with(|| Error::FailedToLoadConfig(path.to_path_buf()))?;
        let config = serde_json::from_str::<Self>(&content)
            .map_err(Error::Json)
            .wrap_err_with(|| Error::FailedToLoadConfig(path.to_path_buf()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Checks that all required fields are present, returning one message
    /// per problem found.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.pages_dir.is_empty() {
            problems.push("no pagesDir property found in configuration".to_string());
        }
        if self.output_dir.is_empty() {
            problems.push("no outputDir property found in configuration".to_string());
        }
        problems
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn deserializes_camel_case_fields() {
        let config = serde_json::from_str::<Config>(
            r#"{
                "pagesDir": "./pages",
                "outputDir": "./dist",
                "componentsDir": "./components",
                "props": {"people": ["John", "Sam", "Alex"]},
                "minifyOutput": true
            }"#,
        )
        .unwrap();
        assert_eq!(config.pages_dir, "./pages");
        assert_eq!(config.output_dir, "./dist");
        assert_eq!(config.components_dir.as_deref(), Some("./components"));
        assert!(config.minify_output);
        assert_eq!(
            config.props.get("people").unwrap(),
            &serde_json::json!(["John", "Sam", "Alex"])
        );
    }

    #[test]
    fn optional_fields_default() {
        let config =
            serde_json::from_str::<Config>(r#"{"pagesDir": "p", "outputDir": "o"}"#).unwrap();
        assert!(config.components_dir.is_none());
        assert!(config.props.is_empty());
        assert!(!config.minify_output);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn validation_reports_each_missing_field() {
        let problems = Config::default().validate();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("pagesDir"));
        assert!(problems[1].contains("outputDir"));
    }
}
