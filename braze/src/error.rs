use std::path::PathBuf;

use thiserror::Error;

/// The primary error type that can be produced by braze.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration:\n{}", .0.join("\n"))]
    InvalidConfig(Vec<String>),
    #[error("failed to load config file {0}")]
    FailedToLoadConfig(PathBuf),
    #[error("I/O error {0}: {1}")]
    Io(PathBuf, std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse file pattern \"{0}\": {1}")]
    FilePattern(String, glob::PatternError),
    #[error("file discovery failed: {0}")]
    Discovery(#[from] glob::GlobError),
    #[error("cannot extract file name from path: {0}")]
    CannotExtractFileName(PathBuf),
    #[error("failed to load component {0}")]
    FailedToLoadComponent(PathBuf),
    #[error("failed to load page {0}")]
    FailedToLoadPage(PathBuf),
    #[error("failed to render page \"{0}\": {1}")]
    TemplateRender(String, handlebars::RenderError),
    #[error("compilation task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
