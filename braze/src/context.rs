//! Compilation orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use eyre::Result;
use handlebars::{Handlebars, HelperDef};
use log::debug;
use tokio::task::JoinHandle;

use crate::{component, fs, render, Config, Error};

/// Counts of the files materialized by a compilation run.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompileStats {
    pub pages_rendered: u64,
    pub assets_copied: u64,
}

/// Execution context for a braze compilation run.
///
/// Each context owns its own template engine, so helper registrations never
/// touch process-wide state and repeated or concurrent runs cannot interfere
/// with one another.
pub struct Context {
    config: Config,
    hb: Handlebars<'static>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Context {
    /// Constructor. Rejects configurations with missing required fields
    /// before any file I/O occurs, reporting every problem found.
    pub fn new(config: Config) -> Result<Self> {
        let problems = config.validate();
        if !problems.is_empty() {
            return Err(Error::InvalidConfig(problems).into());
        }
        let mut hb = Handlebars::new();
        // Component fragments are trusted pre-rendered HTML; escaping them
        // again would corrupt the markup.
        hb.register_escape_fn(handlebars::no_escape);
        Ok(Self { config, hb })
    }

    /// Load configuration from the given JSON file and build a context from
    /// it.
    pub fn load<P: AsRef<Path>>(config_file: P) -> Result<Self> {
        Self::new(Config::load_from_file(config_file)?)
    }

    /// The validated configuration for this run.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers a named helper, callable from any page template.
    pub fn register_helper(&mut self, name: &str, helper: Box<dyn HelperDef + Send + Sync>) {
        debug!("Registering helper {}", name);
        self.hb.register_helper(name, helper);
    }

    /// Compiles the configured site: clears and recreates the output
    /// directory, loads components, then renders every page and copies every
    /// non-page asset as independent concurrent tasks.
    ///
    /// All tasks are awaited before the first observed failure (if any) is
    /// reported, and writes that already completed are not rolled back.
    pub async fn compile(self) -> Result<CompileStats> {
        let config = Arc::new(self.config);

        // The output tree is cleared exactly once per run, before any write.
        fs::ensure_dir(Path::new(&config.output_dir), true).await?;

        let components = component::load_components(config.components_dir.as_deref()).await?;
        let (pages, assets) = discover_inputs(&config.pages_dir)?;
        debug!(
            "Discovered {} pages and {} assets under {}",
            pages.len(),
            assets.len(),
            config.pages_dir
        );

        // Props override same-named components.
        let mut context = components;
        for (key, value) in &config.props {
            context.insert(key.clone(), value.clone());
        }
        let context = Arc::new(context);
        let hb = Arc::new(self.hb);

        let mut page_tasks: Vec<JoinHandle<Result<PathBuf>>> = Vec::with_capacity(pages.len());
        for page in pages {
            let config = Arc::clone(&config);
            let hb = Arc::clone(&hb);
            let context = Arc::clone(&context);
            page_tasks.push(tokio::spawn(async move {
                render::render_page(&config, &hb, &context, &page).await
            }));
        }
        let mut asset_tasks: Vec<JoinHandle<Result<PathBuf>>> = Vec::with_capacity(assets.len());
        for asset in assets {
            let config = Arc::clone(&config);
            asset_tasks.push(tokio::spawn(
                async move { render::copy_asset(&config, &asset).await },
            ));
        }

        let mut stats = CompileStats::default();
        let mut first_failure: Option<eyre::Report> = None;
        for task in page_tasks {
            match join_task(task).await {
                Ok(_) => stats.pages_rendered += 1,
                Err(e) => {
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }
        for task in asset_tasks {
            match join_task(task).await {
                Ok(_) => stats.assets_copied += 1,
                Err(e) => {
                    if first_failure.is_none() {
                        first_failure = Some(e);
                    }
                }
            }
        }
        match first_failure {
            Some(e) => Err(e),
            None => Ok(stats),
        }
    }
}

async fn join_task(task: JoinHandle<Result<PathBuf>>) -> Result<PathBuf> {
    match task.await {
        Ok(result) => result,
        Err(e) => Err(Error::Join(e).into()),
    }
}

// Page templates are the `.html` files under the pages root; everything else
// passes through as an asset.
fn discover_inputs(pages_dir: &str) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut pages = Vec::new();
    let mut assets = Vec::new();
    for path in fs::find_files(&format!("{}/**/*", pages_dir))? {
        if !path.is_file() {
            continue;
        }
        if path.extension().map_or(false, |ext| ext == "html") {
            pages.push(path);
        } else {
            assets.push(path);
        }
    }
    Ok((pages, assets))
}
