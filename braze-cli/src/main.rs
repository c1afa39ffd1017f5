use std::error::Error;
use std::process;

use braze::{CompileStats, Context};
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "braze", about, version)]
struct Args {
    /// Increase output logging verbosity.
    #[clap(short, long)]
    verbose: bool,

    /// Path to the compilation config file.
    #[clap(short, long, default_value = "braze.json")]
    config: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    simple_logger::init_with_level(if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    })
    .unwrap();

    match compile(&args.config).await {
        Ok(stats) => log::info!(
            "Finished compiling: {} page(s), {} asset(s)",
            stats.pages_rendered,
            stats.assets_copied
        ),
        Err(e) => {
            log::error!("Failed: {}", e);
            process::exit(1);
        }
    }
}

async fn compile(config_file: &str) -> Result<CompileStats, Box<dyn Error>> {
    let ctx = Context::load(config_file)?;
    Ok(ctx.compile().await?)
}
