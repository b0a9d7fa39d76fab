use anyhow::{Context, Result};
use clap::Parser;
use spa::NavConfig;
use url::Url;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod cli;
mod driver;

use cli::Cli;
use driver::Driver;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => NavConfig::load(path)?,
        None => NavConfig::default(),
    };
    let start = Url::parse(&cli.url).with_context(|| format!("invalid start url {:?}", cli.url))?;

    let mut driver = Driver::start(start, config)?;
    for action in cli.actions {
        log::info!("action: {action:?}");
        driver.perform(action)?;
    }
    driver.report(cli.outline);
    Ok(())
}
