//! creview - render mustache-style creatives against JSON data.

mod cli;
mod config;
mod data;
mod error;
mod locator;
mod logger;
mod preview;
mod render;
mod serve;
mod template;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::Config;
use locator::Resolver;
use render::render_to_stdout;
use serve::serve_preview;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config: &'static Config = Box::leak(Box::new(Config::load(&cli)?));
    let resolver: &'static Resolver = Box::leak(Box::new(Resolver::new(&config.fetch)?));

    if cli.serve {
        serve_preview(config, resolver)
    } else {
        render_to_stdout(config, resolver)
    }
}
