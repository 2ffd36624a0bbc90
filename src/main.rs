//! Binary entry point: resolve configuration, start logging, load the
//! catalog, and drive the Ratatui event loop until the user exits.
use anyhow::Context;
use book_catalog::config::{Cli, Config};
use book_catalog::{logging, run_app, App, BookStore};
use clap::Parser;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let config = Config::from_cli(Cli::parse())?;
    logging::init(&config)?;
    info!(data_file = %config.data_file.display(), "starting book catalog");

    let store = BookStore::open(&config.data_file)
        .with_context(|| format!("failed to open catalog {}", config.data_file.display()))?;

    let mut app = App::new(store);
    run_app(&mut app)
}
