mod cli;

use anyhow::Result;
use tracing_subscriber::{registry::Registry, prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

use crate::cli::CLI;

fn main() -> Result<()> {
    let subscriber = Registry::default()
        .with(EnvFilter::from_default_env())
        .with(HierarchicalLayer::new(2));
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = CLI::init()?;
    let mut console = btools::global();

    cli.run(&mut console)
}
