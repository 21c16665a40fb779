//! Kiln - runs reaction cellular-automaton recipes in a batch.
//!
//! This binary resolves a recipe location to one or more recipe files,
//! executes each against a shared reaction library, and writes a JSON
//! artifact per recipe.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kiln_cli::{run, Cli};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let outcome = match run(&cli) {
        Ok(o) => o,
        Err(e) => {
            error!("batch aborted: {e}");
            std::process::exit(1);
        }
    };

    info!(
        succeeded = outcome.written.len(),
        failed = outcome.failures.len(),
        "batch finished"
    );
    for (recipe, cause) in &outcome.failures {
        error!("{}: {cause}", recipe.display());
    }
    if !outcome.all_succeeded() {
        std::process::exit(1);
    }
}
