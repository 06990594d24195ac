//! Command-line inspector for the Wayfinder location graph.
//!
//! Loads a configuration and a world snapshot, builds the context store
//! once, and prints what the chosen command asks for. Without `--world` it
//! inspects the built-in sample valley.
//!
//! Logs go to stderr so stdout stays machine-readable. `RUST_LOG`
//! overrides the configured level.

mod cli;
mod commands;
mod world;

use anyhow::Context as _;
use clap::Parser as _;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wayfinder_core::config::LoggingConfig;
use wayfinder_core::{LocationGraph, TopologyEvent, WayfinderConfig};
use wayfinder_graph::sample_world;

use crate::cli::Args;

/// Application entry point.
///
/// Parses arguments, loads configuration, initializes logging, builds the
/// graph and prints the command output.
///
/// # Errors
///
/// Returns an error if the configuration or the world file is invalid, or
/// if the rebuild fails. Bad arguments exit through `clap`.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match args.config.as_deref() {
        Some(path) => WayfinderConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WayfinderConfig::parse("")?,
    };

    init_logging(&config.logging);
    info!(
        max_depth = config.graph.max_depth,
        overrides = config.warp_overrides.len(),
        "configuration loaded"
    );

    let world = match args.world.as_deref() {
        Some(path) => world::load_world(path)
            .with_context(|| format!("loading world {}", path.display()))?,
        None => {
            info!("no world file given, using the sample valley");
            sample_world()
        }
    };

    let mut graph = LocationGraph::new(config.resolver_settings());
    graph.handle(&TopologyEvent::SaveLoaded, &world)?;

    let output = commands::execute(&args.selected_command(), &graph)?;
    println!("{output}");
    Ok(())
}

/// Install the global `tracing` subscriber.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
