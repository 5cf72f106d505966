//! sdl-docset main entry point
//!
//! This is the command-line interface for the SDL docset builder.

use anyhow::Context;
use clap::Parser;
use sdl_docset::config::{load_config_or_default, validate, Config};
use sdl_docset::crawler::build_docset;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// sdl-docset: builds an offline docset from the SDL wiki
///
/// Downloads every API page listed on the wiki, indexes it and rewrites the
/// wiki links so the bundle can be browsed without a network connection.
#[derive(Parser, Debug)]
#[command(name = "sdl-docset")]
#[command(version)]
#[command(about = "Builds an offline docset from the SDL wiki", long_about = None)]
struct Cli {
    /// Wait between requests in seconds (surge protection is harsh)
    #[arg(short, long, value_name = "SECONDS")]
    wait: Option<u64>,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Docset directory to build (e.g. SDL2.docset)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;

    tracing::info!(
        "Building {} from {} (wait {}s)",
        config.docset.output_dir,
        config.source.base_url,
        config.crawler.wait_secs
    );

    let report = build_docset(&config).await.context("Build failed")?;

    tracing::info!(
        "Build completed: {} symbols, {} categories, {} links rewritten",
        report.catalog.symbols,
        report.catalog.categories,
        report.relink.links_rewritten
    );

    Ok(())
}

/// Loads the configuration and applies the command-line overrides
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }

    let mut config = load_config_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(wait) = cli.wait {
        config.crawler.wait_secs = wait;
    }
    if let Some(output) = &cli.output {
        config.docset.output_dir = output.to_string_lossy().into_owned();
    }

    validate(&config).context("Invalid command-line override")?;

    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sdl_docset=info,warn"),
            1 => EnvFilter::new("sdl_docset=debug,info"),
            2 => EnvFilter::new("sdl_docset=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
