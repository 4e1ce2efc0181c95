//! Catalog Harvester main entry point
//!
//! This is the command-line interface for the Catalog Harvester.

use anyhow::Context;
use catalog_harvester::config::{load_config_with_hash, validate, Config};
use catalog_harvester::output::print_statistics;
use catalog_harvester::run_harvest;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Catalog Harvester: a storefront catalog extractor
///
/// Discovers every collection of a storefront, walks each collection's
/// paginated listing, reads the product record embedded in every product
/// page and exports the normalized catalog as CSV or JSON.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvester")]
#[command(version = "1.0.0")]
#[command(about = "A storefront catalog extractor", long_about = None)]
struct Cli {
    /// Path to TOML configuration file; built-in defaults are used when omitted
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output file, overriding `[output] path`
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = load(&cli)?;

    if let Some(output) = &cli.output {
        config.output.path = output.to_string_lossy().into_owned();
        validate(&config).context("Invalid output path")?;
    }

    if cli.dry_run {
        handle_dry_run(&config);
    } else {
        handle_harvest(&config).await?;
    }

    Ok(())
}

/// Loads the configuration file, or the built-in defaults without one
fn load(cli: &Cli) -> anyhow::Result<Config> {
    let Some(path) = &cli.config else {
        tracing::info!("No configuration file given, using built-in defaults");
        let config = Config::default();
        validate(&config).context("Built-in configuration is invalid")?;
        return Ok(config);
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e).with_context(|| format!("Could not load {}", path.display()))
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_harvester=info,warn"),
            1 => EnvFilter::new("catalog_harvester=debug,info"),
            2 => EnvFilter::new("catalog_harvester=trace,debug"),
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

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Catalog Harvester Dry Run ===\n");

    println!("Site:");
    println!("  Root URL: {}", config.site.root_url);
    match &config.site.base_url {
        Some(base) => println!("  Base URL: {}", base),
        None => println!("  Base URL: (origin of root URL)"),
    }

    println!("\nCrawler:");
    println!("  Page delay: {}ms", config.crawler.page_delay_ms);
    match config.crawler.timeout_secs {
        Some(secs) => println!("  Timeout: {}s", secs),
        None => println!("  Timeout: transport default"),
    }
    println!("  Deduplicate products: {}", config.crawler.dedupe_products);

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header);

    let selectors = &config.selectors;
    println!("\nSelectors:");
    println!("  Collection tile: {}", selectors.collection_tile);
    println!("  Collection link: {}", selectors.collection_link);
    println!("  Collection title: {}", selectors.collection_title);
    println!("  Product item: {}", selectors.product_item);
    println!("  Product link: {}", selectors.product_link);
    println!("  Category container: {}", selectors.category_container);
    println!("  Category link: {}", selectors.category_link);
    println!("  Record variable: {}", selectors.embedded_record_variable);

    println!("\nOutput:");
    println!("  Path: {}", config.output.path);
    println!("  Format: {:?}", config.output.resolved_format());

    println!("\n✓ Configuration is valid");
    println!("✓ Would start harvesting from {}", config.site.root_url);
}

/// Handles the main harvest operation
async fn handle_harvest(config: &Config) -> anyhow::Result<()> {
    tracing::info!("Harvesting catalog from {}", config.site.root_url);

    match run_harvest(config).await {
        Ok(stats) => {
            tracing::info!("Harvest completed successfully");
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
