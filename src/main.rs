//! linkcrawl main entry point
//!
//! This is the command-line interface for the linkcrawl web crawler.

use clap::Parser;
use linkcrawl::config::{load_config_with_hash, validate, Config, OutputMode};
use linkcrawl::crawler::crawl;
use linkcrawl::output::{build_processor, print_report};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// linkcrawl: a depth-bounded concurrent web crawler
///
/// Starting from one address, linkcrawl fetches pages, follows their links
/// up to a maximum depth and never fetches the same address twice. Every
/// page is either saved as plain text or reported on stdout.
#[derive(Parser, Debug)]
#[command(name = "linkcrawl")]
#[command(version)]
#[command(about = "A depth-bounded concurrent web crawler", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Address to start from
    #[arg(long)]
    start: Option<String>,

    /// Depth of the web crawl (values below 2 are raised to 2)
    #[arg(long)]
    levels: Option<u32>,

    /// Number of fetchers to run concurrently (values below 1 are raised to 1)
    #[arg(long)]
    concurrent_fetchers: Option<usize>,

    /// Keep the fragment part of an URL. Example #top
    #[arg(long)]
    fragment: bool,

    /// Keep the query part of an URL. Example ?foo=bar
    #[arg(long)]
    query: bool,

    /// Do not crawl resources that are stored on another domain
    #[arg(long, value_name = "BOOL")]
    stay_on_domain: Option<bool>,

    /// Where to save crawled resources
    #[arg(long, conflicts_with = "print")]
    save_path: Option<String>,

    /// Only print each page's URL and title instead of saving it
    #[arg(long)]
    print: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Layers command-line flags on top of a loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(start) = &self.start {
            config.crawler.start = start.clone();
        }
        if let Some(levels) = self.levels {
            config.crawler.max_depth = levels;
        }
        if let Some(n) = self.concurrent_fetchers {
            config.crawler.max_concurrent_fetchers = n;
        }
        if self.fragment {
            config.fetcher.keep_fragment = true;
        }
        if self.query {
            config.fetcher.keep_query = true;
        }
        if let Some(stay) = self.stay_on_domain {
            config.fetcher.stay_on_domain = stay;
        }
        if let Some(path) = &self.save_path {
            config.output.save_path = path.clone();
            config.output.mode = OutputMode::Save;
        }
        if self.print {
            config.output.mode = OutputMode::Print;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load configuration, or start from defaults
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            match load_config_with_hash(path) {
                Ok((cfg, hash)) => {
                    tracing::info!("Configuration loaded successfully (hash: {})", hash);
                    cfg
                }
                Err(e) => {
                    tracing::error!("Failed to load configuration: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => Config::default(),
    };

    cli.apply_overrides(&mut config);

    // Validate the merged configuration before any crawl task exists
    if let Err(e) = validate(&config) {
        tracing::error!("Invalid configuration: {}", e);
        return Err(e.into());
    }

    handle_crawl(config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkcrawl=info,warn"),
            1 => EnvFilter::new("linkcrawl=debug,info"),
            2 => EnvFilter::new("linkcrawl=trace,debug"),
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

/// Handles the main crawl operation
async fn handle_crawl(config: Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Depth: {}, concurrent fetchers: {}, stay on domain: {}",
        config.effective_depth(),
        config.effective_concurrency(),
        config.fetcher.stay_on_domain
    );
    if config.output.mode == OutputMode::Save {
        tracing::info!("Saving pages to {}", config.output.save_path);
    }

    let processor = build_processor(&config.output);

    match crawl(&config, processor).await {
        Ok(report) => {
            if !quiet {
                print_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
