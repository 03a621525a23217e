//! Orbweaver main entry point
//!
//! One binary, four roles: the frontier service, the crawl worker, the
//! search API, and a seeding helper that pushes start URLs into a running
//! frontier.

use anyhow::Context;
use clap::{Parser, Subcommand};
use orbweaver::api;
use orbweaver::config::{default_config, load_config_with_hash, Config};
use orbweaver::crawler::{build_http_client, Worker};
use orbweaver::frontier::{self, Frontier, FrontierClient};
use orbweaver::index::MemoryIndex;
use orbweaver::storage::LocalStore;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

/// Orbweaver: a distributed web crawler
///
/// A frontier service hands out batches of URLs to any number of crawl
/// workers; workers respect robots.txt, feed documents to the index and
/// local storage, and push discovered links back to the frontier.
#[derive(Parser, Debug)]
#[command(name = "orbweaver")]
#[command(version)]
#[command(about = "A distributed web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the frontier queue service
    Frontier,

    /// Run a crawl worker
    Worker,

    /// Run the search API over previously stored documents
    Search,

    /// Add seed URLs to a running frontier
    Seed {
        /// URLs to enqueue
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(cli.config.as_deref())?;

    match cli.command {
        Command::Frontier => run_frontier(config).await,
        Command::Worker => run_worker(config).await,
        Command::Search => run_search(config).await,
        Command::Seed { urls } => run_seed(config, urls).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("orbweaver=info,warn"),
            1 => EnvFilter::new("orbweaver=debug,info"),
            2 => EnvFilter::new("orbweaver=trace,debug"),
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

/// Loads the configuration file when given, the built-in defaults
/// otherwise. The file's hash is logged so a crawl can be tied back to
/// the exact configuration it ran with.
fn load_configuration(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            tracing::info!(
                "Configuration loaded from {} (hash: {})",
                path.display(),
                hash
            );
            Ok(config)
        }
        None => {
            tracing::info!("No config file given, using built-in defaults");
            Ok(default_config()?)
        }
    }
}

/// Resolves a future when ctrl-c is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

/// Handles the `frontier` subcommand: serve the shared queue.
async fn run_frontier(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = config
        .frontier
        .listen_addr
        .parse()
        .context("invalid frontier listen address")?;

    let queue = Arc::new(Frontier::new());
    frontier::service::serve(addr, queue, shutdown_signal())
        .await
        .context("frontier service failed")?;

    Ok(())
}

/// Handles the `worker` subcommand: run the crawl loop until ctrl-c.
async fn run_worker(config: Config) -> anyhow::Result<()> {
    let store = Arc::new(
        LocalStore::new(&config.storage.data_dir).context("failed to initialize local storage")?,
    );
    let index = Arc::new(MemoryIndex::new());

    let worker = Worker::new(&config, index, store).context("failed to build worker")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutting down worker...");
        let _ = shutdown_tx.send(true);
    });

    worker.run(shutdown_rx).await;
    Ok(())
}

/// Handles the `search` subcommand: index stored documents and serve
/// substring search over them.
async fn run_search(config: Config) -> anyhow::Result<()> {
    let addr: SocketAddr = config
        .search
        .listen_addr
        .parse()
        .context("invalid search listen address")?;

    let store =
        LocalStore::new(&config.storage.data_dir).context("failed to open local storage")?;
    let index = api::load_index(&store).context("failed to load stored documents")?;

    api::serve(addr, index, shutdown_signal())
        .await
        .context("search API failed")?;

    Ok(())
}

/// Handles the `seed` subcommand: push start URLs to the frontier.
async fn run_seed(config: Config, urls: Vec<String>) -> anyhow::Result<()> {
    let client = build_http_client(&config.user_agent, &config.worker)
        .context("failed to build HTTP client")?;
    let frontier = FrontierClient::new(config.worker.frontier_url.clone(), client);

    frontier
        .add(&urls)
        .await
        .context("failed to add seed URLs to frontier")?;

    tracing::info!("Seeded {} URLs to {}", urls.len(), frontier.base_url());
    Ok(())
}
