//! Scribe node binary.
//!
//! Boots an in-memory Scribe store and serves JSON-lines requests on stdin,
//! writing one JSON response per line to stdout. Logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `scribe-config.yaml` (or `SCRIBE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Generate sample data and load it into a fresh store
//! 4. Serve requests until stdin closes

mod config;
mod dispatch;
mod error;
mod request;

use std::path::PathBuf;

use anyhow::Context;
use scribe_engine::SharedStore;
use scribe_store::EntityStore;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingConfig, NodeConfig};

/// Environment variable naming the configuration file.
const CONFIG_PATH_ENV: &str = "SCRIBE_CONFIG";

/// Configuration file used when `SCRIBE_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "scribe-config.yaml";

/// Application entry point for the Scribe node.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded, the sample data is
/// rejected, or stdin/stdout fail.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration.
    let (config, config_found) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        config_found,
        users = config.seed.users,
        posts = config.seed.posts,
        comments = config.seed.comments,
        rng_seed = ?config.seed.rng_seed,
        "scribe-node starting"
    );

    // 3. Seed the store.
    let mut store = EntityStore::new();
    let data = scribe_seed::generate(&config.seed);
    let counts =
        scribe_engine::load_seed(&mut store, data).context("sample data was rejected")?;
    info!(
        users = counts.users,
        posts = counts.posts,
        comments = counts.comments,
        "store seeded"
    );
    let shared = SharedStore::new(store);

    // 4. Serve.
    serve(&shared).await?;
    info!("stdin closed, shutting down");
    Ok(())
}

/// Load configuration, falling back to defaults when the file is absent.
///
/// Returns the configuration and whether a file was found.
fn load_config() -> anyhow::Result<(NodeConfig, bool)> {
    let path = std::env::var_os(CONFIG_PATH_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    if path.exists() {
        let config = NodeConfig::from_file(&path)
            .with_context(|| format!("loading {}", path.display()))?;
        Ok((config, true))
    } else {
        let config = NodeConfig::parse("").context("applying environment overrides")?;
        Ok((config, false))
    }
}

/// Install the global tracing subscriber, writing to stderr.
fn init_tracing(logging: &LoggingConfig) {
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

/// Read request lines from stdin and answer each on stdout.
async fn serve(shared: &SharedStore) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let response = dispatch::handle_line(shared, &line).await;
        let mut out = serde_json::to_vec(&response).context("encoding response")?;
        out.push(b'\n');
        stdout.write_all(&out).await.context("writing stdout")?;
        stdout.flush().await.context("flushing stdout")?;
    }
    Ok(())
}
