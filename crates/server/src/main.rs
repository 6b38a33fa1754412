//! Helios Query Sorter server
//!
//! Serves sorted, paginated listings of JSON documents and remembers each
//! visitor's sort choice per listing.

use std::collections::BTreeMap;

use anyhow::Context;
use clap::Parser;
use helios_sorter::repository::InMemoryRepository;
use helios_sorter_rest::{ServerConfig, create_app_with_config, init_logging};
use serde_json::Value;
use tracing::{info, warn};

/// Builds the repository, indexing the data file if one is configured.
fn create_repository(config: &ServerConfig) -> anyhow::Result<InMemoryRepository> {
    let Some(path) = config.data_file.as_deref() else {
        warn!("No data file configured, starting with an empty repository");
        return Ok(InMemoryRepository::new());
    };

    info!(data_file = %path, "Loading documents");
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read data file {}", path))?;
    seed_repository(&raw).with_context(|| format!("Failed to load data file {}", path))
}

/// Indexes a JSON object mapping collection names to arrays of documents.
fn seed_repository(raw: &str) -> anyhow::Result<InMemoryRepository> {
    let collections: BTreeMap<String, Vec<Value>> = serde_json::from_str(raw)?;

    let repository = InMemoryRepository::new();
    for (collection, documents) in collections {
        let count = documents.len();
        repository
            .insert_all(&collection, documents)
            .with_context(|| format!("Invalid document in collection {}", collection))?;
        info!(collection = %collection, documents = count, "Indexed collection");
    }

    Ok(repository)
}

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        item_per_page = config.item_per_page,
        "Starting Helios Query Sorter server"
    );

    let repository = create_repository(&config)?;
    let app = create_app_with_config(repository, config.clone());
    serve(app, &config).await
}
