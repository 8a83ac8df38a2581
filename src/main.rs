//! Product inventory service
//!
//! Reads `DATABASE_URL`, `HOST` and `PORT` (plus an optional YAML file named by
//! `PRODUCT_INVENTORY_CONFIG`), prepares the SQLite store and serves the REST API.

use anyhow::Result;
use product_inventory::config::ServiceConfig;
use product_inventory::server::ServerBuilder;
use product_inventory::storage::{SqliteGateway, SqliteProductService};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("product_inventory=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServiceConfig::from_env()?;
    config.store.ensure_parent_dir()?;

    let gateway = SqliteGateway::connect(&config.store)?;
    gateway.ensure_schema().await?;
    tracing::info!(store = config.store.path(), "product store ready");

    ServerBuilder::new()
        .with_store(SqliteProductService::new(gateway))
        .serve(&config.server.socket_addr())
        .await
}
