//! Service entrypoint: configuration, dataset load, serve

use anyhow::Result;
use salespulse::config::AppConfig;
use salespulse::server::AppState;
use salespulse::store::{InMemoryTransactionStore, TransactionStore};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn TransactionStore> = Arc::new(InMemoryTransactionStore::new());

    if let Some(path) = &config.dataset {
        tracing::info!("Loading dataset from {}", path.display());
        let inserted = salespulse::loader::load_csv(&store, path).await?;
        tracing::info!("{} transactions ready", inserted);
    } else {
        tracing::warn!("DATASET_PATH not set; serving an empty collection");
    }

    salespulse::server::serve(AppState::new(store), &config.addr()).await
}
