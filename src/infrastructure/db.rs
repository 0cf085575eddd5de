pub mod guarded;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use crate::{
    errors::AppError,
    repositories::document_store::SharedStore,
    settings::{AppConfig, StoreBackend},
};

use guarded::{GuardedStore, StorePolicy};
use memory::MemoryDocumentStore;
use postgres::PgDocumentStore;

/// Builds the configured backend behind the timeout/retry guard.
pub async fn open_store(config: &AppConfig) -> Result<SharedStore, AppError> {
    let policy = StorePolicy::from_config(config)?;

    let store: SharedStore = match config.store_backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory document store");
            Arc::new(GuardedStore::new(MemoryDocumentStore::new(), policy))
        }
        StoreBackend::Postgres => {
            tracing::info!("Using Postgres document store");
            let pg = PgDocumentStore::connect(&config.database_url).await?;
            Arc::new(GuardedStore::new(pg, policy))
        }
    };

    Ok(store)
}
