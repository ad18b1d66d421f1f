//! Key-value storage and first-run seeding
//!
//! Every logical record lives under one key as JSON text. Backends only need
//! single-key atomic replace; nothing spans keys.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::config::{StorageBackend, StorageConfig};
use async_trait::async_trait;
use chrono::NaiveDate;
use slimplan_shared::reference::{initial_plan, initial_progress, initial_settings};
use thiserror::Error;
use tracing::{debug, error, info};

/// Storage key names, shared with the mobile app's stored data
pub mod keys {
    pub const WEIGHT_LOSS_PLAN: &str = "weightLossPlan";
    pub const USER_PROGRESS: &str = "userProgress";
    pub const SETTINGS: &str = "settings";
    pub const MEASUREMENT_RECORDS: &str = "measurementRecords";
    pub const CHECK_IN_RECORDS: &str = "checkInRecords";
    pub const IS_INITIALIZED: &str = "isInitialized";

    pub const ALL: &[&str] = &[
        WEIGHT_LOSS_PLAN,
        USER_PROGRESS,
        SETTINGS,
        MEASUREMENT_RECORDS,
        CHECK_IN_RECORDS,
        IS_INITIALIZED,
    ];
}

/// Storage layer errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Asynchronous string key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value for `key`, or `None` when the key was never written
    async fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value for `key`
    async fn set_item(&self, key: &str, value: String) -> StoreResult<()>;

    async fn remove_item(&self, key: &str) -> StoreResult<()>;

    /// Remove every key
    async fn clear(&self) -> StoreResult<()>;
}

/// Open the backend selected in configuration
pub fn open(config: &StorageConfig) -> Box<dyn KeyValueStore> {
    match config.backend {
        StorageBackend::File => {
            info!(data_dir = %config.data_dir.display(), "Using file storage");
            Box::new(FileStore::new(&config.data_dir))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage, data will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

/// Whether first-run seeding has happened
pub async fn is_initialized(store: &dyn KeyValueStore) -> StoreResult<bool> {
    Ok(store.get_item(keys::IS_INITIALIZED).await?.is_some())
}

/// Seed the store on first run.
///
/// Writes the plan, progress, settings and two empty lists, then sets the
/// initialization flag. Does nothing when the flag is already present.
/// Returns whether seeding happened.
pub async fn initialize(store: &dyn KeyValueStore, today: NaiveDate) -> StoreResult<bool> {
    if is_initialized(store).await? {
        debug!("Storage already initialized");
        return Ok(false);
    }

    info!("Seeding storage with the initial plan");
    let result = seed(store, today).await;
    if let Err(e) = &result {
        error!("Failed to initialize storage: {}", e);
    }
    result.map(|_| true)
}

async fn seed(store: &dyn KeyValueStore, today: NaiveDate) -> StoreResult<()> {
    store
        .set_item(keys::WEIGHT_LOSS_PLAN, serde_json::to_string(&initial_plan())?)
        .await?;
    store
        .set_item(keys::USER_PROGRESS, serde_json::to_string(&initial_progress(today))?)
        .await?;
    store
        .set_item(keys::SETTINGS, serde_json::to_string(&initial_settings())?)
        .await?;
    store.set_item(keys::MEASUREMENT_RECORDS, "[]".to_string()).await?;
    store.set_item(keys::CHECK_IN_RECORDS, "[]".to_string()).await?;

    // Flag last, so a partial seed is retried on the next launch
    store.set_item(keys::IS_INITIALIZED, "true".to_string()).await
}

/// Erase every stored record, including the initialization flag
pub async fn clear_all(store: &dyn KeyValueStore) -> StoreResult<()> {
    info!("Clearing all stored data");
    store.clear().await.map_err(|e| {
        error!("Failed to clear all data: {}", e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_seeds_all_keys() {
        let store = MemoryStore::new();
        assert!(initialize(&store, today()).await.unwrap());

        for key in keys::ALL {
            assert!(store.get_item(key).await.unwrap().is_some(), "missing {}", key);
        }
        assert_eq!(
            store.get_item(keys::IS_INITIALIZED).await.unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(
            store.get_item(keys::CHECK_IN_RECORDS).await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let store = MemoryStore::new();
        initialize(&store, today()).await.unwrap();
        let first = store.snapshot().await;

        let later = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        assert!(!initialize(&store, later).await.unwrap());
        assert_eq!(store.snapshot().await, first);
    }

    #[tokio::test]
    async fn test_initialize_keeps_existing_records() {
        let store = MemoryStore::new();
        initialize(&store, today()).await.unwrap();
        store
            .set_item(keys::CHECK_IN_RECORDS, "[{\"marker\":1}]".to_string())
            .await
            .unwrap();

        initialize(&store, today()).await.unwrap();
        assert_eq!(
            store.get_item(keys::CHECK_IN_RECORDS).await.unwrap().as_deref(),
            Some("[{\"marker\":1}]")
        );
    }

    #[tokio::test]
    async fn test_clear_all_resets_flag() {
        let store = MemoryStore::new();
        initialize(&store, today()).await.unwrap();

        clear_all(&store).await.unwrap();
        assert!(!is_initialized(&store).await.unwrap());
        assert!(store.snapshot().await.is_empty());

        // Next launch reseeds
        assert!(initialize(&store, today()).await.unwrap());
    }

    #[test]
    fn test_open_memory_backend() {
        let config = StorageConfig {
            backend: StorageBackend::Memory,
            data_dir: "unused".into(),
        };
        let _store = open(&config);
    }
}
