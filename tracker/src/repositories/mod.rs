//! Storage repositories
//!
//! Stateless data access over a [`KeyValueStore`]: each repository reads and
//! writes one key as JSON. Absent keys fall back to seed values or empty
//! lists; storage and decoding failures are logged and returned.

pub mod check_ins;
pub mod measurements;
pub mod records;

pub use check_ins::CheckInRepository;
pub use measurements::MeasurementRepository;
pub use records::{PlanRepository, ProgressRepository, SettingsRepository};

use crate::store::{KeyValueStore, StoreResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

/// Read and decode one key, `None` when absent
async fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StoreResult<Option<T>> {
    let raw = store.get_item(key).await.map_err(|e| {
        error!(key, "Failed to read: {}", e);
        e
    })?;

    match raw {
        Some(raw) => serde_json::from_str(&raw).map(Some).map_err(|e| {
            error!(key, "Stored value is not valid JSON for its record: {}", e);
            e.into()
        }),
        None => {
            debug!(key, "Key absent");
            Ok(None)
        }
    }
}

/// Encode and replace one key
async fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set_item(key, raw).await.map_err(|e| {
        error!(key, "Failed to write: {}", e);
        e
    })
}
