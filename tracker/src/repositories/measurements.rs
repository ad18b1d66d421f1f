//! Measurement list repository

use super::{read_json, write_json};
use crate::store::{keys, KeyValueStore, StoreResult};
use slimplan_shared::MeasurementRecord;
use tracing::debug;

/// Append-only list of body measurements
pub struct MeasurementRepository;

impl MeasurementRepository {
    /// All measurements in stored order, empty when none stored
    pub async fn get_all(store: &dyn KeyValueStore) -> StoreResult<Vec<MeasurementRecord>> {
        Ok(read_json(store, keys::MEASUREMENT_RECORDS)
            .await?
            .unwrap_or_default())
    }

    /// Append one record (read-modify-write of the whole list)
    pub async fn append(store: &dyn KeyValueStore, record: &MeasurementRecord) -> StoreResult<()> {
        let mut records = Self::get_all(store).await?;
        records.push(record.clone());
        write_json(store, keys::MEASUREMENT_RECORDS, &records).await?;
        debug!(id = %record.id, total = records.len(), "Measurement appended");
        Ok(())
    }
}
