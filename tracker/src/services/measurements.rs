//! Body measurement logging

use super::new_record_id;
use crate::error::TrackerResult;
use crate::repositories::MeasurementRepository;
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use slimplan_shared::validation::{validate_circumference, validate_percentage, validate_weight};
use slimplan_shared::MeasurementRecord;
use tracing::info;

/// Measurement entry input
#[derive(Debug, Clone)]
pub struct MeasurementInput {
    pub date: NaiveDate,
    pub weight: f64,
    pub waist: f64,
    pub chest: f64,
    pub thigh: f64,
    pub body_fat: Option<f64>,
    pub photo_urls: Vec<String>,
}

/// Measurement service for business logic
pub struct MeasurementService;

impl MeasurementService {
    /// Validate and append a measurement
    pub async fn record(
        store: &dyn KeyValueStore,
        input: MeasurementInput,
    ) -> TrackerResult<MeasurementRecord> {
        validate_weight(input.weight)?;
        validate_circumference("waist", input.waist)?;
        validate_circumference("chest", input.chest)?;
        validate_circumference("thigh", input.thigh)?;
        if let Some(bf) = input.body_fat {
            validate_percentage("bodyFat", bf)?;
        }

        let record = MeasurementRecord {
            id: new_record_id(),
            date: input.date,
            weight: input.weight,
            waist: input.waist,
            chest: input.chest,
            thigh: input.thigh,
            body_fat: input.body_fat,
            photo_urls: (!input.photo_urls.is_empty()).then_some(input.photo_urls),
        };
        MeasurementRepository::append(store, &record).await?;

        info!(id = %record.id, date = %record.date, weight = record.weight, "Measurement recorded");
        Ok(record)
    }

    /// All measurements, oldest first
    pub async fn history(store: &dyn KeyValueStore) -> TrackerResult<Vec<MeasurementRecord>> {
        let mut records = MeasurementRepository::get_all(store).await?;
        records.sort_by_key(|r| r.date);
        Ok(records)
    }
}
