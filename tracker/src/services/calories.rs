//! Calorie totals from selected meal packages

use super::progress::ProgressService;
use crate::error::TrackerResult;
use crate::repositories::CheckInRepository;
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use slimplan_shared::metrics;
use slimplan_shared::{DailyCalories, DateRange};

/// Calorie service for business logic
pub struct CalorieService;

impl CalorieService {
    /// Calories eaten on `date` according to its check-in.
    ///
    /// Packages resolve against the active phase. Returns 0 when there is no
    /// check-in, no selected package, or no active phase.
    pub async fn daily_calories(store: &dyn KeyValueStore, date: NaiveDate) -> TrackerResult<u32> {
        let Some(record) = CheckInRepository::get_by_date(store, date).await? else {
            return Ok(0);
        };
        let has_packages = record
            .details
            .diet
            .as_ref()
            .map(|d| d.selected_packages().next().is_some())
            .unwrap_or(false);
        if !has_packages {
            return Ok(0);
        }

        let Some(phase) = ProgressService::active_phase(store).await? else {
            return Ok(0);
        };
        Ok(metrics::daily_calories(&record, &phase))
    }

    /// Per-day calorie totals for check-ins between `start` and `end` inclusive
    pub async fn period_calories(
        store: &dyn KeyValueStore,
        start: NaiveDate,
        end: NaiveDate,
    ) -> TrackerResult<Vec<DailyCalories>> {
        let records = CheckInRepository::get_all(store).await?;
        let Some(phase) = ProgressService::active_phase(store).await? else {
            return Ok(Vec::new());
        };
        Ok(metrics::period_calories(
            &records,
            &phase,
            DateRange::new(start, end),
        ))
    }
}
