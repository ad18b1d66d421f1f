//! Whole-record repositories for the plan, progress and settings

use super::{read_json, write_json};
use crate::store::{keys, KeyValueStore, StoreResult};
use chrono::{Local, NaiveDate};
use slimplan_shared::reference::{initial_plan, initial_progress, initial_settings};
use slimplan_shared::{Settings, UserProgress, WeightLossPlan};

/// Weight-loss plan repository
pub struct PlanRepository;

impl PlanRepository {
    /// Stored plan, or the seed plan when none is stored yet
    pub async fn get(store: &dyn KeyValueStore) -> StoreResult<WeightLossPlan> {
        Ok(read_json(store, keys::WEIGHT_LOSS_PLAN)
            .await?
            .unwrap_or_else(initial_plan))
    }

    pub async fn put(store: &dyn KeyValueStore, plan: &WeightLossPlan) -> StoreResult<()> {
        write_json(store, keys::WEIGHT_LOSS_PLAN, plan).await
    }
}

/// User progress repository
pub struct ProgressRepository;

impl ProgressRepository {
    /// Stored progress, or fresh progress starting today
    pub async fn get(store: &dyn KeyValueStore) -> StoreResult<UserProgress> {
        Self::get_or_seed(store, Local::now().date_naive()).await
    }

    /// Stored progress, or fresh progress starting on `today`
    pub async fn get_or_seed(
        store: &dyn KeyValueStore,
        today: NaiveDate,
    ) -> StoreResult<UserProgress> {
        Ok(read_json(store, keys::USER_PROGRESS)
            .await?
            .unwrap_or_else(|| initial_progress(today)))
    }

    pub async fn put(store: &dyn KeyValueStore, progress: &UserProgress) -> StoreResult<()> {
        write_json(store, keys::USER_PROGRESS, progress).await
    }
}

/// Settings repository
pub struct SettingsRepository;

impl SettingsRepository {
    pub async fn get(store: &dyn KeyValueStore) -> StoreResult<Settings> {
        Ok(read_json(store, keys::SETTINGS)
            .await?
            .unwrap_or_else(initial_settings))
    }

    pub async fn put(store: &dyn KeyValueStore, settings: &Settings) -> StoreResult<()> {
        write_json(store, keys::SETTINGS, settings).await
    }
}
