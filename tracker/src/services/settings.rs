//! Settings updates

use crate::error::TrackerResult;
use crate::repositories::SettingsRepository;
use crate::store::KeyValueStore;
use slimplan_shared::validation::validate_settings;
use slimplan_shared::Settings;
use tracing::info;

/// Settings service for business logic
pub struct SettingsService;

impl SettingsService {
    pub async fn get(store: &dyn KeyValueStore) -> TrackerResult<Settings> {
        Ok(SettingsRepository::get(store).await?)
    }

    /// Validate and replace the stored settings
    pub async fn update(store: &dyn KeyValueStore, settings: Settings) -> TrackerResult<Settings> {
        validate_settings(&settings)?;
        SettingsRepository::put(store, &settings).await?;
        info!(theme = ?settings.theme, reminder = settings.reminder_enabled, "Settings updated");
        Ok(settings)
    }
}
