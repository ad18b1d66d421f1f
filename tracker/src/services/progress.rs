//! Progress service: streak, phase selection and summaries

use crate::error::{TrackerError, TrackerResult};
use crate::repositories::{CheckInRepository, PlanRepository, ProgressRepository};
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use slimplan_shared::metrics::{calculate_streak, summarize_progress, weight_series};
use slimplan_shared::{DomainError, Phase, ProgressSummary, UserProgress, WeightPoint};
use tracing::{info, warn};

/// Progress service for business logic
pub struct ProgressService;

impl ProgressService {
    /// Consecutive completed check-in days ending on `today`
    pub async fn streak(store: &dyn KeyValueStore, today: NaiveDate) -> TrackerResult<u32> {
        let records = CheckInRepository::get_all(store).await?;
        Ok(calculate_streak(&records, today))
    }

    /// The phase named by `progress.currentPhase`, if it exists in the plan
    pub async fn active_phase(store: &dyn KeyValueStore) -> TrackerResult<Option<Phase>> {
        let plan = PlanRepository::get(store).await?;
        let progress = ProgressRepository::get(store).await?;

        let phase = plan.phase(&progress.current_phase).cloned();
        if phase.is_none() {
            warn!(phase_id = %progress.current_phase, "Active phase missing from plan");
        }
        Ok(phase)
    }

    /// Move the user to another phase of the plan
    pub async fn set_current_phase(
        store: &dyn KeyValueStore,
        phase_id: &str,
        today: NaiveDate,
    ) -> TrackerResult<UserProgress> {
        let plan = PlanRepository::get(store).await?;
        if plan.phase(phase_id).is_none() {
            return Err(DomainError::PhaseNotFound(phase_id.to_string()).into());
        }

        let mut progress = ProgressRepository::get_or_seed(store, today).await?;
        progress.current_phase = phase_id.to_string();
        progress.last_updated = today;
        ProgressRepository::put(store, &progress).await?;

        info!(phase_id, "Current phase changed");
        Ok(progress)
    }

    /// Overall progress against the plan target
    pub async fn summary(store: &dyn KeyValueStore) -> TrackerResult<ProgressSummary> {
        let plan = PlanRepository::get(store).await?;
        let progress = ProgressRepository::get(store).await?;
        Ok(summarize_progress(&plan, &progress))
    }

    /// Weights logged through check-ins, oldest first
    pub async fn weight_history(store: &dyn KeyValueStore) -> TrackerResult<Vec<WeightPoint>> {
        let records = CheckInRepository::get_all(store).await?;
        Ok(weight_series(&records))
    }

    /// Fail with `NotFound` unless `phase_id` exists
    pub async fn require_phase(store: &dyn KeyValueStore, phase_id: &str) -> TrackerResult<Phase> {
        PlanRepository::get(store)
            .await?
            .phase(phase_id)
            .cloned()
            .ok_or_else(|| TrackerError::NotFound(format!("Phase not found: {}", phase_id)))
    }
}
