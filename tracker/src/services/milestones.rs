//! Milestone completion
//!
//! Completion is recorded twice: on the milestone inside the plan and in the
//! progress record's `completedMilestones`. Both are written here, plan
//! first. There is no cross-key transaction, so a crash between the two
//! writes can leave them out of step; the next call for the same milestone
//! brings them back in line.

use crate::error::TrackerResult;
use crate::repositories::{PlanRepository, ProgressRepository};
use crate::store::KeyValueStore;
use slimplan_shared::{DomainError, Milestone};
use tracing::info;

/// Milestone service for business logic
pub struct MilestoneService;

impl MilestoneService {
    /// Mark a milestone complete or incomplete in both plan and progress
    pub async fn set_completion(
        store: &dyn KeyValueStore,
        phase_id: &str,
        milestone_id: &str,
        completed: bool,
    ) -> TrackerResult<Milestone> {
        let mut plan = PlanRepository::get(store).await?;
        let phase = plan
            .phase_mut(phase_id)
            .ok_or_else(|| DomainError::PhaseNotFound(phase_id.to_string()))?;
        let milestone = phase
            .milestone_mut(milestone_id)
            .ok_or_else(|| DomainError::MilestoneNotFound {
                phase_id: phase_id.to_string(),
                milestone_id: milestone_id.to_string(),
            })?;
        milestone.completed = completed;
        let updated = milestone.clone();

        let mut progress = ProgressRepository::get(store).await?;
        progress.mark_milestone(milestone_id, completed);

        PlanRepository::put(store, &plan).await?;
        ProgressRepository::put(store, &progress).await?;

        info!(phase_id, milestone_id, completed, "Milestone updated");
        Ok(updated)
    }

    /// Flip a milestone's completion and return the new state
    pub async fn toggle(
        store: &dyn KeyValueStore,
        phase_id: &str,
        milestone_id: &str,
    ) -> TrackerResult<Milestone> {
        let plan = PlanRepository::get(store).await?;
        let current = plan
            .phase(phase_id)
            .ok_or_else(|| DomainError::PhaseNotFound(phase_id.to_string()))?
            .milestones
            .iter()
            .find(|m| m.id == milestone_id)
            .map(|m| m.completed)
            .ok_or_else(|| DomainError::MilestoneNotFound {
                phase_id: phase_id.to_string(),
                milestone_id: milestone_id.to_string(),
            })?;

        Self::set_completion(store, phase_id, milestone_id, !current).await
    }
}
