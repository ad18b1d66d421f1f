//! Seed data used on first run
//!
//! The full plan is authored as JSON in `data/initial_plan.json` and compiled
//! into the binary. It is parsed once and cloned out on demand.

use crate::models::{Settings, Theme, UserProgress, WeightLossPlan};
use chrono::NaiveDate;
use once_cell::sync::Lazy;

/// Raw seed plan, in the stored JSON shape
pub const INITIAL_PLAN_JSON: &str = include_str!("../data/initial_plan.json");

/// Phase a new user starts in
pub const INITIAL_PHASE_ID: &str = "phase-1";

/// Starting body weight (kg) of the seeded plan
pub const INITIAL_WEIGHT_KG: f64 = 84.0;

static INITIAL_PLAN: Lazy<WeightLossPlan> = Lazy::new(|| {
    serde_json::from_str(INITIAL_PLAN_JSON).expect("embedded initial plan must be valid")
});

/// The pre-authored 8-month plan plus maintenance phase
pub fn initial_plan() -> WeightLossPlan {
    INITIAL_PLAN.clone()
}

/// Progress for a user starting on `today`
pub fn initial_progress(today: NaiveDate) -> UserProgress {
    UserProgress {
        current_weight: INITIAL_WEIGHT_KG,
        start_date: today,
        current_phase: INITIAL_PHASE_ID.to_string(),
        completed_milestones: Vec::new(),
        streak_count: 0,
        total_check_ins: 0,
        last_updated: today,
    }
}

/// Default reminder and display settings
pub fn initial_settings() -> Settings {
    Settings {
        reminder_enabled: true,
        reminder_time: "08:00".to_string(),
        measurement_reminder_enabled: true,
        measurement_reminder_day: "Sunday".to_string(),
        theme: Theme::Auto,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealSlot;
    use std::collections::HashSet;

    #[test]
    fn test_initial_plan_parses() {
        let plan = initial_plan();
        assert_eq!(plan.phases.len(), 5);
        assert_eq!(plan.total_target.start_weight, 84.0);
        assert_eq!(plan.total_target.end_weight, 60.0);
        assert_eq!(plan.total_target.total_weeks, 32);
        assert_eq!(plan.milestone_count(), 19);
    }

    #[test]
    fn test_initial_plan_invariants() {
        let plan = initial_plan();
        assert!(plan.total_target.start_weight > plan.total_target.end_weight);

        // Phase targets descend chronologically
        let targets: Vec<f64> = plan.phases.iter().map(|p| p.target_weight).collect();
        assert!(targets.windows(2).all(|w| w[0] > w[1]));

        let phase_ids: HashSet<&str> = plan.phases.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(phase_ids.len(), plan.phases.len());

        for phase in &plan.phases {
            let milestone_ids: HashSet<&str> =
                phase.milestones.iter().map(|m| m.id.as_str()).collect();
            assert_eq!(milestone_ids.len(), phase.milestones.len());
            assert!(phase.milestones.iter().all(|m| !m.completed));
            assert!(!phase.exercise_plan.weekly_schedule.is_empty());
        }
    }

    #[test]
    fn test_phase_one_catalog() {
        let plan = initial_plan();
        let phase = plan.phase(INITIAL_PHASE_ID).unwrap();
        let packages = &phase.diet_plan.meal_packages;

        assert_eq!(packages.find(MealSlot::Breakfast, "phase1-bf1").unwrap().calories, 350);
        assert_eq!(packages.find(MealSlot::Lunch, "phase1-lunch2").unwrap().calories, 430);
        assert!(packages.find(MealSlot::Dinner, "phase1-bf1").is_none());

        let labels: Vec<&str> = phase
            .exercise_plan
            .weekly_schedule
            .iter()
            .map(|(label, _)| label)
            .collect();
        assert_eq!(labels, vec!["第一周", "第2-8周"]);
    }

    #[test]
    fn test_initial_progress_and_settings() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let progress = initial_progress(today);
        assert_eq!(progress.current_phase, "phase-1");
        assert_eq!(progress.start_date, today);
        assert_eq!(progress.last_updated, today);
        assert_eq!(progress.streak_count, 0);

        let settings = initial_settings();
        assert_eq!(settings.reminder_time, "08:00");
        assert_eq!(settings.measurement_reminder_day, "Sunday");
        assert_eq!(settings.theme, Theme::Auto);
    }
}
