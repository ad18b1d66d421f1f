//! Daily check-in submission
//!
//! One check-in per date: submitting again for the same date edits the
//! stored record. Fields left unset in the input keep their stored values.
//! Every submission recomputes the streak from the stored check-ins rather
//! than incrementing it.

use super::new_record_id;
use super::progress::ProgressService;
use crate::error::TrackerResult;
use crate::repositories::{CheckInRepository, ProgressRepository};
use crate::store::KeyValueStore;
use chrono::NaiveDate;
use slimplan_shared::metrics::calculate_streak;
use slimplan_shared::validation::{validate_duration_minutes, validate_weight};
use slimplan_shared::{
    CheckInDetails, CheckInRecord, CheckInType, DietDetails, ExerciseDetails, MealSlot,
    UserProgress,
};
use tracing::{info, warn};

/// Check-in form values; `None` keeps what is already stored for the date
#[derive(Debug, Clone, Default)]
pub struct CheckInInput {
    pub date: Option<NaiveDate>,
    /// Whether the meal was eaten. A package id alone implies `Some(true)`;
    /// `Some(false)` also drops the stored package.
    pub breakfast: Option<bool>,
    pub lunch: Option<bool>,
    pub dinner: Option<bool>,
    pub breakfast_package: Option<String>,
    pub lunch_package: Option<String>,
    pub dinner_package: Option<String>,
    pub exercise_completed: Option<bool>,
    /// minutes
    pub exercise_duration: Option<u32>,
    pub exercise_type: Option<String>,
    /// kg
    pub weight: Option<f64>,
    /// A blank string clears stored notes
    pub notes: Option<String>,
}

/// Result of a submission
#[derive(Debug, Clone)]
pub struct CheckInOutcome {
    pub record: CheckInRecord,
    /// False when an existing record for the date was updated
    pub created: bool,
    pub progress: UserProgress,
}

/// Check-in service for business logic
pub struct CheckInService;

impl CheckInService {
    /// Store the check-in for `input.date` (default `today`) and refresh progress.
    ///
    /// New records increment `totalCheckIns`; updates do not. The streak is
    /// recomputed after the write, and `currentWeight` follows any weight given.
    pub async fn submit(
        store: &dyn KeyValueStore,
        input: CheckInInput,
        today: NaiveDate,
    ) -> TrackerResult<CheckInOutcome> {
        if let Some(weight) = input.weight {
            validate_weight(weight)?;
        }
        if let Some(minutes) = input.exercise_duration {
            validate_duration_minutes(minutes)?;
        }

        let date = input.date.unwrap_or(today);
        Self::warn_unknown_packages(store, &input).await?;

        let existing = CheckInRepository::get_by_date(store, date).await?;
        let created = existing.is_none();
        let new_weight = input.weight;
        let record = match existing {
            Some(previous) => merge_record(previous, input),
            None => merge_record(empty_record(new_record_id(), date), input),
        };

        if created {
            CheckInRepository::append(store, &record).await?;
        } else {
            CheckInRepository::update(store, &record).await?;
        }

        let records = CheckInRepository::get_all(store).await?;
        let mut progress = ProgressRepository::get_or_seed(store, today).await?;
        progress.streak_count = calculate_streak(&records, today);
        if created {
            progress.total_check_ins += 1;
        }
        if let Some(weight) = new_weight {
            progress.current_weight = weight;
        }
        progress.last_updated = today;
        ProgressRepository::put(store, &progress).await?;

        info!(
            id = %record.id,
            date = %record.date,
            created,
            completed = record.completed,
            streak = progress.streak_count,
            "Check-in saved"
        );

        Ok(CheckInOutcome {
            record,
            created,
            progress,
        })
    }

    /// Check-ins dated within `start..=end` (either bound optional), oldest first
    pub async fn history(
        store: &dyn KeyValueStore,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> TrackerResult<Vec<CheckInRecord>> {
        let mut records: Vec<CheckInRecord> = CheckInRepository::get_all(store)
            .await?
            .into_iter()
            .filter(|r| start.map_or(true, |s| r.date >= s) && end.map_or(true, |e| r.date <= e))
            .collect();
        records.sort_by_key(|r| r.date);
        Ok(records)
    }

    /// Log package ids the active phase does not offer; they still get stored
    async fn warn_unknown_packages(
        store: &dyn KeyValueStore,
        input: &CheckInInput,
    ) -> TrackerResult<()> {
        let selected = [
            (MealSlot::Breakfast, &input.breakfast_package),
            (MealSlot::Lunch, &input.lunch_package),
            (MealSlot::Dinner, &input.dinner_package),
        ];
        if selected.iter().all(|(_, id)| id.is_none()) {
            return Ok(());
        }

        let Some(phase) = ProgressService::active_phase(store).await? else {
            return Ok(());
        };
        for (slot, id) in selected {
            if let Some(id) = id {
                if phase.diet_plan.meal_packages.find(slot, id).is_none() {
                    warn!(%slot, package_id = %id, phase_id = %phase.id, "Unknown meal package");
                }
            }
        }
        Ok(())
    }
}

fn empty_record(id: String, date: NaiveDate) -> CheckInRecord {
    CheckInRecord {
        id,
        date,
        check_in_type: CheckInType::All,
        completed: false,
        details: CheckInDetails::default(),
        notes: None,
    }
}

/// Apply the supplied input fields over `previous`
fn merge_record(previous: CheckInRecord, input: CheckInInput) -> CheckInRecord {
    let diet = previous.details.diet.unwrap_or_default();
    let exercise = previous.details.exercise.unwrap_or_default();

    let (breakfast, breakfast_package) = merge_meal(
        input.breakfast,
        input.breakfast_package,
        diet.breakfast,
        diet.breakfast_package,
    );
    let (lunch, lunch_package) =
        merge_meal(input.lunch, input.lunch_package, diet.lunch, diet.lunch_package);
    let (dinner, dinner_package) =
        merge_meal(input.dinner, input.dinner_package, diet.dinner, diet.dinner_package);

    let exercise = ExerciseDetails {
        completed: input.exercise_completed.unwrap_or(exercise.completed),
        duration: input.exercise_duration.unwrap_or(exercise.duration),
        kind: input.exercise_type.unwrap_or(exercise.kind),
    };
    let weight = input.weight.or(previous.details.weight);
    let notes = match input.notes {
        Some(notes) => non_empty(Some(notes)),
        None => previous.notes,
    };

    let completed = breakfast || lunch || dinner || exercise.completed || weight.is_some();

    CheckInRecord {
        id: previous.id,
        date: previous.date,
        check_in_type: CheckInType::All,
        completed,
        details: CheckInDetails {
            diet: Some(DietDetails {
                breakfast,
                lunch,
                dinner,
                breakfast_package,
                lunch_package,
                dinner_package,
            }),
            exercise: Some(exercise),
            weight,
        },
        notes,
    }
}

fn merge_meal(
    eaten: Option<bool>,
    package: Option<String>,
    was_eaten: bool,
    previous_package: Option<String>,
) -> (bool, Option<String>) {
    let package = non_empty(package);
    let eaten = eaten.unwrap_or(was_eaten || package.is_some());
    if eaten {
        (true, package.or(previous_package))
    } else {
        (false, None)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TrackerError;
    use crate::services::CalorieService;
    use crate::store::{initialize, MemoryStore};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        initialize(&store, date("2026-01-01")).await.unwrap();
        store
    }

    fn breakfast_only(package: &str) -> CheckInInput {
        CheckInInput {
            breakfast_package: Some(package.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_first_submission_creates_record() {
        let store = seeded().await;
        let outcome = CheckInService::submit(&store, breakfast_only("phase1-bf1"), date("2026-01-05"))
            .await
            .unwrap();

        assert!(outcome.created);
        assert!(outcome.record.completed);
        assert_eq!(outcome.record.check_in_type, CheckInType::All);
        assert_eq!(outcome.record.date, date("2026-01-05"));
        assert_eq!(outcome.progress.total_check_ins, 1);
        assert_eq!(outcome.progress.streak_count, 1);
        assert_eq!(outcome.progress.last_updated, date("2026-01-05"));

        let calories = CalorieService::daily_calories(&store, date("2026-01-05"))
            .await
            .unwrap();
        assert_eq!(calories, 350);
    }

    #[tokio::test]
    async fn test_resubmission_updates_same_record() {
        let store = seeded().await;
        let today = date("2026-01-05");
        let first = CheckInService::submit(&store, breakfast_only("phase1-bf1"), today)
            .await
            .unwrap();

        let second_input = CheckInInput {
            dinner_package: Some("phase1-dinner1".to_string()),
            ..Default::default()
        };
        let second = CheckInService::submit(&store, second_input, today).await.unwrap();

        assert!(!second.created);
        assert_eq!(second.record.id, first.record.id);
        assert_eq!(second.progress.total_check_ins, 1);

        let records = CheckInRepository::get_all(&store).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(CalorieService::daily_calories(&store, today).await.unwrap(), 650);
    }

    #[tokio::test]
    async fn test_streak_recomputed_across_gap() {
        let store = seeded().await;
        for day in ["2026-01-01", "2026-01-02", "2026-01-04"] {
            CheckInService::submit(&store, breakfast_only("phase1-bf1"), date(day))
                .await
                .unwrap();
        }
        let progress = ProgressRepository::get(&store).await.unwrap();
        assert_eq!(progress.total_check_ins, 3);
        assert_eq!(progress.streak_count, 1);

        // Back-filling the gap restores the chain
        let input = CheckInInput {
            date: Some(date("2026-01-03")),
            ..breakfast_only("phase1-bf2")
        };
        let outcome = CheckInService::submit(&store, input, date("2026-01-04")).await.unwrap();
        assert_eq!(outcome.progress.streak_count, 4);
    }

    #[tokio::test]
    async fn test_empty_check_in_is_not_completed() {
        let store = seeded().await;
        let outcome = CheckInService::submit(&store, CheckInInput::default(), date("2026-01-05"))
            .await
            .unwrap();
        assert!(!outcome.record.completed);
        assert_eq!(outcome.progress.streak_count, 0);
        assert_eq!(outcome.progress.total_check_ins, 1);
    }

    #[tokio::test]
    async fn test_weight_updates_current_weight() {
        let store = seeded().await;
        let input = CheckInInput {
            weight: Some(82.4),
            notes: Some("   ".to_string()),
            ..Default::default()
        };
        let outcome = CheckInService::submit(&store, input, date("2026-01-05")).await.unwrap();

        assert!(outcome.record.completed);
        assert_eq!(outcome.record.notes, None);
        assert_eq!(outcome.progress.current_weight, 82.4);
    }

    #[tokio::test]
    async fn test_invalid_weight_rejected_before_write() {
        let store = seeded().await;
        let before = store.snapshot().await;
        let input = CheckInInput {
            weight: Some(5.0),
            ..Default::default()
        };

        let err = CheckInService::submit(&store, input, date("2026-01-05"))
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Validation(_)));
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_unknown_package_still_stored() {
        let store = seeded().await;
        let outcome = CheckInService::submit(&store, breakfast_only("no-such"), date("2026-01-05"))
            .await
            .unwrap();
        assert_eq!(
            outcome.record.details.diet.unwrap().breakfast_package.as_deref(),
            Some("no-such")
        );
        assert_eq!(
            CalorieService::daily_calories(&store, date("2026-01-05")).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_weight_only_resubmission_keeps_meals() {
        let store = seeded().await;
        let today = date("2026-01-05");
        CheckInService::submit(&store, breakfast_only("phase1-bf1"), today)
            .await
            .unwrap();

        let weigh_in = CheckInInput {
            weight: Some(83.0),
            ..Default::default()
        };
        let outcome = CheckInService::submit(&store, weigh_in, today).await.unwrap();

        let diet = outcome.record.details.diet.unwrap();
        assert!(diet.breakfast);
        assert_eq!(diet.breakfast_package.as_deref(), Some("phase1-bf1"));
        assert_eq!(outcome.record.details.weight, Some(83.0));
        assert_eq!(CalorieService::daily_calories(&store, today).await.unwrap(), 350);
    }

    #[tokio::test]
    async fn test_meal_flags_without_packages() {
        let store = seeded().await;
        let today = date("2026-01-05");
        let ate_lunch = CheckInInput {
            lunch: Some(true),
            ..breakfast_only("phase1-bf1")
        };
        let outcome = CheckInService::submit(&store, ate_lunch, today).await.unwrap();
        let diet = outcome.record.details.diet.unwrap();
        assert!(diet.lunch && diet.lunch_package.is_none());

        // Marking breakfast as skipped drops its package
        let skipped = CheckInInput {
            breakfast: Some(false),
            ..Default::default()
        };
        let outcome = CheckInService::submit(&store, skipped, today).await.unwrap();
        let diet = outcome.record.details.diet.unwrap();
        assert!(!diet.breakfast && diet.breakfast_package.is_none());
        assert!(diet.lunch);
        assert!(outcome.record.completed);
        assert_eq!(CalorieService::daily_calories(&store, today).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_history_sorted_and_bounded() {
        let store = seeded().await;
        for day in ["2026-01-07", "2026-01-03", "2026-01-05"] {
            let input = CheckInInput {
                date: Some(date(day)),
                ..breakfast_only("phase1-bf1")
            };
            CheckInService::submit(&store, input, date("2026-01-07")).await.unwrap();
        }

        let all = CheckInService::history(&store, None, None).await.unwrap();
        let days: Vec<NaiveDate> = all.iter().map(|r| r.date).collect();
        assert_eq!(days, vec![date("2026-01-03"), date("2026-01-05"), date("2026-01-07")]);

        let bounded = CheckInService::history(&store, Some(date("2026-01-04")), Some(date("2026-01-06")))
            .await
            .unwrap();
        assert_eq!(bounded.len(), 1);
        assert_eq!(bounded[0].date, date("2026-01-05"));
    }
}
