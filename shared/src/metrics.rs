//! Derived metrics over check-in data
//!
//! All functions here are pure: callers fetch records and the plan through
//! the storage layer and pass them in.

use crate::models::{CheckInRecord, Phase, UserProgress, WeightLossPlan};
use crate::types::{DailyCalories, DateRange, ProgressSummary, WeightPoint};
use chrono::{Days, NaiveDate};

/// Count consecutive completed check-in days ending on `today`.
///
/// Records are walked newest first. The chain continues while the record for
/// the expected day exists and is completed, and stops at the first gap or
/// incomplete day. Records dated after `today`, and repeated records for a
/// day already counted, are passed over.
pub fn calculate_streak(records: &[CheckInRecord], today: NaiveDate) -> u32 {
    let mut sorted: Vec<&CheckInRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak = 0;
    let mut expected = today;

    for record in sorted {
        if record.date > expected {
            continue;
        }
        if record.date != expected || !record.completed {
            break;
        }
        streak += 1;
        match expected.checked_sub_days(Days::new(1)) {
            Some(previous) => expected = previous,
            None => break,
        }
    }

    streak
}

/// Calories of the meal packages selected in one check-in.
///
/// Package ids are resolved against `phase` by meal slot; ids missing from
/// the catalog contribute nothing.
pub fn daily_calories(record: &CheckInRecord, phase: &Phase) -> u32 {
    let Some(diet) = &record.details.diet else {
        return 0;
    };

    let packages = &phase.diet_plan.meal_packages;
    diet.selected_packages()
        .filter_map(|(slot, id)| packages.find(slot, id))
        .map(|pkg| pkg.calories)
        .sum()
}

/// Per-day calorie totals for check-ins dated within `range`.
///
/// Results follow the order of `records`; check-ins without diet details
/// are left out.
pub fn period_calories(
    records: &[CheckInRecord],
    phase: &Phase,
    range: DateRange,
) -> Vec<DailyCalories> {
    records
        .iter()
        .filter(|r| range.contains(r.date))
        .filter(|r| r.details.diet.is_some())
        .map(|r| DailyCalories {
            date: r.date,
            calories: daily_calories(r, phase),
        })
        .collect()
}

/// Weights logged through check-ins, oldest first
pub fn weight_series(records: &[CheckInRecord]) -> Vec<WeightPoint> {
    let mut points: Vec<WeightPoint> = records
        .iter()
        .filter_map(|r| {
            r.details.weight.map(|weight| WeightPoint {
                date: r.date,
                weight,
            })
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// Summarize progress against the plan's overall target
pub fn summarize_progress(plan: &WeightLossPlan, progress: &UserProgress) -> ProgressSummary {
    let target = &plan.total_target;

    ProgressSummary {
        current_weight: progress.current_weight,
        weight_lost: target.start_weight - progress.current_weight,
        weight_remaining: (progress.current_weight - target.end_weight).max(0.0),
        completed_milestones: progress.completed_milestones.len(),
        total_milestones: plan.milestone_count(),
        current_phase_id: progress.current_phase.clone(),
        current_phase_name: plan.phase(&progress.current_phase).map(|p| p.name.clone()),
        streak_count: progress.streak_count,
        total_check_ins: progress.total_check_ins,
    }
}
