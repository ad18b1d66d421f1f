//! Derived value types returned by the metrics engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive date range for queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Calorie total for one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCalories {
    pub date: NaiveDate,
    pub calories: u32,
}

/// One point of the weight chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightPoint {
    pub date: NaiveDate,
    /// kg
    pub weight: f64,
}

/// Overall progress against the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub current_weight: f64,
    /// Positive when weight went down since the plan start
    pub weight_lost: f64,
    /// Distance to the plan's end weight, never negative
    pub weight_remaining: f64,
    pub completed_milestones: usize,
    pub total_milestones: usize,
    pub current_phase_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_phase_name: Option<String>,
    pub streak_count: u32,
    pub total_check_ins: u32,
}
