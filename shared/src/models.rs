//! Data models for the SlimPlan tracker
//!
//! Field names serialize in camelCase so that stored records keep the exact
//! JSON shape used by the mobile app's key-value storage.

use chrono::NaiveDate;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// Plan
// ============================================================================

/// The whole multi-phase weight-loss plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightLossPlan {
    pub total_target: TotalTarget,
    pub phases: Vec<Phase>,
}

impl WeightLossPlan {
    /// Find a phase by id
    pub fn phase(&self, phase_id: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == phase_id)
    }

    pub fn phase_mut(&mut self, phase_id: &str) -> Option<&mut Phase> {
        self.phases.iter_mut().find(|p| p.id == phase_id)
    }

    /// Total number of milestones across all phases
    pub fn milestone_count(&self) -> usize {
        self.phases.iter().map(|p| p.milestones.len()).sum()
    }
}

/// Overall weight target of the plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalTarget {
    pub start_weight: f64,
    pub end_weight: f64,
    pub total_weeks: u32,
    pub monthly_target: f64,
}

/// A multi-week segment of the plan with its own diet and exercise targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: String,
    pub name: String,
    /// Display label, e.g. "第1-2月"
    pub weeks: String,
    pub target_weight: f64,
    pub weight_loss_target: f64,
    pub main_tasks: String,
    pub diet_plan: DietPlan,
    pub exercise_plan: ExercisePlan,
    pub milestones: Vec<Milestone>,
    pub tips: Vec<String>,
}

impl Phase {
    pub fn milestone_mut(&mut self, milestone_id: &str) -> Option<&mut Milestone> {
        self.milestones.iter_mut().find(|m| m.id == milestone_id)
    }
}

// ============================================================================
// Diet
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    pub daily_calories: String,
    pub cooking_methods: Vec<String>,
    /// Descriptive text per meal; `meal_packages` is the structured source
    pub daily_structure: DailyStructure,
    pub snack_principle: String,
    pub meal_packages: MealTypePackages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStructure {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub afternoon_tea: Vec<String>,
    pub dinner: Vec<String>,
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    AfternoonTea,
    Dinner,
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::AfternoonTea => "afternoonTea",
            MealSlot::Dinner => "dinner",
        };
        f.write_str(name)
    }
}

/// Selectable meal packages per slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTypePackages {
    pub breakfast: Vec<MealPackage>,
    pub lunch: Vec<MealPackage>,
    pub afternoon_tea: Vec<MealPackage>,
    pub dinner: Vec<MealPackage>,
}

impl MealTypePackages {
    pub fn slot(&self, slot: MealSlot) -> &[MealPackage] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::AfternoonTea => &self.afternoon_tea,
            MealSlot::Dinner => &self.dinner,
        }
    }

    /// Resolve a package id within one slot
    pub fn find(&self, slot: MealSlot, package_id: &str) -> Option<&MealPackage> {
        self.slot(slot).iter().find(|p| p.id == package_id)
    }
}

/// A named, calorie-counted food combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPackage {
    pub id: String,
    pub name: String,
    /// kcal
    pub calories: u32,
    pub food_items: Vec<String>,
    /// grams
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

// ============================================================================
// Exercise
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePlan {
    pub weekly_schedule: WeeklySchedule,
    pub programmer_tips: Vec<String>,
}

/// Schedule label to exercise day, kept in authored order.
///
/// Serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklySchedule(Vec<(String, ExerciseDay)>);

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the day for `label`, keeping first-insertion order
    pub fn insert(&mut self, label: impl Into<String>, day: ExerciseDay) {
        let label = label.into();
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = day,
            None => self.0.push((label, day)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&ExerciseDay> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, d)| d)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExerciseDay)> {
        self.0.iter().map(|(l, d)| (l.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for WeeklySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, day) in &self.0 {
            map.serialize_entry(label, day)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeeklySchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScheduleVisitor;

        impl<'de> Visitor<'de> for ScheduleVisitor {
            type Value = WeeklySchedule;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of schedule labels to exercise days")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut schedule = WeeklySchedule::new();
                while let Some((label, day)) = access.next_entry::<String, ExerciseDay>()? {
                    schedule.insert(label, day);
                }
                Ok(schedule)
            }
        }

        deserializer.deserialize_map(ScheduleVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDay {
    #[serde(rename = "type")]
    pub kind: String,
    pub exercises: Vec<Exercise>,
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,
    pub sets: u32,
    /// Free text, may encode compound values like "4×12次"
    pub reps: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

// ============================================================================
// Milestones
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub week: u32,
    pub description: String,
    pub completed: bool,
}

// ============================================================================
// Check-ins and measurements
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckInType {
    Diet,
    Exercise,
    Weight,
    #[default]
    All,
}

/// One day's check-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRecord {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub check_in_type: CheckInType,
    /// True when any sub-activity was done
    pub completed: bool,
    pub details: CheckInDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<DietDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<ExerciseDetails>,
    /// kg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietDetails {
    pub breakfast: bool,
    pub lunch: bool,
    pub dinner: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast_package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_package: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner_package: Option<String>,
}

impl DietDetails {
    /// Selected package ids with their slot
    pub fn selected_packages(&self) -> impl Iterator<Item = (MealSlot, &str)> {
        [
            (MealSlot::Breakfast, self.breakfast_package.as_deref()),
            (MealSlot::Lunch, self.lunch_package.as_deref()),
            (MealSlot::Dinner, self.dinner_package.as_deref()),
        ]
        .into_iter()
        .filter_map(|(slot, id)| id.map(|id| (slot, id)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseDetails {
    pub completed: bool,
    /// minutes; stored `null` or negative values read as 0
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub duration: u32,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Whole minutes from a stored number that may be `null`, negative or fractional
fn lenient_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw
        .filter(|m| m.is_finite() && *m > 0.0)
        .map(|m| m.min(u32::MAX as f64) as u32)
        .unwrap_or(0))
}

/// Body measurement entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    pub id: String,
    pub date: NaiveDate,
    pub weight: f64,
    pub waist: f64,
    pub chest: f64,
    pub thigh: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_urls: Option<Vec<String>>,
}

// ============================================================================
// Progress and settings
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    pub current_weight: f64,
    pub start_date: NaiveDate,
    /// Id of the active phase
    pub current_phase: String,
    pub completed_milestones: Vec<String>,
    pub streak_count: u32,
    pub total_check_ins: u32,
    pub last_updated: NaiveDate,
}

impl UserProgress {
    /// Add or remove a milestone id, never duplicating it
    pub fn mark_milestone(&mut self, milestone_id: &str, completed: bool) {
        if completed {
            if !self.completed_milestones.iter().any(|id| id == milestone_id) {
                self.completed_milestones.push(milestone_id.to_string());
            }
        } else {
            self.completed_milestones.retain(|id| id != milestone_id);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "auto" | "system" => Ok(Theme::Auto),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

/// User settings and preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub reminder_enabled: bool,
    /// "HH:MM"
    pub reminder_time: String,
    pub measurement_reminder_enabled: bool,
    /// English weekday name
    pub measurement_reminder_day: String,
    pub theme: Theme,
}
