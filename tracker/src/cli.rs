//! Command-line front end
//!
//! Each subcommand maps onto one service call and produces a JSON value for
//! the binary to print.

use crate::error::{TrackerError, TrackerResult};
use crate::repositories::{CheckInRepository, PlanRepository};
use crate::services::{
    CalorieService, CheckInInput, CheckInService, MeasurementInput, MeasurementService,
    MilestoneService, ProgressService, SettingsService,
};
use crate::store::{self, KeyValueStore};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use slimplan_shared::validation::parse_date;
use slimplan_shared::Theme;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "slimplan", version, about = "Personal weight-loss plan tracker")]
pub struct Cli {
    /// Data directory for the file store
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Seed storage with the plan if this is the first run
    Init,
    /// Progress summary, streak and today's calories
    Status,
    /// List phases, or show one phase in full
    Plan {
        #[arg(long)]
        phase: Option<String>,
    },
    /// Record or update a day's check-in
    CheckIn(CheckInArgs),
    /// Check-in history, oldest first
    CheckIns {
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Calorie totals for a day or a date range
    Calories(CaloriesArgs),
    /// Weight chart data from check-ins
    Weights,
    /// Record body measurements
    Measure(MeasureArgs),
    /// List body measurements
    Measurements,
    /// Mark a milestone done or not done (toggles without a flag)
    Milestone {
        phase: String,
        milestone: String,
        #[arg(long, conflicts_with = "undo")]
        done: bool,
        #[arg(long)]
        undo: bool,
    },
    /// Show or change settings
    Settings(SettingsArgs),
    /// Switch the active phase
    Phase { id: String },
    /// Erase all stored data
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct CheckInArgs {
    /// Defaults to today
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
    /// Ate breakfast, optionally naming the package eaten
    #[arg(long, num_args = 0..=1, value_name = "PACKAGE", conflicts_with = "no_breakfast")]
    pub breakfast: Option<Option<String>>,
    #[arg(long, num_args = 0..=1, value_name = "PACKAGE", conflicts_with = "no_lunch")]
    pub lunch: Option<Option<String>>,
    #[arg(long, num_args = 0..=1, value_name = "PACKAGE", conflicts_with = "no_dinner")]
    pub dinner: Option<Option<String>>,
    /// Skipped breakfast; clears a stored package
    #[arg(long)]
    pub no_breakfast: bool,
    #[arg(long)]
    pub no_lunch: bool,
    #[arg(long)]
    pub no_dinner: bool,
    /// Minutes of exercise done
    #[arg(long)]
    pub exercise_minutes: Option<u32>,
    #[arg(long)]
    pub exercise_type: Option<String>,
    /// Body weight in kg
    #[arg(long)]
    pub weight: Option<f64>,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug)]
pub struct CaloriesArgs {
    /// Single day, defaults to today
    #[arg(long, value_parser = parse_date, conflicts_with_all = ["from", "to"])]
    pub date: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date, requires = "to")]
    pub from: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date, requires = "from")]
    pub to: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub struct MeasureArgs {
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub weight: f64,
    #[arg(long)]
    pub waist: f64,
    #[arg(long)]
    pub chest: f64,
    #[arg(long)]
    pub thigh: f64,
    #[arg(long)]
    pub body_fat: Option<f64>,
    #[arg(long = "photo")]
    pub photo_urls: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub struct SettingsArgs {
    #[arg(long)]
    pub reminder_enabled: Option<bool>,
    /// HH:MM
    #[arg(long)]
    pub reminder_time: Option<String>,
    #[arg(long)]
    pub measurement_reminder_enabled: Option<bool>,
    /// English weekday name
    #[arg(long)]
    pub measurement_reminder_day: Option<String>,
    #[arg(long)]
    pub theme: Option<Theme>,
}

impl SettingsArgs {
    fn is_empty(&self) -> bool {
        self.reminder_enabled.is_none()
            && self.reminder_time.is_none()
            && self.measurement_reminder_enabled.is_none()
            && self.measurement_reminder_day.is_none()
            && self.theme.is_none()
    }
}

impl From<CheckInArgs> for CheckInInput {
    fn from(args: CheckInArgs) -> Self {
        let (breakfast, breakfast_package) = meal_choice(args.breakfast, args.no_breakfast);
        let (lunch, lunch_package) = meal_choice(args.lunch, args.no_lunch);
        let (dinner, dinner_package) = meal_choice(args.dinner, args.no_dinner);
        CheckInInput {
            date: args.date,
            breakfast,
            lunch,
            dinner,
            breakfast_package,
            lunch_package,
            dinner_package,
            exercise_completed: args.exercise_minutes.map(|m| m > 0),
            exercise_duration: args.exercise_minutes,
            exercise_type: args.exercise_type,
            weight: args.weight,
            notes: args.notes,
        }
    }
}

/// `--meal [PKG]` / `--no-meal` to (eaten, package); untouched meals stay `None`
fn meal_choice(ate: Option<Option<String>>, skipped: bool) -> (Option<bool>, Option<String>) {
    match ate {
        Some(package) => (Some(true), package),
        None if skipped => (Some(false), None),
        None => (None, None),
    }
}

/// Execute one command against `store`
pub async fn run(command: Command, store: &dyn KeyValueStore, today: NaiveDate) -> TrackerResult<Value> {
    match command {
        Command::Init => {
            let seeded = store::initialize(store, today).await?;
            Ok(json!({ "seeded": seeded }))
        }
        Command::Status => {
            let summary = ProgressService::summary(store).await?;
            let streak = ProgressService::streak(store, today).await?;
            let calories = CalorieService::daily_calories(store, today).await?;
            let checked_in = CheckInRepository::get_by_date(store, today).await?.is_some();
            Ok(json!({
                "date": today,
                "summary": to_json(&summary)?,
                "streak": streak,
                "checkedInToday": checked_in,
                "caloriesToday": calories,
            }))
        }
        Command::Plan { phase: Some(id) } => {
            let phase = ProgressService::require_phase(store, &id).await?;
            to_json(&phase)
        }
        Command::Plan { phase: None } => {
            let plan = PlanRepository::get(store).await?;
            let phases: Vec<Value> = plan
                .phases
                .iter()
                .map(|p| {
                    json!({
                        "id": p.id,
                        "name": p.name,
                        "weeks": p.weeks,
                        "targetWeight": p.target_weight,
                        "mainTasks": p.main_tasks,
                        "dailyCalories": p.diet_plan.daily_calories,
                    })
                })
                .collect();
            Ok(json!({ "totalTarget": to_json(&plan.total_target)?, "phases": phases }))
        }
        Command::CheckIn(args) => {
            let outcome = CheckInService::submit(store, args.into(), today).await?;
            Ok(json!({
                "created": outcome.created,
                "record": to_json(&outcome.record)?,
                "streak": outcome.progress.streak_count,
                "totalCheckIns": outcome.progress.total_check_ins,
            }))
        }
        Command::CheckIns { from, to } => {
            if let (Some(from), Some(to)) = (from, to) {
                if from > to {
                    return Err(TrackerError::BadRequest(format!(
                        "--from {} is after --to {}",
                        from, to
                    )));
                }
            }
            to_json(&CheckInService::history(store, from, to).await?)
        }
        Command::Calories(args) => match (args.from, args.to) {
            (Some(from), Some(to)) => {
                if from > to {
                    return Err(TrackerError::BadRequest(format!(
                        "--from {} is after --to {}",
                        from, to
                    )));
                }
                let days = CalorieService::period_calories(store, from, to).await?;
                to_json(&days)
            }
            _ => {
                let date = args.date.unwrap_or(today);
                let calories = CalorieService::daily_calories(store, date).await?;
                Ok(json!({ "date": date, "calories": calories }))
            }
        },
        Command::Weights => to_json(&ProgressService::weight_history(store).await?),
        Command::Measure(args) => {
            let input = MeasurementInput {
                date: args.date.unwrap_or(today),
                weight: args.weight,
                waist: args.waist,
                chest: args.chest,
                thigh: args.thigh,
                body_fat: args.body_fat,
                photo_urls: args.photo_urls,
            };
            to_json(&MeasurementService::record(store, input).await?)
        }
        Command::Measurements => to_json(&MeasurementService::history(store).await?),
        Command::Milestone {
            phase,
            milestone,
            done,
            undo,
        } => {
            let updated = match (done, undo) {
                (true, _) => MilestoneService::set_completion(store, &phase, &milestone, true).await?,
                (_, true) => MilestoneService::set_completion(store, &phase, &milestone, false).await?,
                _ => MilestoneService::toggle(store, &phase, &milestone).await?,
            };
            to_json(&updated)
        }
        Command::Settings(args) => {
            let mut settings = SettingsService::get(store).await?;
            if args.is_empty() {
                return to_json(&settings);
            }
            if let Some(v) = args.reminder_enabled {
                settings.reminder_enabled = v;
            }
            if let Some(v) = args.reminder_time {
                settings.reminder_time = v;
            }
            if let Some(v) = args.measurement_reminder_enabled {
                settings.measurement_reminder_enabled = v;
            }
            if let Some(v) = args.measurement_reminder_day {
                settings.measurement_reminder_day = v;
            }
            if let Some(v) = args.theme {
                settings.theme = v;
            }
            to_json(&SettingsService::update(store, settings).await?)
        }
        Command::Phase { id } => {
            let progress = ProgressService::set_current_phase(store, &id, today).await?;
            to_json(&progress)
        }
        Command::Clear { yes } => {
            if !yes {
                return Err(TrackerError::BadRequest(
                    "refusing to erase data without --yes".to_string(),
                ));
            }
            store::clear_all(store).await?;
            Ok(json!({ "cleared": true }))
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> TrackerResult<Value> {
    serde_json::to_value(value).map_err(|e| TrackerError::Internal(e.into()))
}
