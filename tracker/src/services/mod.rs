//! Business logic services
//!
//! Services combine repository reads and writes with the pure metrics from
//! `slimplan_shared::metrics`. They hold no state of their own.

pub mod calories;
pub mod check_in;
pub mod measurements;
pub mod milestones;
pub mod progress;
pub mod settings;

pub use calories::CalorieService;
pub use check_in::{CheckInInput, CheckInOutcome, CheckInService};
pub use measurements::{MeasurementInput, MeasurementService};
pub use milestones::MilestoneService;
pub use progress::ProgressService;
pub use settings::SettingsService;

use chrono::{Local, NaiveDate};

/// Current local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Fresh client-side record id
pub(crate) fn new_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
