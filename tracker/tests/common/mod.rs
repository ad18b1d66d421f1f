//! Common test utilities for integration tests
//!
//! Builds seeded stores and check-in records so each test file starts from
//! the same first-run state.

#![allow(dead_code)]

use chrono::NaiveDate;
use slimplan_shared::{CheckInDetails, CheckInRecord, CheckInType, DietDetails};
use slimplan_tracker::store::{self, FileStore, MemoryStore};
use tempfile::TempDir;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// In-memory store after first-run seeding
pub async fn seeded_memory_store() -> MemoryStore {
    let store = MemoryStore::new();
    store::initialize(&store, date("2026-01-01"))
        .await
        .expect("seeding memory store");
    store
}

/// File store in a fresh temp directory; keep the `TempDir` alive for the test
pub async fn seeded_file_store() -> (TempDir, FileStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = FileStore::new(dir.path());
    store::initialize(&store, date("2026-01-01"))
        .await
        .expect("seeding file store");
    (dir, store)
}

/// A completed check-in selecting only the given breakfast package
pub fn breakfast_check_in(id: &str, day: &str, package: &str) -> CheckInRecord {
    meal_check_in(id, day, Some(package), None, None)
}

pub fn meal_check_in(
    id: &str,
    day: &str,
    breakfast: Option<&str>,
    lunch: Option<&str>,
    dinner: Option<&str>,
) -> CheckInRecord {
    CheckInRecord {
        id: id.to_string(),
        date: date(day),
        check_in_type: CheckInType::Diet,
        completed: true,
        details: CheckInDetails {
            diet: Some(DietDetails {
                breakfast: breakfast.is_some(),
                lunch: lunch.is_some(),
                dinner: dinner.is_some(),
                breakfast_package: breakfast.map(str::to_string),
                lunch_package: lunch.map(str::to_string),
                dinner_package: dinner.map(str::to_string),
            }),
            exercise: None,
            weight: None,
        },
        notes: None,
    }
}
