//! Check-in list repository

use super::{read_json, write_json};
use crate::store::{keys, KeyValueStore, StoreResult};
use chrono::NaiveDate;
use slimplan_shared::CheckInRecord;
use tracing::{debug, warn};

/// Ordered list of daily check-ins
pub struct CheckInRepository;

impl CheckInRepository {
    /// All check-ins in stored order, empty when none stored
    pub async fn get_all(store: &dyn KeyValueStore) -> StoreResult<Vec<CheckInRecord>> {
        Ok(read_json(store, keys::CHECK_IN_RECORDS)
            .await?
            .unwrap_or_default())
    }

    /// Append a new check-in
    pub async fn append(store: &dyn KeyValueStore, record: &CheckInRecord) -> StoreResult<()> {
        let mut records = Self::get_all(store).await?;
        records.push(record.clone());
        write_json(store, keys::CHECK_IN_RECORDS, &records).await?;
        debug!(id = %record.id, date = %record.date, "Check-in appended");
        Ok(())
    }

    /// Replace the stored check-in with the same id, in place.
    ///
    /// Returns `false` and writes nothing when no record has that id.
    pub async fn update(store: &dyn KeyValueStore, record: &CheckInRecord) -> StoreResult<bool> {
        let mut records = Self::get_all(store).await?;
        let Some(slot) = records.iter_mut().find(|r| r.id == record.id) else {
            warn!(id = %record.id, "Check-in to update not found");
            return Ok(false);
        };
        *slot = record.clone();
        write_json(store, keys::CHECK_IN_RECORDS, &records).await?;
        debug!(id = %record.id, date = %record.date, "Check-in updated");
        Ok(true)
    }

    /// First check-in dated `date`
    pub async fn get_by_date(
        store: &dyn KeyValueStore,
        date: NaiveDate,
    ) -> StoreResult<Option<CheckInRecord>> {
        Ok(Self::get_all(store)
            .await?
            .into_iter()
            .find(|r| r.date == date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use slimplan_shared::{CheckInDetails, CheckInType};

    fn check_in(id: &str, date: &str) -> CheckInRecord {
        CheckInRecord {
            id: id.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            check_in_type: CheckInType::All,
            completed: true,
            details: CheckInDetails::default(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_append_then_find_by_date() {
        let store = MemoryStore::new();
        let record = check_in("r1", "2026-01-05");
        CheckInRepository::append(&store, &record).await.unwrap();

        let found = CheckInRepository::get_by_date(&store, record.date)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, "r1");

        let other = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
        assert!(CheckInRepository::get_by_date(&store, other).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_date_returns_first_match() {
        let store = MemoryStore::new();
        CheckInRepository::append(&store, &check_in("first", "2026-01-05")).await.unwrap();
        CheckInRepository::append(&store, &check_in("second", "2026-01-05")).await.unwrap();

        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let found = CheckInRepository::get_by_date(&store, date).await.unwrap().unwrap();
        assert_eq!(found.id, "first");
    }

    #[tokio::test]
    async fn test_update_in_place() {
        let store = MemoryStore::new();
        for (id, date) in [("a", "2026-01-03"), ("b", "2026-01-04"), ("c", "2026-01-05")] {
            CheckInRepository::append(&store, &check_in(id, date)).await.unwrap();
        }

        let mut changed = check_in("b", "2026-01-04");
        changed.completed = false;
        changed.notes = Some("rest day".to_string());
        assert!(CheckInRepository::update(&store, &changed).await.unwrap());

        let records = CheckInRepository::get_all(&store).await.unwrap();
        assert_eq!(records.len(), 3);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(records[1], changed);
        assert!(records[0].completed && records[2].completed);
    }

    #[tokio::test]
    async fn test_update_unknown_id_writes_nothing() {
        let store = MemoryStore::new();
        CheckInRepository::append(&store, &check_in("a", "2026-01-03")).await.unwrap();
        let before = store.snapshot().await;

        let updated = CheckInRepository::update(&store, &check_in("zzz", "2026-01-03"))
            .await
            .unwrap();
        assert!(!updated);
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_reads_app_written_list_with_null_duration() {
        let store = MemoryStore::new();
        let raw = r#"[
            {"id":"1767571200000","date":"2026-01-05","type":"all","completed":true,
             "details":{"diet":{"breakfast":true,"lunch":false,"dinner":false,"breakfastPackage":"phase1-bf1"},
                        "exercise":{"completed":false,"duration":null,"type":""}}},
            {"id":"1767657600000","date":"2026-01-06","type":"all","completed":true,
             "details":{"exercise":{"completed":true,"duration":-20,"type":"walk"}}}
        ]"#;
        store.set_item(keys::CHECK_IN_RECORDS, raw.to_string()).await.unwrap();

        let records = CheckInRepository::get_all(&store).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].details.exercise.as_ref().unwrap().duration, 0);
        assert_eq!(records[1].details.exercise.as_ref().unwrap().duration, 0);
    }
}
