//! Integration tests for the property-showing lifecycle: validated
//! transitions, the reschedule behavior, and full-reload consistency.

mod common {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use chrono::{NaiveDate, NaiveTime};
    use renthub::workflows::showings::{
        PropertyShowing, ShowingId, ShowingRepository, ShowingRequest, ShowingService,
    };
    use renthub::workflows::RepositoryError;

    #[derive(Default)]
    pub(super) struct MemoryRepository {
        records: Mutex<BTreeMap<String, PropertyShowing>>,
    }

    impl ShowingRepository for MemoryRepository {
        fn insert(&self, showing: PropertyShowing) -> Result<PropertyShowing, RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            if guard.contains_key(&showing.id.0) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(showing.id.0.clone(), showing.clone());
            Ok(showing)
        }

        fn update(&self, showing: PropertyShowing) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            if guard.contains_key(&showing.id.0) {
                guard.insert(showing.id.0.clone(), showing);
                Ok(())
            } else {
                Err(RepositoryError::NotFound)
            }
        }

        fn fetch(&self, id: &ShowingId) -> Result<Option<PropertyShowing>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.get(&id.0).cloned())
        }

        fn list_all(&self) -> Result<Vec<PropertyShowing>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.values().cloned().collect())
        }
    }

    pub(super) fn service() -> ShowingService<MemoryRepository> {
        ShowingService::new(Arc::new(MemoryRepository::default()))
    }

    pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    pub(super) fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
    }

    pub(super) fn request() -> ShowingRequest {
        ShowingRequest {
            listing_id: "listing-88".to_string(),
            tenant_id: "tenant-12".to_string(),
            requested_date: date(2025, 1, 6),
            requested_time: time(10, 30),
            message: Some("Weekday mornings work best.".to_string()),
        }
    }
}

use renthub::workflows::showings::{ShowingError, ShowingStatus};

#[test]
fn requested_showings_start_without_actual_schedule() {
    let service = common::service();
    let outcome = service.request_showing(common::request()).expect("request lands");

    assert_eq!(outcome.showing.status, ShowingStatus::Requested);
    assert!(outcome.showing.actual_date.is_none());
    assert!(outcome.showing.actual_time.is_none());
    assert_eq!(outcome.all.len(), 1);
}

#[test]
fn happy_path_runs_requested_confirmed_completed() {
    let service = common::service();
    let id = service
        .request_showing(common::request())
        .expect("request lands")
        .showing
        .id;

    let confirmed = service
        .update_status(&id, ShowingStatus::Confirmed, None)
        .expect("confirm works");
    assert_eq!(confirmed.showing.status, ShowingStatus::Confirmed);

    let completed = service
        .update_status(
            &id,
            ShowingStatus::Completed,
            Some("Toured unit and common areas.".to_string()),
        )
        .expect("complete works");
    assert_eq!(completed.showing.status, ShowingStatus::Completed);
    assert_eq!(
        completed.showing.notes.as_deref(),
        Some("Toured unit and common areas.")
    );
}

#[test]
fn illegal_transition_is_rejected_and_nothing_is_written() {
    let service = common::service();
    let id = service
        .request_showing(common::request())
        .expect("request lands")
        .showing
        .id;

    match service.update_status(&id, ShowingStatus::Completed, None) {
        Err(ShowingError::InvalidTransition { from, to }) => {
            assert_eq!(from, ShowingStatus::Requested);
            assert_eq!(to, ShowingStatus::Completed);
        }
        other => panic!("expected invalid transition, got {other:?}"),
    }

    let showing = service.get(&id).expect("record still readable");
    assert_eq!(showing.status, ShowingStatus::Requested);
}

#[test]
fn terminal_states_reject_further_updates() {
    let service = common::service();
    let id = service
        .request_showing(common::request())
        .expect("request lands")
        .showing
        .id;

    service
        .update_status(&id, ShowingStatus::Cancelled, None)
        .expect("cancel works");

    match service.update_status(&id, ShowingStatus::Confirmed, None) {
        Err(ShowingError::InvalidTransition { from, .. }) => {
            assert_eq!(from, ShowingStatus::Cancelled);
        }
        other => panic!("expected invalid transition, got {other:?}"),
    }
}

#[test]
fn reschedule_sets_actuals_and_lands_on_confirmed() {
    let service = common::service();
    let id = service
        .request_showing(common::request())
        .expect("request lands")
        .showing
        .id;

    let outcome = service
        .reschedule(&id, common::date(2025, 1, 10), common::time(14, 0))
        .expect("reschedule works");

    // The status is confirmed, not rescheduled: long-standing behavior the
    // enum name does not reflect.
    assert_eq!(outcome.showing.status, ShowingStatus::Confirmed);
    assert_eq!(outcome.showing.actual_date, Some(common::date(2025, 1, 10)));
    assert_eq!(outcome.showing.actual_time, Some(common::time(14, 0)));
}

#[test]
fn reschedule_is_rejected_once_terminal() {
    let service = common::service();
    let id = service
        .request_showing(common::request())
        .expect("request lands")
        .showing
        .id;

    service
        .update_status(&id, ShowingStatus::Confirmed, None)
        .expect("confirm works");
    service
        .update_status(&id, ShowingStatus::Completed, None)
        .expect("complete works");

    match service.reschedule(&id, common::date(2025, 2, 1), common::time(9, 0)) {
        Err(ShowingError::InvalidTransition { from, to }) => {
            assert_eq!(from, ShowingStatus::Completed);
            assert_eq!(to, ShowingStatus::Confirmed);
        }
        other => panic!("expected invalid transition, got {other:?}"),
    }
}

#[test]
fn notes_accumulate_across_updates() {
    let service = common::service();
    let id = service
        .request_showing(common::request())
        .expect("request lands")
        .showing
        .id;

    service
        .update_status(
            &id,
            ShowingStatus::Confirmed,
            Some("Bring building fob.".to_string()),
        )
        .expect("confirm works");
    let outcome = service
        .update_status(
            &id,
            ShowingStatus::Completed,
            Some("Tenant asked about parking.".to_string()),
        )
        .expect("complete works");

    assert_eq!(
        outcome.showing.notes.as_deref(),
        Some("Bring building fob.\nTenant asked about parking.")
    );
}

#[test]
fn every_mutation_returns_the_refreshed_full_list() {
    let service = common::service();
    let first = service.request_showing(common::request()).expect("first lands");
    let mut second_request = common::request();
    second_request.tenant_id = "tenant-44".to_string();
    let second = service.request_showing(second_request).expect("second lands");

    assert_eq!(second.all.len(), 2);

    let outcome = service
        .update_status(&first.showing.id, ShowingStatus::Confirmed, None)
        .expect("confirm works");
    assert_eq!(outcome.all.len(), 2);
    assert!(outcome
        .all
        .iter()
        .any(|showing| showing.id == second.showing.id));
}
