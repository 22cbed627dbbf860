//! Status projection: layers taken-state and time-of-day on top of the
//! due rules to produce the single status a reminder surface displays.
//!
//! The overdue grace period is an explicit parameter. Two call-site
//! conventions exist (see `config`): the generic overdue check uses one
//! hour, the live on-screen projection one minute.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::config;
use crate::models::{DoseStatus, Medicine};
use crate::schedule::dates::local_date_of_millis;
use crate::schedule::evaluator::is_due_on;

/// One medicine's projected status, for list rendering and reminder
/// delivery.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub medicine_id: i64,
    pub name: String,
    pub status: DoseStatus,
}

/// Project a medicine's display status for `date` as of `now`.
///
/// Order matters: not due at all wins, then taken-today, then the
/// time-of-day partition. When every scheduled time has passed but none
/// by more than `grace`, the dose is reported overdue rather than
/// silently dropped.
pub fn status_of(
    med: &Medicine,
    date: NaiveDate,
    now: NaiveDateTime,
    grace: Duration,
    scope: &[Medicine],
) -> DoseStatus {
    if !is_due_on(med, date, scope) {
        return DoseStatus::NotToday;
    }

    let taken_on_date = med
        .last_taken_ms
        .and_then(local_date_of_millis)
        .is_some_and(|taken| taken == date);
    if taken_on_date {
        return DoseStatus::TakenToday;
    }

    let mut any_future = false;
    let mut any_overdue = false;
    for time in dose_times_for(med) {
        let scheduled = date.and_time(time);
        if scheduled > now {
            any_future = true;
        } else if now - scheduled > grace {
            any_overdue = true;
        }
    }

    if any_overdue {
        DoseStatus::Overdue
    } else if any_future {
        DoseStatus::Upcoming
    } else {
        // All times passed within the grace window: still owed today.
        DoseStatus::Overdue
    }
}

/// Generic "has this dose slipped" check, using the inherited one-hour
/// threshold.
pub fn is_overdue_on(
    med: &Medicine,
    date: NaiveDate,
    now: NaiveDateTime,
    scope: &[Medicine],
) -> bool {
    status_of(med, date, now, config::grace_overdue_check(), scope) == DoseStatus::Overdue
}

/// Project statuses across a whole snapshot, skipping inactive records.
/// This is the list-screen operation; callers hand each snapshot entry
/// to their notification layer as they see fit.
pub fn project_statuses(
    scope: &[Medicine],
    date: NaiveDate,
    now: NaiveDateTime,
    grace: Duration,
) -> Vec<StatusSnapshot> {
    scope
        .iter()
        .filter(|med| med.active)
        .map(|med| StatusSnapshot {
            medicine_id: med.id,
            name: med.name.clone(),
            status: status_of(med, date, now, grace, scope),
        })
        .collect()
}

/// The scheduled times-of-day for one date: the explicit dose list in
/// multi-dose mode, the single scheduled time otherwise.
fn dose_times_for(med: &Medicine) -> Vec<NaiveTime> {
    if med.multi_dose && !med.dose_times.is_empty() {
        med.dose_times.clone()
    } else {
        vec![med.scheduled_time]
    }
}
