//! Per-frequency due rules. `is_due_on` is the engine's entry point:
//! a pure predicate over one medicine, one target date, and the snapshot
//! of records in scope (needed only to locate group siblings).

use chrono::{Datelike, NaiveDate};

use crate::models::{Frequency, Medicine};
use crate::schedule::alternating::is_group_member_due_on;
use crate::schedule::dates::{days_between, local_date_of_millis};
use crate::schedule::group::validate_group;

/// Is a dose of this medicine called for on `date`?
///
/// A medicine is never due before its start date, and a malformed start
/// timestamp degrades to "not due". Group members are gated through
/// consistency validation and then handed to the alternating rule; the
/// per-frequency table below applies only to standalone medicines.
pub fn is_due_on(med: &Medicine, date: NaiveDate, scope: &[Medicine]) -> bool {
    let Some(start) = local_date_of_millis(med.start_date_ms) else {
        return false;
    };
    if date < start {
        return false;
    }

    if let Some(group) = med.group.as_ref() {
        let mut members: Vec<&Medicine> = scope
            .iter()
            .filter(|m| m.group.as_ref().is_some_and(|g| g.id == group.id))
            .collect();
        if !members.iter().any(|m| m.id == med.id) {
            members.push(med);
        }

        let validation = validate_group(&members);
        if !validation.valid {
            // Fail closed: no member of an inconsistent group is ever due.
            if let Some(reason) = validation.reason() {
                tracing::warn!(
                    medicine_id = med.id,
                    group_id = %group.id,
                    %reason,
                    "group inconsistent, scheduling refused"
                );
            }
            return false;
        }
        return is_group_member_due_on(med, date);
    }

    let days_since_start = days_between(start, date);
    match med.frequency {
        Frequency::Daily => true,
        Frequency::EveryOtherDay => days_since_start % 2 == 0,
        // Day-count arithmetic, not calendar-week anchoring: due two of
        // every three days. Inherited approximation of "twice a week".
        Frequency::TwiceAWeek => matches!(days_since_start % 3, 0 | 1),
        // Inherited formula, identical to EveryOtherDay in the schedule
        // this engine replaces; kept verbatim for compatibility.
        Frequency::ThreeTimesAWeek => days_since_start % 2 == 0,
        Frequency::Weekly => days_since_start % 7 == 0,
        Frequency::Custom => med.custom_days.contains(&date.weekday()),
    }
}
