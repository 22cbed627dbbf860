//! Alternating-group rule: a two-medicine pair where order 1 is due on
//! even days since the group started and order 2 on odd days. Parity is
//! computed from days-since-start, so a missed dose never shifts the
//! schedule; a carry-over check suppresses the one false-positive that
//! parity alone produces the day after a dose was taken.

use chrono::NaiveDate;

use crate::models::Medicine;
use crate::schedule::dates::{days_between, local_date_of_millis};

/// Raw alternating due-ness for one group member on one date. Group
/// consistency is gated upstream in [`crate::schedule::is_due_on`]; this
/// function assumes its member comes from an already-validated group.
pub fn is_group_member_due_on(med: &Medicine, date: NaiveDate) -> bool {
    let Some(group) = med.group.as_ref() else {
        return false;
    };

    // Group-level start date wins; fall back to the medicine's own start
    // when the group field was never populated.
    let start_ms = if group.start_date_ms > 0 {
        group.start_date_ms
    } else {
        med.start_date_ms
    };
    let Some(start) = local_date_of_millis(start_ms) else {
        return false;
    };

    let days_since_start = days_between(start, date);
    if days_since_start < 0 {
        return false;
    }
    let group_day = days_since_start.rem_euclid(2);

    let base_due = match group.order {
        1 => group_day == 0,
        2 => group_day == 1,
        other => {
            tracing::warn!(
                medicine_id = med.id,
                order = other,
                "alternating group supports only orders 1 and 2, treating as never due"
            );
            return false;
        }
    };

    // Carry-over: a dose taken yesterday must not resurface today when
    // today belongs to the other member. When the parity rule itself
    // calls for the medicine again, it stays due regardless.
    if taken_on_previous_day(med, date) && !base_due {
        return false;
    }

    base_due
}

/// Was this medicine actually taken on the calendar day before `date`?
fn taken_on_previous_day(med: &Medicine, date: NaiveDate) -> bool {
    let Some(yesterday) = date.pred_opt() else {
        return false;
    };
    med.last_taken_ms
        .and_then(local_date_of_millis)
        .is_some_and(|taken| taken == yesterday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Frequency, GroupMember};
    use crate::schedule::dates::millis_of_local;
    use chrono::{Duration, NaiveTime};
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn noon() -> NaiveTime {
        NaiveTime::from_hms_opt(12, 0, 0).unwrap()
    }

    fn member(id: i64, order: u32, group_start: NaiveDate) -> Medicine {
        let mut med = Medicine::new(id, format!("med-{id}"), millis_of_local(group_start, noon()));
        med.group = Some(GroupMember {
            id: Uuid::new_v4(),
            name: "alternating pair".into(),
            order,
            start_date_ms: millis_of_local(group_start, noon()),
            frequency: Frequency::EveryOtherDay,
            fingerprint: None,
        });
        med
    }

    #[test]
    fn order_one_takes_even_days() {
        let start = date(2026, 4, 6);
        let med = member(1, 1, start);
        for offset in [0i64, 2, 4, 6] {
            assert!(is_group_member_due_on(&med, start + Duration::days(offset)));
        }
        for offset in [1i64, 3, 5] {
            assert!(!is_group_member_due_on(&med, start + Duration::days(offset)));
        }
    }

    #[test]
    fn order_two_takes_odd_days() {
        let start = date(2026, 4, 6);
        let med = member(2, 2, start);
        assert!(!is_group_member_due_on(&med, start));
        assert!(is_group_member_due_on(&med, start + Duration::days(1)));
        assert!(!is_group_member_due_on(&med, start + Duration::days(2)));
    }

    #[test]
    fn exactly_one_member_due_each_day() {
        let start = date(2026, 4, 6);
        let a = member(1, 1, start);
        let b = member(2, 2, start);
        for offset in 0..14 {
            let day = start + Duration::days(offset);
            let due_a = is_group_member_due_on(&a, day);
            let due_b = is_group_member_due_on(&b, day);
            assert!(due_a ^ due_b, "day offset {offset}: expected exactly one due");
        }
    }

    #[test]
    fn never_due_before_group_start() {
        let start = date(2026, 4, 6);
        let a = member(1, 1, start);
        assert!(!is_group_member_due_on(&a, start - Duration::days(1)));
        assert!(!is_group_member_due_on(&a, start - Duration::days(2)));
    }

    #[test]
    fn falls_back_to_own_start_when_group_start_unset() {
        let own_start = date(2026, 4, 7);
        let mut med = member(1, 1, own_start);
        if let Some(g) = med.group.as_mut() {
            g.start_date_ms = 0;
        }
        assert!(is_group_member_due_on(&med, own_start));
        assert!(!is_group_member_due_on(&med, own_start + Duration::days(1)));
    }

    #[test]
    fn carry_over_suppresses_next_day_flicker() {
        let start = date(2026, 4, 6);
        let mut a = member(1, 1, start);
        // Taken on its own even day; the next day belongs to order 2.
        a.mark_taken(millis_of_local(start, NaiveTime::from_hms_opt(9, 30, 0).unwrap()));
        assert!(!is_group_member_due_on(&a, start + Duration::days(1)));
    }

    #[test]
    fn carry_over_never_suppresses_a_scheduled_day() {
        let start = date(2026, 4, 6);
        let mut a = member(1, 1, start);
        // Taken on day 1 (off-schedule, e.g. late); day 2 is still its day.
        a.mark_taken(millis_of_local(start + Duration::days(1), noon()));
        assert!(is_group_member_due_on(&a, start + Duration::days(2)));
    }

    #[test]
    fn take_two_days_ago_does_not_affect_today() {
        let start = date(2026, 4, 6);
        let mut a = member(1, 1, start);
        a.mark_taken(millis_of_local(start, noon()));
        // Two days later is a's scheduled day again.
        assert!(is_group_member_due_on(&a, start + Duration::days(2)));
    }

    #[test]
    fn unsupported_order_is_never_due() {
        let start = date(2026, 4, 6);
        let med = member(1, 3, start);
        for offset in 0..4 {
            assert!(!is_group_member_due_on(&med, start + Duration::days(offset)));
        }
    }

    #[test]
    fn ungrouped_medicine_is_not_an_alternating_member() {
        let med = Medicine::new(1, "standalone", millis_of_local(date(2026, 4, 6), noon()));
        assert!(!is_group_member_due_on(&med, date(2026, 4, 6)));
    }
}
