use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Frequency, MedicineType};
use super::ModelError;

/// A single medicine record, the central entity the scheduling engine
/// evaluates. The engine never persists or deletes these; it consumes a
/// caller-supplied snapshot and returns derived values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    /// Opaque numeric identity, assigned by the storage layer.
    pub id: i64,
    pub name: String,
    pub dosage: String,
    pub quantity_total: u32,
    pub quantity_remaining: u32,
    pub medicine_type: MedicineType,
    /// Single scheduled time-of-day; ignored when `multi_dose` is set.
    pub scheduled_time: NaiveTime,
    pub notes: String,
    pub active: bool,
    pub is_insulin: bool,
    pub frequency: Frequency,
    /// Epoch milliseconds, interpreted as a local calendar date.
    pub start_date_ms: i64,
    /// Weekdays the medicine is due; meaningful only for `Frequency::Custom`.
    pub custom_days: Vec<Weekday>,
    /// Explicit per-day dose times; consulted only when `multi_dose` is set.
    pub dose_times: Vec<NaiveTime>,
    pub multi_dose: bool,
    pub taken_today: bool,
    /// When a dose was last taken, in epoch ms. Survives the day rollover
    /// so the alternating-group carry-over check can look at yesterday.
    pub last_taken_ms: Option<i64>,
    /// When today's dose was taken, in epoch ms; cleared at day rollover.
    pub taken_at_ms: Option<i64>,
    pub missed_count: u32,
    /// `None` = standalone medicine. Group membership carries its own
    /// schedule fields, so a standalone record cannot hold a stray order
    /// or group name.
    pub group: Option<GroupMember>,
}

/// Group membership for medicines whose schedules are coupled
/// (alternating "A on even days, B on odd days" pairs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: Uuid,
    /// Human-readable group name; non-blank by construction.
    pub name: String,
    /// 1-based position within the group; decides the day-parity role.
    pub order: u32,
    /// Group-level start date (epoch ms), possibly distinct from the
    /// medicine's own start date.
    pub start_date_ms: i64,
    pub frequency: Frequency,
    /// Drift-detection fingerprint; `None` until first computed.
    pub fingerprint: Option<String>,
}

impl Medicine {
    /// Create a medicine with lifecycle defaults: daily, active, not taken.
    pub fn new(id: i64, name: impl Into<String>, start_date_ms: i64) -> Self {
        Self {
            id,
            name: name.into(),
            dosage: String::new(),
            quantity_total: 0,
            quantity_remaining: 0,
            medicine_type: MedicineType::Tablet,
            scheduled_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            notes: String::new(),
            active: true,
            is_insulin: false,
            frequency: Frequency::Daily,
            start_date_ms,
            custom_days: Vec::new(),
            dose_times: Vec::new(),
            multi_dose: false,
            taken_today: false,
            last_taken_ms: None,
            taken_at_ms: None,
            missed_count: 0,
            group: None,
        }
    }

    /// Start date as a local calendar date. The scheduling predicates
    /// degrade to "not due" on a malformed timestamp; this accessor is
    /// for callers (editing screens, repair tools) that need the failure
    /// surfaced instead of swallowed.
    pub fn start_date(&self) -> Result<NaiveDate, ModelError> {
        crate::schedule::dates::local_date_of_millis(self.start_date_ms)
            .ok_or(ModelError::InvalidTimestamp { millis: self.start_date_ms })
    }

    /// Record a dose as taken now. Decrements the remaining quantity and
    /// stamps both taken timestamps. The caller owns persisting the change.
    pub fn mark_taken(&mut self, now_ms: i64) {
        self.quantity_remaining = self.quantity_remaining.saturating_sub(1);
        self.taken_today = true;
        self.taken_at_ms = Some(now_ms);
        self.last_taken_ms = Some(now_ms);
    }

    /// Record a dose as deliberately skipped.
    pub fn mark_skipped(&mut self) {
        self.missed_count = self.missed_count.saturating_add(1);
    }

    /// Day-rollover reset, invoked by the host application when a new
    /// calendar day begins. The evaluator itself never calls this; it is
    /// date-parameterized and stateless per call. `last_taken_ms` is kept
    /// so yesterday's take remains visible to the carry-over check.
    pub fn reset_new_day(&mut self) {
        self.taken_today = false;
        self.taken_at_ms = None;
    }
}
