//! Collaborator seams. The engine itself is pure; these traits are what
//! a host application plugs in around it: a persistence layer read
//! before each evaluation and written after any mutation, a clock for
//! "now"/"today" in local time, and a notification sink that observes
//! computed statuses without feeding back into the core.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::models::Medicine;
use crate::schedule::StatusSnapshot;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Persistence layer for the full medicine collection.
pub trait MedicineStore {
    fn load_all(&self) -> Result<Vec<Medicine>, StoreError>;
    fn save_all(&mut self, medicines: &[Medicine]) -> Result<(), StoreError>;
}

/// Local-time source. The engine never reads this itself; hosts resolve
/// "now"/"today" once per evaluation and pass the values in explicitly.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    fn now_naive(&self) -> NaiveDateTime {
        self.now().naive_local()
    }
}

/// The device clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Notification layer: told what the engine computed, never consulted.
pub trait ReminderSink {
    fn on_status(&mut self, snapshot: &StatusSnapshot);
}

/// Trivial store used in tests and by hosts that keep records in memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    medicines: Vec<Medicine>,
}

impl InMemoryStore {
    pub fn new(medicines: Vec<Medicine>) -> Self {
        Self { medicines }
    }
}

impl MedicineStore for InMemoryStore {
    fn load_all(&self) -> Result<Vec<Medicine>, StoreError> {
        Ok(self.medicines.clone())
    }

    fn save_all(&mut self, medicines: &[Medicine]) -> Result<(), StoreError> {
        self.medicines = medicines.to_vec();
        Ok(())
    }
}
