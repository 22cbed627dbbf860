//! The scheduling engine proper: pure functions over a point-in-time
//! snapshot of medicine records. Callers pass the target date and "now"
//! explicitly; nothing here reads a hidden clock or mutates a record.

pub mod alternating;
pub mod dates;
pub mod evaluator;
pub mod group;
pub mod status;

pub use alternating::is_group_member_due_on;
pub use evaluator::is_due_on;
pub use group::{group_fingerprint, repair_group, validate_group, GroupIssue, GroupValidation};
pub use status::{is_overdue_on, project_statuses, status_of, StatusSnapshot};
