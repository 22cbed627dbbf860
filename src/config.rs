use chrono::Duration;

/// Engine-level constants
pub const ENGINE_NAME: &str = "Dosewise";
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Grace period for the generic "has this dose become overdue" check.
/// Inherited call-site threshold; see `schedule::status::is_overdue_on`.
pub fn grace_overdue_check() -> Duration {
    Duration::hours(1)
}

/// Grace period for the live status projection shown on screen.
/// Inherited call-site threshold; pass to `schedule::status::status_of`.
pub fn grace_live_status() -> Duration {
    Duration::minutes(1)
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "dosewise=info"
}
