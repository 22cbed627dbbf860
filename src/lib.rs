//! Dosewise — the dosage scheduling engine behind a personal
//! medication-reminder app.
//!
//! The engine is pure computation over a caller-supplied snapshot of
//! medicine records: per-frequency "due today" rules, the alternating
//! two-medicine group scheduler, group-consistency validation with a
//! drift fingerprint, and the status projector that layers taken-state
//! and time-of-day on top. Persistence, notification delivery, and UI
//! are external collaborators (see [`store`]).

pub mod config;
pub mod models;
pub mod schedule;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for host applications that have no subscriber of
/// their own. Honors `RUST_LOG`, falling back to the crate default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("dosewise engine v{}", config::ENGINE_VERSION);
}
