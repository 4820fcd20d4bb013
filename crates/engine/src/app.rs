//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, ParticipantStore};
use crate::use_cases;

/// Main application state.
///
/// Holds all use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub submission: use_cases::SubmissionUseCases,
    pub export: use_cases::ExportUseCases,
    pub health: Arc<use_cases::CheckHealth>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(store: Arc<dyn ParticipantStore>, clock: Arc<dyn ClockPort>) -> Self {
        let submission = use_cases::SubmissionUseCases::new(
            Arc::new(use_cases::RecordUgc::new(store.clone())),
            Arc::new(use_cases::RecordTimeRecord::new(store.clone())),
        );
        let export = use_cases::ExportUseCases::new(
            Arc::new(use_cases::ExportAll::new(store.clone())),
            Arc::new(use_cases::GetParticipant::new(store.clone())),
        );
        let health = Arc::new(use_cases::CheckHealth::new(store, clock));

        Self {
            use_cases: UseCases {
                submission,
                export,
                health,
            },
        }
    }
}
