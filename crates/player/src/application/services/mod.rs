//! Application services
//!
//! One service per concern. `ExperimentSession` composes them into the
//! participant's flow through the app; `TourSession` drives a single guided
//! tour on top of the narrative engine.

pub mod content_repository;
pub mod experiment;
pub mod session_store;
pub mod task_gate;
pub mod telemetry;
pub mod tour_session;

pub use content_repository::ContentRepository;
pub use experiment::{ExperimentSession, ModeEntry, NavigationError};
pub use session_store::SessionStore;
pub use task_gate::{LeaveOutcome, TaskGate};
pub use telemetry::Telemetry;
pub use tour_session::TourSession;
