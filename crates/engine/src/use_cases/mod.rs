//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area of the collector.

pub mod export;
pub mod health;
pub mod submission;

// Re-export main types
pub use export::{ExportAll, ExportFormat, ExportOutput, ExportUseCases, GetParticipant};
pub use health::CheckHealth;
pub use submission::{RecordTimeRecord, RecordUgc, SubmissionError, SubmissionUseCases};
