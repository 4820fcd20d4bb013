//! UgcLab Shared - Wire contract between the participant runtime and the collector
//!
//! This crate contains the JSON bodies exchanged over the collector's HTTP
//! surface and the records it persists:
//! - Request bodies and their validation
//! - Stored participant records
//! - Response envelopes
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json, thiserror and the domain
//! 2. **No I/O** - Pure data types, serialization and validation
//! 3. **camelCase on the wire** - Field names match what existing clients send

pub mod records;
pub mod requests;
pub mod responses;

pub use records::{ParticipantData, TimeRecord, UgcContent};
pub use requests::{TimeRecordSubmission, UgcSubmission, ValidationError};
pub use responses::{CreatedResponse, ErrorResponse, ExportEnvelope, HealthResponse};
