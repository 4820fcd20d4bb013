//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the collector. Everything else is concrete types.
//! Ports exist for:
//! - Participant storage (could swap the JSON file for a database)
//! - Clock (for testing)

mod error;
mod repos;
mod testing;

pub use error::StoreError;
pub use repos::ParticipantStore;
pub use testing::ClockPort;

#[cfg(test)]
pub use repos::MockParticipantStore;
#[cfg(test)]
pub use testing::MockClockPort;
