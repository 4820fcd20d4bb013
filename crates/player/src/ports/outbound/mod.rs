//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to talk to the collector and read the time
//! without depending on concrete implementations.

pub mod clock_port;
pub mod collector_port;

pub use clock_port::ClockPort;
pub use collector_port::{CollectorError, CollectorPort};

#[cfg(test)]
pub use clock_port::MockClockPort;
#[cfg(test)]
pub use collector_port::MockCollectorPort;
