//! Domain Events
//!
//! Aggregate mutations return these instead of performing side effects.

pub mod tour_events;

pub use tour_events::TourEvent;
