//! UgcLab Player library.
//!
//! The participant-side runtime: it loads authored content, keeps the
//! per-participant session, drives guided tours and reports telemetry to
//! the collector.
//!
//! ## Structure
//!
//! - `application/` - Content repository, session store, telemetry, task gate
//!   and the tour session driver
//! - `infrastructure/` - Collector HTTP client, content file loader, clocks
//! - `ports/` - Outbound interfaces the application depends on
//! - `config` - Environment configuration

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;

pub use config::PlayerConfig;
