//! UgcLab Engine library.
//!
//! This crate contains the remote collector that stores participant
//! submissions and dwell times for later analysis.
//!
//! ## Structure
//!
//! - `use_cases/` - Submission, export and health orchestration
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition
//! - `config` - Environment configuration

pub mod api;
pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::CollectorConfig;
