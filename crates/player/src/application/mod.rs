//! Application layer - services that orchestrate the participant's visit.

pub mod dto;
pub mod services;
