//! # UgcLab Domain Types
//!
//! Shared vocabulary types used by the domain, the wire contract and both
//! applications.
//!
//! ## Design Principles
//!
//! 1. **Pure data types** - No I/O, no async, no side effects
//! 2. **Stable API** - Changes here affect the collector's stored records
//! 3. **Serializable** - All types derive Serialize/Deserialize

mod mode;

pub use mode::{ModeType, TourMode};
