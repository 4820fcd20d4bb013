//! Common utilities shared across the domain.

mod string;

pub use string::none_if_blank;
