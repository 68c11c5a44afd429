//! Infrastructure adapters for external systems.

pub mod routing;
pub mod source;
