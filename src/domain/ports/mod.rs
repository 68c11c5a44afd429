//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters
//! must implement:
//! - `RouteComputer`: route computation collaborator
//! - `TripSource`: upstream trip record supplier
//!
//! These traits define the contracts that allow the domain to be
//! independent of specific infrastructure implementations.

pub mod route_computer;
pub mod trip_source;

pub use route_computer::RouteComputer;
pub use trip_source::TripSource;
