//! Domain models.

pub mod config;
pub mod route;
pub mod trip;

pub use config::{Config, EnrichmentConfig, LoggingConfig, RoutingConfig};
pub use route::{RouteComputation, RouteData, RoutePatch};
pub use trip::{RequestId, TripRequest};
