//! Wayline - Trip-Request Route Enrichment
//!
//! Wayline mirrors an externally-sourced list of trip requests and
//! opportunistically fills in missing route geometries by calling an
//! external route computation service, guaranteeing at-most-once dispatch
//! per record and immutable merge-back of results.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure business logic and domain models
//! - **Service Layer** (`services`): The enrichment pipeline
//! - **Adapters** (`adapters`): Route service clients and trip sources
//! - **Infrastructure Layer** (`infrastructure`): Configuration loading
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use wayline::adapters::routing::HttpRouteComputer;
//! use wayline::domain::models::{Config, TripRequest};
//! use wayline::services::TripListSynchronizer;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let computer = Arc::new(HttpRouteComputer::new(&config.routing)?);
//!     let sync = TripListSynchronizer::new(computer, config.enrichment);
//!     let (held, _stats) = sync
//!         .enrich_once(vec![TripRequest::new("t1", "Avignon", "Brest")])
//!         .await;
//!     println!("{:?}", held);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    Config, EnrichmentConfig, LoggingConfig, RequestId, RouteComputation, RouteData, RoutePatch,
    RoutingConfig, TripRequest,
};
pub use domain::ports::{RouteComputer, TripSource};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AttemptTracker, CycleStats, EnrichmentOrchestrator, TripListSynchronizer};
