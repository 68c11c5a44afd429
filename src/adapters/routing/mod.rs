//! Route computation adapters.

pub mod http;
pub mod mock;

pub use http::HttpRouteComputer;
pub use mock::{MockRouteComputer, MockRouteResponse};
