//! Route computation collaborator port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{RequestId, RouteComputation};

/// External collaborator that computes a travel geometry between two
/// city names.
///
/// The collaborator owns any backing persistence of the computed route;
/// the pipeline only consumes the returned payload. Timeout policy, if
/// any, belongs to the implementation.
#[async_trait]
pub trait RouteComputer: Send + Sync {
    /// Compute a route for the given record.
    ///
    /// An `Err` is a transport/collaborator failure; an `Ok` with
    /// `success == false` is a well-formed negative outcome. Both are
    /// treated as non-enrichment by the caller.
    async fn compute_route(
        &self,
        id: &RequestId,
        origin: &str,
        destination: &str,
    ) -> DomainResult<RouteComputation>;
}
