//! Upstream trip record source port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::TripRequest;

/// Upstream supplier of trip request lists.
///
/// The pipeline is push-based: whoever drives this port (e.g. the watch
/// loop in the CLI) loads a fresh list and hands it to the synchronizer,
/// which replaces its held copy wholesale.
#[async_trait]
pub trait TripSource: Send + Sync {
    /// Load the current list of trip requests.
    async fn load(&self) -> DomainResult<Vec<TripRequest>>;
}
