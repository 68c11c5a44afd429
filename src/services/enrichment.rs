//! Enrichment orchestrator: eligibility scan, concurrent fan-out and
//! fan-in of route computations.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Semaphore;

use crate::domain::models::{EnrichmentConfig, RequestId, RoutePatch, TripRequest};
use crate::domain::ports::RouteComputer;
use crate::services::dedup::AttemptTracker;

/// One route computation slated for dispatch.
///
/// Carries a snapshot of the endpoint names so the computation is
/// unaffected by later replacements of the held list.
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// Record the computation belongs to.
    pub id: RequestId,
    /// Origin city display name.
    pub origin: String,
    /// Destination city display name.
    pub destination: String,
}

/// Counters for one enrichment cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Records inspected by the eligibility scan.
    pub scanned: usize,
    /// Computations dispatched (equals newly marked ids).
    pub dispatched: usize,
    /// Computations that produced a usable route.
    pub succeeded: usize,
}

/// Selects eligible records, fans out route computations and collects
/// the successful results.
///
/// The orchestrator is cheap to clone; clones share the underlying
/// collaborator handle, so an in-flight cycle can outlive the handle it
/// was started from.
#[derive(Clone)]
pub struct EnrichmentOrchestrator {
    computer: Arc<dyn RouteComputer>,
    config: EnrichmentConfig,
}

impl EnrichmentOrchestrator {
    /// Create an orchestrator over the given collaborator.
    pub fn new(computer: Arc<dyn RouteComputer>, config: EnrichmentConfig) -> Self {
        Self { computer, config }
    }

    /// Synchronous prologue of a cycle: scan `list` for eligible records
    /// and mark every one of them attempted before anything is dispatched.
    ///
    /// A record is eligible iff it has no geometry, both endpoint names
    /// are present and non-empty, and its id has not been attempted. A
    /// record missing an endpoint name is skipped without being marked,
    /// so it is rescanned on every future cycle. Marking before dispatch
    /// closes the re-entrancy window: a cycle starting while this one's
    /// computations are still outstanding cannot select the same record.
    ///
    /// This method contains no suspension point.
    pub fn plan_cycle(&self, list: &[TripRequest], tracker: &mut AttemptTracker) -> Vec<Dispatch> {
        let mut dispatches = Vec::new();

        for record in list {
            if record.is_enriched() {
                continue;
            }
            let (Some(origin), Some(destination)) =
                (record.origin_city.as_deref(), record.destination_city.as_deref())
            else {
                continue;
            };
            if origin.trim().is_empty() || destination.trim().is_empty() {
                continue;
            }
            if !tracker.mark_attempted(&record.id) {
                continue;
            }
            dispatches.push(Dispatch {
                id: record.id.clone(),
                origin: origin.to_string(),
                destination: destination.to_string(),
            });
        }

        tracing::debug!(
            scanned = list.len(),
            eligible = dispatches.len(),
            "enrichment cycle planned"
        );
        dispatches
    }

    /// Fan out one collaborator call per dispatch, concurrently, and wait
    /// for all of them to settle.
    ///
    /// Failures and negative outcomes are logged and dropped; one slow or
    /// failing call never blocks or discards the others' results. The
    /// returned patches are the successful computations only.
    pub async fn dispatch(&self, dispatches: Vec<Dispatch>) -> Vec<RoutePatch> {
        if dispatches.is_empty() {
            return Vec::new();
        }

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));

        let calls = dispatches.into_iter().map(|dispatch| {
            let computer = Arc::clone(&self.computer);
            let semaphore = Arc::clone(&semaphore);
            async move {
                // The semaphore is never closed while calls are pending.
                let _permit = semaphore.acquire_owned().await.ok()?;
                match computer
                    .compute_route(&dispatch.id, &dispatch.origin, &dispatch.destination)
                    .await
                {
                    Ok(outcome) if outcome.success => match outcome.data {
                        Some(data) => Some(RoutePatch::new(dispatch.id, data)),
                        None => {
                            tracing::debug!(
                                id = %dispatch.id,
                                "route computation succeeded without payload, skipping"
                            );
                            None
                        }
                    },
                    Ok(_) => {
                        tracing::debug!(id = %dispatch.id, "route computation declined");
                        None
                    }
                    Err(err) => {
                        tracing::warn!(id = %dispatch.id, error = %err, "route computation failed");
                        None
                    }
                }
            }
        });

        join_all(calls).await.into_iter().flatten().collect()
    }
}
