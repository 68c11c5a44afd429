//! Trip list synchronizer: holds the current view of the upstream record
//! list and drives one enrichment cycle per adoption.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::watch;

use crate::domain::models::{EnrichmentConfig, RoutePatch, TripRequest};
use crate::domain::ports::RouteComputer;
use crate::services::dedup::AttemptTracker;
use crate::services::enrichment::{CycleStats, EnrichmentOrchestrator};
use crate::services::merge::{any_match, merge_patches};

/// Mirrors the latest upstream list and opportunistically fills in
/// missing route geometries.
///
/// Each adoption replaces the held list wholesale and runs exactly one
/// enrichment cycle against it. The attempted-set lives as long as the
/// synchronizer (all clones of it), so every record id is dispatched at
/// most once per instance regardless of how often lists are re-adopted
/// or how cycles overlap.
///
/// The held list is published as an `Arc` through a watch channel:
/// subscribers get a new `Arc` on every adoption and on every merge that
/// changed at least one record, and the same `Arc` otherwise. Completions
/// that arrive after the last handle was dropped are discarded.
#[derive(Clone)]
pub struct TripListSynchronizer {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<State>,
    tx: watch::Sender<Arc<Vec<TripRequest>>>,
    orchestrator: EnrichmentOrchestrator,
}

struct State {
    held: Arc<Vec<TripRequest>>,
    tracker: AttemptTracker,
}

impl TripListSynchronizer {
    /// Create a synchronizer with an empty held list.
    pub fn new(computer: Arc<dyn RouteComputer>, config: EnrichmentConfig) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Vec::new()));
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(State {
                    held: Arc::new(Vec::new()),
                    tracker: AttemptTracker::new(),
                }),
                tx,
                orchestrator: EnrichmentOrchestrator::new(computer, config),
            }),
        }
    }

    /// Adopt a new upstream list and start one enrichment cycle.
    ///
    /// The synchronous prologue (replacement, eligibility scan, marking,
    /// publication) completes before this method returns; the route
    /// computations run on a background task and merge back when they
    /// settle. Call this exactly once per upstream change.
    ///
    /// Must be called from within a tokio runtime.
    pub fn adopt(&self, input: Vec<TripRequest>) {
        let dispatches = {
            let mut guard = self.inner.lock_state();
            let state = &mut *guard;
            state.held = Arc::new(input);
            let dispatches = self
                .inner
                .orchestrator
                .plan_cycle(&state.held, &mut state.tracker);
            self.inner.tx.send_replace(Arc::clone(&state.held));
            dispatches
        };

        if dispatches.is_empty() {
            return;
        }

        // The cycle task holds the synchronizer weakly: results arriving
        // after teardown must be detected and dropped, not applied.
        let orchestrator = self.inner.orchestrator.clone();
        let weak: Weak<Inner> = Arc::downgrade(&self.inner);
        tokio::spawn(async move {
            let dispatched = dispatches.len();
            let patches = orchestrator.dispatch(dispatches).await;
            tracing::debug!(
                dispatched,
                succeeded = patches.len(),
                "enrichment cycle settled"
            );
            if patches.is_empty() {
                return;
            }
            match weak.upgrade() {
                Some(inner) => inner.apply_patches(&patches),
                None => {
                    tracing::debug!(
                        count = patches.len(),
                        "synchronizer torn down, dropping route results"
                    );
                }
            }
        });
    }

    /// Run one full enrichment cycle to quiescence: adopt `input`,
    /// dispatch, wait for every computation to settle and merge the
    /// successes. Returns the resulting held list and cycle counters.
    ///
    /// Cycle semantics are identical to [`adopt`](Self::adopt); this is
    /// the batch entry point used by one-shot callers.
    pub async fn enrich_once(&self, input: Vec<TripRequest>) -> (Arc<Vec<TripRequest>>, CycleStats) {
        let mut stats = CycleStats { scanned: input.len(), ..CycleStats::default() };

        let dispatches = {
            let mut guard = self.inner.lock_state();
            let state = &mut *guard;
            state.held = Arc::new(input);
            let dispatches = self
                .inner
                .orchestrator
                .plan_cycle(&state.held, &mut state.tracker);
            self.inner.tx.send_replace(Arc::clone(&state.held));
            dispatches
        };
        stats.dispatched = dispatches.len();

        let patches = self.inner.orchestrator.dispatch(dispatches).await;
        stats.succeeded = patches.len();
        if !patches.is_empty() {
            self.inner.apply_patches(&patches);
        }

        (self.held(), stats)
    }

    /// Snapshot of the currently held list.
    pub fn held(&self) -> Arc<Vec<TripRequest>> {
        Arc::clone(&self.inner.lock_state().held)
    }

    /// Subscribe to held-list publications.
    ///
    /// The receiver yields the current list immediately and a new `Arc`
    /// for every adoption and every merge that changed a record. It
    /// reports closure once the last synchronizer handle is dropped.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<TripRequest>>> {
        self.inner.tx.subscribe()
    }

    /// Number of record ids ever submitted for computation.
    pub fn attempted_count(&self) -> usize {
        self.inner.lock_state().tracker.len()
    }
}

impl Inner {
    // The lock is only ever held across synchronous sections, so a
    // poisoned mutex can just be taken over.
    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply_patches(&self, patches: &[RoutePatch]) {
        let mut state = self.lock_state();
        if !any_match(&state.held, patches) {
            tracing::debug!(
                count = patches.len(),
                "no held record matches settled results, keeping current list"
            );
            return;
        }
        let merged = merge_patches(&state.held, patches);
        state.held = Arc::new(merged);
        self.tx.send_replace(Arc::clone(&state.held));
    }
}
