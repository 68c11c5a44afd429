//! Deduplication tracker for route computation attempts.

use std::collections::HashSet;

use crate::domain::models::RequestId;

/// Lifetime-scoped set of record ids already submitted for computation.
///
/// Membership is monotonic: once an id is marked there is no removal, no
/// TTL and no invalidation for the life of the owning synchronizer. A
/// record whose computation failed is therefore never retried by the same
/// instance. The set is plain owned state, mutated only inside the
/// synchronous portion of a cycle, which keeps marking atomic with the
/// eligibility scan.
#[derive(Debug, Default)]
pub struct AttemptTracker {
    attempted: HashSet<RequestId>,
}

impl AttemptTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an id as attempted. Idempotent; returns `true` if the id was
    /// not previously marked.
    pub fn mark_attempted(&mut self, id: &RequestId) -> bool {
        self.attempted.insert(id.clone())
    }

    /// Whether an id has ever been submitted for computation.
    pub fn has_attempted(&self, id: &RequestId) -> bool {
        self.attempted.contains(id)
    }

    /// Number of ids ever attempted.
    pub fn len(&self) -> usize {
        self.attempted.len()
    }

    /// Whether no id has been attempted yet.
    pub fn is_empty(&self) -> bool {
        self.attempted.is_empty()
    }
}
