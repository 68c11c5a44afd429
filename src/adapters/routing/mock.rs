//! Mock route computer for testing.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{RequestId, RouteComputation, RouteData};
use crate::domain::ports::RouteComputer;

/// Scripted response configuration.
#[derive(Debug, Clone, Default)]
pub struct MockRouteResponse {
    /// Whether the computation succeeds.
    success: bool,
    /// Geometry returned on success.
    geometry: Option<String>,
    /// Extra payload fields returned on success.
    extra: serde_json::Map<String, serde_json::Value>,
    /// Error to return instead of a response.
    error: Option<String>,
    /// Optional gate: the call does not settle until notified.
    gate: Option<Arc<Notify>>,
}

impl MockRouteResponse {
    /// A successful computation with the given geometry.
    pub fn success(geometry: impl Into<String>) -> Self {
        Self {
            success: true,
            geometry: Some(geometry.into()),
            ..Self::default()
        }
    }

    /// A well-formed negative outcome (`success == false`).
    pub fn declined() -> Self {
        Self::default()
    }

    /// A transport-level failure.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Attach an extra payload field to a successful response.
    pub fn with_field(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Gate the response: the call blocks until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

/// In-memory route computer with scripted per-id responses, a call log
/// and optional gating for overlap/teardown scenarios.
pub struct MockRouteComputer {
    responses: Mutex<HashMap<RequestId, MockRouteResponse>>,
    default_response: MockRouteResponse,
    calls: Mutex<Vec<RequestId>>,
    call_signal: Notify,
}

impl MockRouteComputer {
    /// Create a mock that answers `success("mock-poly")` by default.
    pub fn new() -> Self {
        Self::with_default_response(MockRouteResponse::success("mock-poly"))
    }

    /// Create a mock with a custom default response.
    pub fn with_default_response(default_response: MockRouteResponse) -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            default_response,
            calls: Mutex::new(Vec::new()),
            call_signal: Notify::new(),
        }
    }

    /// Script the response for one record id.
    pub fn set_response(&self, id: impl Into<RequestId>, response: MockRouteResponse) {
        lock(&self.responses).insert(id.into(), response);
    }

    /// Ids dispatched so far, in call order.
    pub fn calls(&self) -> Vec<RequestId> {
        lock(&self.calls).clone()
    }

    /// Wait until at least `n` calls have been dispatched.
    pub async fn wait_for_calls(&self, n: usize) {
        loop {
            if lock(&self.calls).len() >= n {
                return;
            }
            self.call_signal.notified().await;
        }
    }
}

impl Default for MockRouteComputer {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl RouteComputer for MockRouteComputer {
    async fn compute_route(
        &self,
        id: &RequestId,
        _origin: &str,
        _destination: &str,
    ) -> DomainResult<RouteComputation> {
        let response = {
            let mut calls = lock(&self.calls);
            calls.push(id.clone());
            lock(&self.responses)
                .get(id)
                .cloned()
                .unwrap_or_else(|| self.default_response.clone())
        };
        self.call_signal.notify_one();

        if let Some(gate) = &response.gate {
            gate.notified().await;
        }

        if let Some(error) = response.error {
            return Err(DomainError::RouteRequest(error));
        }
        if !response.success {
            return Ok(RouteComputation::declined());
        }
        Ok(RouteComputation {
            success: true,
            data: response.geometry.map(|geometry| RouteData {
                geometry,
                extra: response.extra,
            }),
        })
    }
}
