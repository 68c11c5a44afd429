//! Route computation outcome types.

use serde::{Deserialize, Serialize};

use super::trip::RequestId;

/// Outcome of one `compute_route` call against the collaborator.
///
/// `success == false` (or a missing `data` payload) means the collaborator
/// declined to produce a route; the pipeline treats it like a failure
/// except that it arrived as a well-formed response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteComputation {
    /// Whether the collaborator produced a route.
    pub success: bool,

    /// Computed payload, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RouteData>,
}

impl RouteComputation {
    /// A successful computation carrying only a geometry.
    pub fn succeeded(geometry: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(RouteData {
                geometry: geometry.into(),
                extra: serde_json::Map::new(),
            }),
        }
    }

    /// A well-formed negative outcome.
    pub fn declined() -> Self {
        Self { success: false, data: None }
    }
}

/// Payload of a successful route computation.
///
/// Beyond `geometry`, the collaborator may return additional fields
/// (distance, duration, ...); they are spread onto the matched record
/// verbatim at merge time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteData {
    /// Encoded polyline/path descriptor.
    pub geometry: String,

    /// Additional collaborator fields, applied to the record as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A successful computation bound to the record it belongs to,
/// ready to be folded into the held list.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePatch {
    /// Id of the record this patch applies to.
    pub id: RequestId,
    /// Computed geometry.
    pub geometry: String,
    /// Additional collaborator fields; they take precedence over the
    /// record's existing opaque fields.
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RoutePatch {
    /// Build a patch from a computation payload.
    pub fn new(id: RequestId, data: RouteData) -> Self {
        Self { id, geometry: data.geometry, extra: data.extra }
    }
}
