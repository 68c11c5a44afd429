//! Trip request domain model.
//!
//! Trip requests are owned by the upstream record source; the enrichment
//! pipeline treats them as value types and only ever writes the route
//! geometry. Every field the pipeline does not understand is carried in an
//! opaque pass-through map.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque, stable identifier of a trip request.
///
/// Upstream document ids are arbitrary strings; the pipeline only relies on
/// equality and hashing, never on the shape of the id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Create a request id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A trip-intent record as supplied by the upstream source.
///
/// `geometry` presence means the record is already enriched. `origin_city`
/// and `destination_city` are display names and may be missing; a record
/// missing either is never dispatched for route computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    /// Stable identifier, unique within one input list.
    pub id: RequestId,

    /// Display name of the origin city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_city: Option<String>,

    /// Display name of the destination city.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_city: Option<String>,

    /// Encoded polyline/path descriptor; `Some` means enriched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,

    /// When the trip was requested upstream; passed through unmodified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_at: Option<DateTime<Utc>>,

    /// Fields the pipeline does not interpret; passed through unmodified.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TripRequest {
    /// Create a bare request with endpoints and no geometry.
    pub fn new(
        id: impl Into<RequestId>,
        origin: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            origin_city: Some(origin.into()),
            destination_city: Some(destination.into()),
            geometry: None,
            requested_at: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Whether a route geometry is already attached.
    pub fn is_enriched(&self) -> bool {
        self.geometry.is_some()
    }

    /// Whether both endpoint city names are present and non-empty.
    pub fn has_endpoints(&self) -> bool {
        fn present(name: Option<&String>) -> bool {
            name.is_some_and(|n| !n.trim().is_empty())
        }
        present(self.origin_city.as_ref()) && present(self.destination_city.as_ref())
    }

    /// Whether this record is a candidate for route computation,
    /// ignoring the attempted-set check.
    pub fn needs_route(&self) -> bool {
        !self.is_enriched() && self.has_endpoints()
    }
}
