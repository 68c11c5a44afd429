//! HTTP route computation client.
//!
//! Speaks a small JSON protocol with the route service: one POST per
//! record to `<base_url>/routes`, answered by a `{success, data}` body.
//! The service persists its own results; this client only relays them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{RequestId, RouteComputation, RoutingConfig};
use crate::domain::ports::RouteComputer;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteRequestBody<'a> {
    id: &'a str,
    origin: &'a str,
    destination: &'a str,
}

/// HTTP client for the route computation service.
#[derive(Debug, Clone)]
pub struct HttpRouteComputer {
    http: Client,
    base_url: String,
}

impl HttpRouteComputer {
    /// Build a client from routing configuration.
    pub fn new(config: &RoutingConfig) -> DomainResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RouteComputer for HttpRouteComputer {
    async fn compute_route(
        &self,
        id: &RequestId,
        origin: &str,
        destination: &str,
    ) -> DomainResult<RouteComputation> {
        let url = format!("{}/routes", self.base_url);
        let body = RouteRequestBody {
            id: id.as_str(),
            origin,
            destination,
        };

        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::RouteRequest(format!(
                "route service answered {status} for {id}"
            )));
        }

        response
            .json::<RouteComputation>()
            .await
            .map_err(|err| DomainError::InvalidResponse(err.to_string()))
    }
}
