// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authenticated request forwarding.
//!
//! The forwarder sends a verified request to a downstream service with the
//! original bearer token attached unchanged, then maps the downstream
//! outcome into the gateway's own error vocabulary. One shared mapping
//! table covers every proxied route:
//!
//! | downstream | gateway |
//! |------------|---------|
//! | 2xx | downstream status + body passthrough |
//! | 401 | 401 uniform unauthorized |
//! | 404 | 404 with a resource-specific message |
//! | other 4xx / 5xx / network failure | 502 `<Service> service error` |
//!
//! Every outbound call is bounded by the client-wide timeout; there are no
//! retries. Dropping the call future (client disconnect) cancels the
//! outbound request.

use std::time::Duration;

use axum::{
    body::Body,
    http::header::CONTENT_TYPE,
    response::Response,
};
use reqwest::{header::ACCEPT, Client};

use crate::error::ApiError;

/// A downstream service the gateway forwards to.
#[derive(Debug, Clone)]
pub struct DownstreamTarget {
    base_url: String,
    /// Service label used in client-facing error messages.
    label: &'static str,
}

impl DownstreamTarget {
    pub fn new(base_url: impl Into<String>, label: &'static str) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, label }
    }

    fn service_error_message(&self) -> String {
        format!("{} service error", self.label)
    }
}

/// Forwards verified requests to the product and wallet services.
#[derive(Clone)]
pub struct ProxyForwarder {
    http: Client,
    pub products: DownstreamTarget,
    pub wallet: DownstreamTarget,
}

impl ProxyForwarder {
    /// Build the forwarder with a mandatory per-call timeout.
    pub fn new(
        timeout: Duration,
        products: DownstreamTarget,
        wallet: DownstreamTarget,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            products,
            wallet,
        })
    }

    /// GET `target.base_url + path_and_query`, re-presenting the caller's
    /// bearer token, and pass the status and body through on success. An
    /// empty 2xx body (204 and friends) passes through unchanged.
    ///
    /// `not_found_message` is the resource-specific message surfaced when
    /// the downstream answers 404.
    pub async fn forward(
        &self,
        target: &DownstreamTarget,
        path_and_query: &str,
        bearer: &str,
        not_found_message: &str,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", target.base_url, path_and_query);

        let response = self
            .http
            .get(&url)
            .bearer_auth(bearer)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(
                    service = target.label,
                    timed_out = e.is_timeout(),
                    "downstream call failed: {e}"
                );
                ApiError::bad_gateway(target.service_error_message())
            })?;

        let status = response.status();
        map_downstream_status(status.as_u16(), not_found_message, target)?;

        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!(service = target.label, "downstream body unreadable: {e}");
            ApiError::bad_gateway(target.service_error_message())
        })?;

        let mut reply = Response::builder().status(status);
        if let Some(content_type) = content_type {
            reply = reply.header(CONTENT_TYPE, content_type);
        }
        reply.body(Body::from(bytes)).map_err(|e| {
            tracing::error!("failed to assemble passthrough response: {e}");
            ApiError::internal("Internal error")
        })
    }
}

/// The shared status mapping table. `Ok(())` means the body passes through.
fn map_downstream_status(
    status: u16,
    not_found_message: &str,
    target: &DownstreamTarget,
) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 => Err(ApiError::unauthorized()),
        404 => Err(ApiError::not_found(not_found_message)),
        // Remaining 4xx are a gateway fault: the gateway already validated
        // the request, so an upstream client-error means the two disagree.
        _ => {
            tracing::warn!(service = target.label, status, "downstream error status");
            Err(ApiError::bad_gateway(target.service_error_message()))
        }
    }
}
