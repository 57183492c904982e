// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client-facing error contract.
//!
//! Every error leaving the gateway carries the same structured body:
//! `{"status": "FAIL", "message": "...", "timestamp": "..."}` with an HTTP
//! status code from the mapping in [`crate::proxy`]. Internal error types and
//! downstream transport errors are never exposed to clients.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;

/// Uniform message for every authentication and authorization failure.
/// Using a single message for bad tokens, expired tokens, and ownership
/// mismatches keeps the gateway from leaking which identities exist.
pub const PLEASE_LOGIN: &str = "Please Login";

/// Uniform message for login failures, identical for unknown usernames and
/// wrong passwords.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
    timestamp: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// The single unauthorized response shape used for all token and
    /// ownership failures.
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, PLEASE_LOGIN)
    }

    /// Login failure response, identical regardless of which check failed.
    pub fn invalid_credentials() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            status: "FAIL",
            message: self.message,
            timestamp: Utc::now().to_rfc3339(),
        });
        (self.status, body).into_response()
    }
}

/// `Json` extractor whose rejection carries the stable error body instead
/// of axum's plain-text response.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query` extractor whose rejection carries the stable error body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("Wallet not found");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "Wallet not found");

        let bg = ApiError::bad_gateway("Wallet service error");
        assert_eq!(bg.status, StatusCode::BAD_GATEWAY);

        let ua = ApiError::unauthorized();
        assert_eq!(ua.status, StatusCode::UNAUTHORIZED);
        assert_eq!(ua.message, PLEASE_LOGIN);
    }

    #[tokio::test]
    async fn into_response_returns_stable_body_shape() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["status"], "FAIL");
        assert_eq!(body["message"], "bad data");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn invalid_credentials_has_uniform_message() {
        let response = ApiError::invalid_credentials().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["message"], INVALID_CREDENTIALS);
    }
}
