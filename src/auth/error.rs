// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization errors.
//!
//! The variants stay distinct internally for logging and tests, but every
//! 401-class failure collapses into the same client-facing body. A caller
//! cannot tell a bad signature from an expired token, or an ownership
//! mismatch from a missing token.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Authentication error type.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Authorization header is not `Bearer <token>`
    InvalidAuthHeader,
    /// Token cannot be parsed into the expected three-part structure
    MalformedToken,
    /// Token signature does not match the payload
    InvalidSignature,
    /// Token expiry has passed
    TokenExpired,
    /// Authenticated subject does not own the requested resource
    NotOwner,
    /// Unexpected local fault during verification or issuance
    InternalError(String),
}

impl AuthError {
    /// Internal code for diagnostics. Never sent to clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::NotOwner => "not_owner",
            AuthError::InternalError(_) => "internal_error",
        }
    }

    /// HTTP status for this error. `NotOwner` maps to 401 rather than 403
    /// so the response is indistinguishable from a bad token.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::NotOwner => StatusCode::UNAUTHORIZED,
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::MalformedToken => write!(f, "Token is malformed"),
            AuthError::InvalidSignature => write!(f, "Token signature is invalid"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::NotOwner => write!(f, "Subject does not own the requested resource"),
            AuthError::InternalError(msg) => write!(f, "Internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error.status_code() {
            StatusCode::UNAUTHORIZED => ApiError::unauthorized(),
            _ => ApiError::internal("Internal error"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(error_code = self.error_code(), "authentication failed");
        ApiError::from(self).into_response()
    }
}
