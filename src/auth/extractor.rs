// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for authenticated requests.
//!
//! Use the `Auth` extractor in handlers that need the verified caller:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```
//!
//! The [`require_auth`](super::middleware::require_auth) middleware verifies
//! the token and stores the result in request extensions; the extractors
//! read from there first and fall back to verifying the header directly so
//! handlers stay usable in isolation (and in tests).

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::{error::AuthError, middleware::ForwardedToken, token::AuthenticatedUser};
use crate::state::AppState;

/// Pull the bearer token out of the `Authorization` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }
    Ok(token)
}

/// Extractor for the verified caller.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // The gate middleware normally ran first and left the user here.
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().copied() {
            return Ok(Auth(user));
        }

        let token = bearer_token(&parts.headers)?;
        let claims = state.tokens.verify(token)?;
        let user = AuthenticatedUser::try_from(&claims)?;
        Ok(Auth(user))
    }
}

/// Extractor for the original bearer token, re-presented unchanged to
/// downstream services.
pub struct BearerToken(pub String);

impl FromRequestParts<AppState> for BearerToken {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(ForwardedToken(token)) = parts.extensions.get::<ForwardedToken>() {
            return Ok(BearerToken(token.clone()));
        }

        let token = bearer_token(&parts.headers)?;
        Ok(BearerToken(token.to_string()))
    }
}
