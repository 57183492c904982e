// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Proxied wallet endpoint with the owner rule.
//!
//! A caller may only read the wallet belonging to their own token subject.
//! A mismatch answers exactly like a missing or invalid token, so the
//! response never reveals whether the requested user exists.

use axum::{extract::State, response::Response};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::auth::{Auth, AuthError, BearerToken};
use crate::error::{ApiError, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct WalletQuery {
    /// Owner id of the requested wallet; must equal the token subject.
    #[serde(rename = "userId")]
    pub user_id: i64,
}

/// Fetch the caller's wallet record from the wallet service.
#[utoipa::path(
    get,
    path = "/api/wallet/userdetails",
    params(WalletQuery),
    tag = "Wallet",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Wallet record from the wallet service"),
        (status = 401, description = "Missing/invalid token or foreign wallet requested"),
        (status = 404, description = "Wallet not found"),
        (status = 502, description = "Wallet service unavailable"),
    )
)]
pub async fn user_wallet(
    Auth(user): Auth,
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<WalletQuery>,
) -> Result<Response, ApiError> {
    if user.user_id != query.user_id {
        tracing::debug!(
            subject = user.user_id,
            requested = query.user_id,
            "wallet owner mismatch"
        );
        return Err(AuthError::NotOwner.into());
    }

    state
        .forwarder
        .forward(
            &state.forwarder.wallet,
            &format!("/api/wallet/userdetails?userId={}", query.user_id),
            &token,
            "Wallet not found",
        )
        .await
}
