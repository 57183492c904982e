// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login endpoints.

use axum::{extract::State, http::StatusCode, Json};

use crate::auth::service;
use crate::error::{ApiError, ApiJson};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::state::AppState;

/// Register a new user.
///
/// The response is the public identity view; the password hash is never
/// included.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    tag = "Auth",
    responses(
        (status = 201, description = "Identity created", body = UserResponse),
        (status = 400, description = "Validation failure or duplicate username/email/mobile"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let identity = service::register(&state, req).await?;
    tracing::info!(user_id = identity.id, "registered new identity");
    Ok((StatusCode::CREATED, Json(identity.into())))
}

/// Log in and receive a session token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Authenticated", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    service::login(&state, &req.username, &req.password)
        .await
        .map(Json)
}
