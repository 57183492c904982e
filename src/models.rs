// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures used by the REST API, plus the
//! [`Identity`] record owned by the identity store. Wire names are camelCase
//! to match the downstream services.
//!
//! [`Identity`] deliberately does not implement `Serialize`: the password
//! hash must never appear in a response body. Handlers convert to
//! [`UserResponse`] instead.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

/// A stored user identity.
///
/// Created on registration, read on login and on every authorization
/// decision that needs the role or id. Never mutated by the gateway core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Sequential numeric id, also the token subject in string form.
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub mobile_number: String,
    /// Salted one-way hash; never serialized.
    pub password_hash: String,
    pub role: Role,
    /// Account status, `"ACTIVE"` on creation.
    pub status: String,
}

/// Fields needed to create a new identity. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password_hash: String,
    pub role: Role,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub mobile_number: String,
    pub password: String,
    pub display_name: String,
    /// Optional role name; defaults to `CUSTOMER` when absent.
    #[serde(default)]
    pub role: Option<String>,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// String form of the authenticated user's numeric id.
    pub user_id: String,
    /// Signed session token to present as `Authorization: Bearer <token>`.
    pub access_token: String,
}

/// Public view of an identity, returned by `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub mobile_number: String,
    pub role: Role,
    pub status: String,
}

impl From<Identity> for UserResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
            display_name: identity.display_name,
            email: identity.email,
            mobile_number: identity.mobile_number,
            role: identity.role,
            status: identity.status,
        }
    }
}
