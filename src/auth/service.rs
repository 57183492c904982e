// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Registration and login orchestration.
//!
//! Hashes and checks passwords via the [`password`](super::password)
//! capability, persists identities through the store, and issues session
//! tokens via [`TokenCodec`](super::token::TokenCodec).
//!
//! Login presents one uniform `Invalid credentials` failure for both
//! unknown usernames and wrong passwords, so responses do not reveal which
//! accounts exist.

use crate::error::ApiError;
use crate::models::{AuthResponse, Identity, NewIdentity, RegisterRequest};
use crate::state::AppState;

use super::password::{fallback_hash, hash_password, verify_password};
use super::roles::Role;

/// Register a new identity.
///
/// Missing role defaults to `CUSTOMER`; an unknown role name is a 400.
/// Returns the stored identity; the HTTP layer converts it to the public
/// view before responding so the password hash never leaves the process.
pub async fn register(state: &AppState, req: RegisterRequest) -> Result<Identity, ApiError> {
    require_field(&req.username, "username")?;
    require_field(&req.email, "email")?;
    require_field(&req.mobile_number, "mobileNumber")?;
    require_field(&req.password, "password")?;
    require_field(&req.display_name, "displayName")?;

    let role = match &req.role {
        None => Role::default(),
        Some(name) => {
            Role::parse(name).ok_or_else(|| ApiError::bad_request(format!("Invalid role: {name}")))?
        }
    };

    // Argon2 is CPU-bound; keep it off the async workers.
    let plain = req.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .map_err(|e| {
            tracing::error!("password hashing task failed: {e}");
            ApiError::internal("Internal error")
        })??;

    let mut store = state.identities.write().await;
    store.save(NewIdentity {
        username: req.username,
        display_name: req.display_name,
        email: req.email,
        mobile_number: req.mobile_number,
        password_hash,
        role,
    })
}

/// Authenticate a username/password pair and issue a session token.
pub async fn login(state: &AppState, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
    let identity = {
        let store = state.identities.read().await;
        store.find_by_username(username)
    };

    // Unknown usernames verify against a fallback hash so both failure
    // paths do the same argon2 work.
    let stored_hash = identity
        .as_ref()
        .map(|i| i.password_hash.clone())
        .unwrap_or_else(|| fallback_hash().to_string());

    let candidate = password.to_string();
    let password_ok = tokio::task::spawn_blocking(move || verify_password(&candidate, &stored_hash))
        .await
        .map_err(|e| {
            tracing::error!("password verification task failed: {e}");
            ApiError::internal("Internal error")
        })?;

    let Some(identity) = identity else {
        return Err(ApiError::invalid_credentials());
    };
    if !password_ok {
        return Err(ApiError::invalid_credentials());
    }

    let token = state.tokens.issue(identity.id, identity.role)?;
    tracing::info!(user_id = identity.id, "login succeeded");

    Ok(AuthResponse {
        user_id: identity.id.to_string(),
        access_token: token,
    })
}

fn require_field(value: &str, name: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("Missing required field: {name}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::http::StatusCode;

    fn test_state() -> AppState {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: "service-test-secret-service-test".to_string(),
            jwt_ttl_secs: 3600,
            product_service_url: "http://127.0.0.1:9001".to_string(),
            wallet_service_url: "http://127.0.0.1:9002".to_string(),
            proxy_timeout_secs: 2,
        };
        AppState::from_config(&config).expect("test state builds")
    }

    fn alice() -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            mobile_number: "+15550001111".to_string(),
            password: "p@ss".to_string(),
            display_name: "Alice".to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn register_defaults_role_to_customer() {
        let state = test_state();
        let identity = register(&state, alice()).await.expect("register succeeds");

        assert_eq!(identity.id, 1);
        assert_eq!(identity.role, Role::Customer);
        assert_eq!(identity.status, "ACTIVE");
    }

    #[tokio::test]
    async fn register_stores_hash_not_plaintext() {
        let state = test_state();
        let identity = register(&state, alice()).await.unwrap();

        assert_ne!(identity.password_hash, "p@ss");
        assert!(!identity.password_hash.contains("p@ss"));
    }

    #[tokio::test]
    async fn register_rejects_unknown_role() {
        let state = test_state();
        let mut req = alice();
        req.role = Some("OVERLORD".to_string());

        let error = register(&state, req).await.unwrap_err();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn register_accepts_explicit_merchant_role() {
        let state = test_state();
        let mut req = alice();
        req.role = Some("merchant".to_string());

        let identity = register(&state, req).await.unwrap();
        assert_eq!(identity.role, Role::Merchant);
    }

    #[tokio::test]
    async fn register_rejects_blank_fields() {
        let state = test_state();
        let mut req = alice();
        req.email = "  ".to_string();

        let error = register(&state, req).await.unwrap_err();
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_issues_verifiable_token() {
        let state = test_state();
        register(&state, alice()).await.unwrap();

        let response = login(&state, "alice", "p@ss").await.expect("login succeeds");
        assert_eq!(response.user_id, "1");

        let claims = state.tokens.verify(&response.access_token).unwrap();
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.role, Role::Customer);
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_fail_identically() {
        let state = test_state();
        register(&state, alice()).await.unwrap();

        let unknown = login(&state, "nobody", "p@ss").await.unwrap_err();
        let wrong = login(&state, "alice", "wrong").await.unwrap_err();

        assert_eq!(unknown.status, wrong.status);
        assert_eq!(unknown.message, wrong.message);
    }
}
