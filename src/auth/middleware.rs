// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The authorization gate, applied to every protected route.
//!
//! Layered over the `/api` subtree with
//! `axum::middleware::from_fn_with_state(state, require_auth)`. Public
//! routes (`/auth/*`, `/health`, `/docs`) are never behind it.
//!
//! The gate is pure: it verifies the bearer token, attaches the verified
//! caller and the original token to request extensions, and otherwise
//! touches nothing. It never calls downstream services.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{error::AuthError, extractor::bearer_token, token::AuthenticatedUser};
use crate::state::AppState;

/// The raw bearer token, kept so the forwarder can re-present it unchanged
/// to downstream services.
#[derive(Debug, Clone)]
pub struct ForwardedToken(pub String);

/// Reject unauthenticated requests before they reach any handler.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, &request) {
        Ok((user, token)) => {
            request.extensions_mut().insert(user);
            request.extensions_mut().insert(ForwardedToken(token));
            next.run(request).await
        }
        Err(error) => {
            // Log the reason, never the token itself.
            tracing::debug!(
                error_code = error.error_code(),
                path = %request.uri().path(),
                "rejected unauthenticated request"
            );
            error.into_response()
        }
    }
}

fn authenticate(
    state: &AppState,
    request: &Request,
) -> Result<(AuthenticatedUser, String), AuthError> {
    let token = bearer_token(request.headers())?;
    let claims = state.tokens.verify(token)?;
    let user = AuthenticatedUser::try_from(&claims)?;
    Ok((user, token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::config::Config;
    use axum::{
        body::{to_bytes, Body},
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Extension, Router,
    };
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: "middleware-test-secret-middleware".to_string(),
            jwt_ttl_secs: 3600,
            product_service_url: "http://127.0.0.1:9001".to_string(),
            wallet_service_url: "http://127.0.0.1:9002".to_string(),
            proxy_timeout_secs: 2,
        };
        AppState::from_config(&config).expect("test state builds")
    }

    async fn probe(Extension(user): Extension<AuthenticatedUser>) -> String {
        format!("{}:{}", user.user_id, user.role)
    }

    fn gated_app(state: AppState) -> Router {
        Router::new()
            .route("/probe", get(probe))
            .layer(middleware::from_fn_with_state(state.clone(), require_auth))
            .with_state(state)
    }

    #[tokio::test]
    async fn missing_token_is_rejected_with_uniform_body() {
        let app = gated_app(test_state());

        let response = app
            .oneshot(HttpRequest::builder().uri("/probe").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["message"], "Please Login");
    }

    fn expired_token(secret: &str) -> String {
        let claims = crate::auth::token::Claims {
            sub: "5".to_string(),
            role: Role::Customer,
            iat: chrono::Utc::now().timestamp() - 120,
            exp: chrono::Utc::now().timestamp() - 60,
        };
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn expired_and_garbage_tokens_get_the_same_response() {
        let state = test_state();
        let expired = expired_token("middleware-test-secret-middleware");

        let mut bodies = Vec::new();
        for token in [expired.as_str(), "garbage", "a.b.c"] {
            let response = gated_app(state.clone())
                .oneshot(
                    HttpRequest::builder()
                        .uri("/probe")
                        .header("Authorization", format!("Bearer {token}"))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
            bodies.push((body["status"].clone(), body["message"].clone()));
        }
        assert_eq!(bodies[0], bodies[1]);
        assert_eq!(bodies[1], bodies[2]);
    }

    #[tokio::test]
    async fn valid_token_reaches_handler_with_verified_user() {
        let state = test_state();
        let token = state.tokens.issue(12, Role::Merchant).unwrap();

        let response = gated_app(state)
            .oneshot(
                HttpRequest::builder()
                    .uri("/probe")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body_bytes.as_ref(), b"12:MERCHANT");
    }

    #[tokio::test]
    async fn token_with_non_numeric_subject_is_rejected() {
        let state = test_state();
        // Sign a structurally valid token whose subject is not a user id.
        let claims = crate::auth::token::Claims {
            sub: "alice".to_string(),
            role: Role::Customer,
            iat: chrono::Utc::now().timestamp(),
            exp: chrono::Utc::now().timestamp() + 60,
        };
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret("middleware-test-secret-middleware".as_bytes()),
        )
        .unwrap();

        let response = gated_app(state)
            .oneshot(
                HttpRequest::builder()
                    .uri("/probe")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
