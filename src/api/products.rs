// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Proxied product catalog endpoints.
//!
//! Any authenticated caller may browse the catalog; there is no ownership
//! rule here. The downstream body passes through untouched.

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::auth::{Auth, BearerToken};
use crate::error::ApiError;
use crate::state::AppState;

/// List all products from the product service.
#[utoipa::path(
    get,
    path = "/api/products/all",
    tag = "Products",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Product list from the product service"),
        (status = 401, description = "Missing or invalid token"),
        (status = 502, description = "Product service unavailable"),
    )
)]
pub async fn all_products(
    Auth(_user): Auth,
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
) -> Result<Response, ApiError> {
    state
        .forwarder
        .forward(
            &state.forwarder.products,
            "/api/products/all",
            &token,
            "Products not found",
        )
        .await
}

/// Fetch a single product by id from the product service.
#[utoipa::path(
    get,
    path = "/api/products/{product_id}",
    params(("product_id" = i64, Path, description = "Product id")),
    tag = "Products",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Product from the product service"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Product not found"),
        (status = 502, description = "Product service unavailable"),
    )
)]
pub async fn product_by_id(
    Auth(_user): Auth,
    BearerToken(token): BearerToken,
    State(state): State<AppState>,
    Path(product_id): Path<i64>,
) -> Result<Response, ApiError> {
    state
        .forwarder
        .forward(
            &state.forwarder.products,
            &format!("/api/products/{product_id}"),
            &token,
            "Product not found",
        )
        .await
}
